use crate::form::EntityForm;

/// Choices offered by the amount selector: `1..=remaining`.
pub fn amount_options(remaining: usize) -> Vec<usize> {
    (1..=remaining).collect()
}

pub fn seed_slots<E: EntityForm>(count: usize) -> Vec<E> {
    vec![E::template(); count]
}

use super::{EntityForm, FieldValue, FormError};

/// All fields reachable from `root` through the entity's dependency table,
/// in breadth-first order. `root` itself is never included.
pub fn transitive_dependents<E: EntityForm>(root: E::Field) -> Vec<E::Field> {
    let mut visited = vec![root];
    let mut ordered = Vec::new();
    let mut frontier = vec![root];
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for field in frontier {
            for dependent in E::dependents(field) {
                if visited.contains(&dependent) {
                    continue;
                }
                visited.push(dependent);
                ordered.push(dependent);
                next.push(dependent);
            }
        }
        frontier = next;
    }
    ordered
}

/// Writes `value` into `field` and resets every transitive dependent to its
/// template default. Writing the current value is a no-op. Returns the fields
/// that were reset.
pub fn apply_field_change<E: EntityForm>(
    form: &mut E,
    field: E::Field,
    value: FieldValue,
) -> Result<Vec<E::Field>, FormError> {
    if form.get(field)? == value {
        return Ok(Vec::new());
    }
    form.set(field, value)?;
    let cleared = transitive_dependents::<E>(field);
    for dependent in &cleared {
        form.reset_field(*dependent)?;
    }
    Ok(cleared)
}

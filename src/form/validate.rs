use super::EntityForm;

/// One inline validation message for a field of one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub slot: usize,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "entity {} `{}`: {}",
            self.slot + 1,
            self.field,
            self.message
        )
    }
}

pub fn validate_fields<E: EntityForm>(
    form: &E,
    slot: usize,
    fields: &[E::Field],
) -> Vec<FieldIssue> {
    fields
        .iter()
        .filter_map(|field| {
            form.check(*field).err().map(|message| FieldIssue {
                slot,
                field: field.to_string(),
                message,
            })
        })
        .collect()
}

pub fn validate_form<E: EntityForm>(form: &E, slot: usize) -> Vec<FieldIssue> {
    validate_fields(form, slot, &form.required_fields())
}

//! Typed per-entity form records and the descriptor trait the wizard engine is
//! generic over.

pub mod cascade;
pub mod kind;
pub mod rows;
pub mod validate;
pub mod value;

pub use cascade::{apply_field_change, transitive_dependents};
pub use kind::{EntityKind, ALL_ENTITY_KINDS};
pub use rows::NoRows;
pub use validate::{validate_fields, validate_form, FieldIssue};
pub use value::FieldValue;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("field `{field}` expects a {expected} value, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("row {index} is out of range for `{group}` ({len} rows)")]
    RowOutOfRange {
        group: String,
        index: usize,
        len: usize,
    },
    #[error("slot {index} is out of range ({count} slots)")]
    SlotOutOfRange { index: usize, count: usize },
}

/// Descriptor for one entity type: its schema, template, dependency table,
/// identity key and payload shaping.
pub trait EntityForm: Clone + std::fmt::Debug + Serialize {
    type Field: Copy + Eq + std::fmt::Debug + std::fmt::Display;
    type Group: Copy + Eq + std::fmt::Debug + std::fmt::Display;

    const KIND: EntityKind;

    /// Blank record a freshly added slot starts from.
    fn template() -> Self;

    fn get(&self, field: Self::Field) -> Result<FieldValue, FormError>;

    /// Raw write. Does not cascade; use [`apply_field_change`] for user edits.
    fn set(&mut self, field: Self::Field, value: FieldValue) -> Result<(), FormError>;

    /// Fields that must be cleared when `field` changes.
    fn dependents(field: Self::Field) -> Vec<Self::Field>;

    /// Fields checked before leaving this slot's step, including any that are
    /// only required because a toggle is on.
    fn required_fields(&self) -> Vec<Self::Field>;

    fn check(&self, field: Self::Field) -> Result<(), String>;

    /// Batch-unique identifier, e.g. `accountId-containerId-name`.
    fn identity_key(&self) -> String;

    /// Display name used in per-item notifications.
    fn display_name(&self) -> String;

    fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    fn append_row(&mut self, group: Self::Group) -> usize;

    fn remove_row(&mut self, group: Self::Group, index: usize) -> Result<(), FormError>;

    fn row_count(&self, group: Self::Group) -> usize;

    fn reset_field(&mut self, field: Self::Field) -> Result<(), FormError> {
        let default = Self::template().get(field)?;
        self.set(field, default)
    }
}

//! Entity descriptors for every GA4 and GTM object the wizard can create or update.

pub mod account;
pub mod container;
pub mod gtm;
pub mod key_event;
pub mod property;
pub mod tag;
pub mod trigger;
pub mod variable;
pub mod workspace;

pub use account::{AccountField, AccountForm};
pub use container::{ContainerField, ContainerForm, ContainerRows};
pub use gtm::GtmParameter;
pub use key_event::{DefaultValue, KeyEventField, KeyEventForm};
pub use property::{PropertyField, PropertyForm};
pub use tag::{ConsentSettings, TagField, TagForm, TagRows};
pub use trigger::{TriggerCondition, TriggerField, TriggerForm, TriggerRows};
pub use variable::{VariableField, VariableForm, VariableRows};
pub use workspace::{WorkspaceField, WorkspaceForm};

pub(crate) fn check_currency_code(value: &str) -> Result<(), String> {
    if value.len() == 3 && value.chars().all(|ch| ch.is_ascii_uppercase()) {
        return Ok(());
    }
    Err("currency code must be a three-letter ISO 4217 code, e.g. USD".to_string())
}

pub(crate) fn check_one_of(kind: &str, value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(format!("{kind} must be one of: {}", allowed.join(", ")))
}

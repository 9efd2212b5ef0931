use crate::shared::ids::validate_numeric_id;
use serde::{Deserialize, Serialize};

/// One `{type, key, value}` parameter row as the GTM API models it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GtmParameter {
    #[serde(rename = "type")]
    pub kind: String,
    pub key: String,
    pub value: String,
}

impl GtmParameter {
    pub fn template(key: &str) -> Self {
        Self {
            kind: "template".to_string(),
            key: key.to_string(),
            value: String::new(),
        }
    }

    pub fn blank() -> Self {
        Self::template("")
    }
}

pub(crate) fn check_account_id(value: &str) -> Result<(), String> {
    validate_numeric_id("account", value)
}

pub(crate) fn check_container_id(value: &str) -> Result<(), String> {
    validate_numeric_id("container", value)
}

pub(crate) fn check_workspace_id(value: &str) -> Result<(), String> {
    validate_numeric_id("workspace", value)
}

pub(crate) fn check_parameter_key(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("parameter key is required".to_string());
    }
    Ok(())
}

pub(crate) fn workspace_scoped_key(
    account_id: &str,
    container_id: &str,
    workspace_id: &str,
    name: &str,
) -> String {
    format!("{account_id}-{container_id}-{workspace_id}-{}", name.trim())
}

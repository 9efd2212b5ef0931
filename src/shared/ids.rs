use crate::shared::serde_ext::parse_via_string;
use serde::{Deserialize, Deserializer, Serialize};

const MAX_EVENT_NAME_CHARS: usize = 40;

pub fn validate_identifier_value(kind: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} must be non-empty"));
    }
    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Ok(());
    }
    Err(format!(
        "{kind} must use only ASCII letters, digits, '-' or '_'"
    ))
}

/// GTM account, container and workspace ids are plain decimal strings.
pub fn validate_numeric_id(kind: &str, value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{kind} is required"));
    }
    if value.chars().all(|ch| ch.is_ascii_digit()) {
        return Ok(());
    }
    Err(format!("{kind} must contain only digits"))
}

/// GA4 resources are addressed as `<collection>/<digits>`, e.g. `properties/123`.
pub fn validate_resource_name(kind: &str, collection: &str, value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{kind} is required"));
    }
    let Some(id) = value
        .strip_prefix(collection)
        .and_then(|rest| rest.strip_prefix('/'))
    else {
        return Err(format!("{kind} must look like `{collection}/<id>`"));
    };
    validate_numeric_id(kind, id)
}

pub fn validate_display_name(kind: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{kind} is required"));
    }
    if value.chars().any(char::is_control) {
        return Err(format!("{kind} must not contain control characters"));
    }
    Ok(())
}

pub fn validate_event_name(value: &str) -> Result<(), String> {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return Err("event name is required".to_string());
    };
    if !first.is_ascii_alphabetic() {
        return Err("event name must start with a letter".to_string());
    }
    if value.chars().count() > MAX_EVENT_NAME_CHARS {
        return Err(format!(
            "event name must be at most {MAX_EVENT_NAME_CHARS} characters"
        ));
    }
    if chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return Ok(());
    }
    Err("event name must use only ASCII letters, digits or '_'".to_string())
}

/// Name of a tier-limited feature, e.g. `GTMTags`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FeatureName(String);

impl FeatureName {
    pub fn parse(raw: &str) -> Result<Self, String> {
        validate_identifier_value("feature name", raw)?;
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FeatureName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::borrow::Borrow<str> for FeatureName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for FeatureName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl<'de> Deserialize<'de> for FeatureName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_via_string(deserializer, "feature name", Self::parse)
    }
}

use super::FormError;
use serde::{Deserialize, Serialize};

/// Scalar view of a single form field, used for generic reads, writes and
/// change detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Flag(_) => "flag",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "list",
        }
    }

    pub fn into_text(self, field: &str) -> Result<String, FormError> {
        match self {
            FieldValue::Text(text) => Ok(text),
            other => Err(mismatch(field, "text", &other)),
        }
    }

    pub fn into_flag(self, field: &str) -> Result<bool, FormError> {
        match self {
            FieldValue::Flag(flag) => Ok(flag),
            other => Err(mismatch(field, "flag", &other)),
        }
    }

    pub fn into_number(self, field: &str) -> Result<f64, FormError> {
        match self {
            FieldValue::Number(number) => Ok(number),
            other => Err(mismatch(field, "number", &other)),
        }
    }

    pub fn into_list(self, field: &str) -> Result<Vec<String>, FormError> {
        match self {
            FieldValue::List(items) => Ok(items),
            other => Err(mismatch(field, "list", &other)),
        }
    }
}

fn mismatch(field: &str, expected: &'static str, actual: &FieldValue) -> FormError {
    FormError::TypeMismatch {
        field: field.to_string(),
        expected,
        actual: actual.type_name(),
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

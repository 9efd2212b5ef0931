use super::ApiError;
use crate::shared::serde_ext::null_as_default;
use serde::{Deserialize, Serialize};

/// Raw response body of a create/update call. Flags are independent on the wire;
/// [`FeatureOutcome`] collapses them into one variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ResultItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub not_found_error: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit_reached: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub not_found: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit_reached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i64>,
}

impl ResultItem {
    pub fn succeeded(name: &str) -> Self {
        Self {
            success: true,
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn not_found(name: &str) -> Self {
        Self {
            name: name.to_string(),
            not_found: true,
            ..Self::default()
        }
    }

    pub fn limit_reached(name: &str, remaining: Option<i64>) -> Self {
        Self {
            name: name.to_string(),
            limit_reached: true,
            remaining,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureOutcome {
    Success(Vec<ResultItem>),
    NotFound(Vec<ResultItem>),
    LimitReached(Vec<ResultItem>),
    Errors(Vec<String>),
    Failure(String),
}

impl FeatureOutcome {
    pub fn from_result(result: Result<FeatureResponse, ApiError>) -> Self {
        match result {
            Ok(response) => Self::from(response),
            Err(err) => FeatureOutcome::Failure(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FeatureOutcome::Success(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureOutcome::Success(_) => "success",
            FeatureOutcome::NotFound(_) => "not_found",
            FeatureOutcome::LimitReached(_) => "limit_reached",
            FeatureOutcome::Errors(_) => "errors",
            FeatureOutcome::Failure(_) => "failure",
        }
    }
}

/// Precedence: success, not found, limit reached, then generic errors. A
/// response with no flag and no messages maps to an empty `Errors`.
impl From<FeatureResponse> for FeatureOutcome {
    fn from(response: FeatureResponse) -> Self {
        if response.success {
            FeatureOutcome::Success(response.results)
        } else if response.not_found_error {
            FeatureOutcome::NotFound(response.results)
        } else if response.limit_reached {
            FeatureOutcome::LimitReached(response.results)
        } else {
            FeatureOutcome::Errors(response.errors)
        }
    }
}

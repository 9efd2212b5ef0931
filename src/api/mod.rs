//! Boundary to the external create/update endpoints.

pub mod http;
pub mod response;

pub use http::{HttpFeatureApi, HttpTierLimitProvider};
pub use response::{FeatureOutcome, FeatureResponse, ResultItem};

use crate::form::EntityKind;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("api returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode api response: {0}")]
    Decode(String),
    #[error("failed to encode {kind} payload: {source}")]
    Encode {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("no tier limit is configured for feature `{0}`")]
    UnknownFeature(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            Operation::Create => "created",
            Operation::Update => "updated",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One batch, sent in a single call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRequest {
    #[serde(skip)]
    pub kind: EntityKind,
    #[serde(skip)]
    pub operation: Operation,
    pub forms: Vec<serde_json::Value>,
}

pub trait FeatureApi {
    fn submit(&mut self, request: &FeatureRequest) -> Result<FeatureResponse, ApiError>;
}

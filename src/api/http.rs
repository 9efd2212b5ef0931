use super::{ApiError, FeatureApi, FeatureRequest, FeatureResponse};
use crate::config::{ConfigError, Settings};
use crate::shared::ids::FeatureName;
use crate::tier::{TierLimit, TierLimitProvider};
use serde::Deserialize;
use std::time::Duration;

#[derive(Clone)]
struct HttpClient {
    base_url: String,
    token: String,
    agent: ureq::Agent,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self::new(
            &settings.api.base_url,
            settings.api_token()?,
            Duration::from_secs(settings.api.timeout_secs),
        ))
    }

    fn new(base_url: &str, token: String, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut url = self.endpoint(path);
        if !query.is_empty() {
            let encoded = query
                .iter()
                .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url = format!("{url}?{encoded}");
        }
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .call();
        decode(response)
    }

    fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .send_json(body);
        decode(response)
    }
}

/// Error statuses may still carry a well-formed body (e.g. a 403 with
/// `limitReached`), so those are decoded before falling back to `Status`.
fn decode<T: for<'de> Deserialize<'de>>(
    response: Result<ureq::Response, ureq::Error>,
) -> Result<T, ApiError> {
    match response {
        Ok(response) => response
            .into_json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string())),
        Err(ureq::Error::Status(status, response)) => {
            let body = response
                .into_string()
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            serde_json::from_str::<T>(&body).map_err(|_| ApiError::Status { status, body })
        }
        Err(ureq::Error::Transport(transport)) => Err(ApiError::Request(transport.to_string())),
    }
}

/// Create/update endpoints at `{base_url}/{entity path}/{create|update}`.
#[derive(Debug, Clone)]
pub struct HttpFeatureApi {
    client: HttpClient,
}

impl HttpFeatureApi {
    pub fn new(base_url: &str, token: String, timeout: Duration) -> Self {
        Self {
            client: HttpClient::new(base_url, token, timeout),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self {
            client: HttpClient::from_settings(settings)?,
        })
    }

    pub fn endpoint_for(&self, request: &FeatureRequest) -> String {
        self.client.endpoint(&format!(
            "{}/{}",
            request.kind.api_path(),
            request.operation.as_str()
        ))
    }
}

impl FeatureApi for HttpFeatureApi {
    fn submit(&mut self, request: &FeatureRequest) -> Result<FeatureResponse, ApiError> {
        let body = serde_json::to_value(request).map_err(|source| ApiError::Encode {
            kind: request.kind,
            source,
        })?;
        self.client.post_json(
            &format!("{}/{}", request.kind.api_path(), request.operation.as_str()),
            body,
        )
    }
}

/// Quota lookups at `{base_url}/tier-limits?feature=<name>`.
#[derive(Debug, Clone)]
pub struct HttpTierLimitProvider {
    client: HttpClient,
}

impl HttpTierLimitProvider {
    pub fn new(base_url: &str, token: String, timeout: Duration) -> Self {
        Self {
            client: HttpClient::new(base_url, token, timeout),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self {
            client: HttpClient::from_settings(settings)?,
        })
    }
}

impl TierLimitProvider for HttpTierLimitProvider {
    fn tier_limit(&mut self, feature: &FeatureName) -> Result<TierLimit, ApiError> {
        self.client
            .get_json("tier-limits", &[("feature", feature.to_string())])
    }
}

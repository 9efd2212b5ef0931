use super::ConfigError;
use crate::form::EntityKind;
use crate::shared::logging::EventLog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_TOKEN_ENV: &str = "TAGWIZARD_API_TOKEN";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DISMISS_LABEL: &str = "Close";

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_dismiss_label() -> String {
    DEFAULT_DISMISS_LABEL.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
    #[serde(default)]
    pub routes: BTreeMap<EntityKind, String>,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationSettings {
    #[serde(default = "default_dismiss_label")]
    pub dismiss_label: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            dismiss_label: default_dismiss_label(),
        }
    }
}

impl Settings {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api: ApiSettings {
                base_url: base_url.to_string(),
                token_env: default_token_env(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            log_path: None,
            routes: BTreeMap::new(),
            notifications: NotificationSettings::default(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::Settings(
                "`api.base_url` must start with http:// or https://".to_string(),
            ));
        }
        if self.api.token_env.trim().is_empty() {
            return Err(ConfigError::Settings(
                "`api.token_env` must be non-empty".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Settings(
                "`api.timeout_secs` must be greater than zero".to_string(),
            ));
        }
        if let Some(path) = &self.log_path {
            if !path.is_absolute() {
                return Err(ConfigError::Settings(
                    "`log_path` must be an absolute path".to_string(),
                ));
            }
        }
        for (kind, route) in &self.routes {
            if !route.starts_with('/') || route.trim() != route {
                return Err(ConfigError::Settings(format!(
                    "route for `{kind}` must be an absolute app path without surrounding whitespace"
                )));
            }
        }
        if self.notifications.dismiss_label.trim().is_empty() {
            return Err(ConfigError::Settings(
                "`notifications.dismiss_label` must be non-empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Listing page the user lands on after a successful batch.
    pub fn listing_route(&self, kind: EntityKind) -> String {
        self.routes
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.default_listing_route().to_string())
    }

    pub fn event_log(&self) -> EventLog {
        match &self.log_path {
            Some(path) => EventLog::to_file(path),
            None => EventLog::disabled(),
        }
    }

    pub fn api_token(&self) -> Result<String, ConfigError> {
        std::env::var(&self.api.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingToken {
                env: self.api.token_env.clone(),
            })
    }
}

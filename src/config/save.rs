use super::{default_global_config_path, ConfigError, Settings};
use crate::shared::fs_atomic::atomic_write_file;
use std::path::{Path, PathBuf};

pub fn save_settings(settings: &Settings) -> Result<PathBuf, ConfigError> {
    let path = default_global_config_path()?;
    save_settings_to(settings, &path)?;
    Ok(path)
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    settings.validate()?;
    let body = serde_yaml::to_string(settings).map_err(|source| ConfigError::Encode {
        path: path.display().to_string(),
        source,
    })?;
    atomic_write_file(path, body.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    })
}

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pl_core::config::FieldSettings;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

const APP_DIR_NAME: &str = "principal-list";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config failed: {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config failed: {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// `<config dir>/principal-list/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load field settings from `path`.
///
/// A missing file yields `FieldSettings::default()`; unreadable or
/// malformed files are errors.
pub async fn load_settings(path: &Path) -> Result<FieldSettings, ConfigError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(FieldSettings::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let value: toml::Value = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let settings =
        FieldSettings::from_toml(&value).map_err(|e| ConfigError::Invalid(e.to_string()))?;

    info!(path = %path.display(), "Loaded field settings");
    Ok(settings)
}

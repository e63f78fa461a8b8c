//! Configuration loading from file system
//!
//! Handles locating and parsing config.json.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::defaults::{APP_DIR_NAME, CONFIG_FILE_NAME};
use super::types::Config;
use crate::error::DispatchError;

/// Default config location: `<config dir>/shortcut-dispatch/config.json`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Read and parse a config file, reporting why it failed.
pub fn read_config(path: &Path) -> Result<Config, DispatchError> {
    let content = fs::read_to_string(path).map_err(|source| DispatchError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    let config = serde_json::from_str(&content)?;
    Ok(config)
}

/// How a config load went, kept so it can be logged once logging is up.
#[derive(Debug)]
pub enum ConfigStatus {
    NotFound(PathBuf),
    Loaded(PathBuf),
    Invalid { path: PathBuf, error: DispatchError },
}

impl ConfigStatus {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, ConfigStatus::Loaded(_))
    }

    pub fn log(&self) {
        match self {
            ConfigStatus::NotFound(path) => {
                info!(path = %path.display(), "Config file not found, using defaults")
            }
            ConfigStatus::Loaded(path) => {
                info!(path = %path.display(), "Successfully loaded config")
            }
            ConfigStatus::Invalid { path, error } => warn!(
                path = %path.display(),
                error = %error,
                "Failed to load config, using defaults"
            ),
        }
    }
}

/// Resolve configuration without logging.
///
/// Falls back to Config::default() if the file is missing or invalid; the
/// returned status says which.
pub fn resolve_config(path: Option<&Path>) -> (Config, ConfigStatus) {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    if !config_path.exists() {
        return (Config::default(), ConfigStatus::NotFound(config_path));
    }

    match read_config(&config_path) {
        Ok(config) => (config, ConfigStatus::Loaded(config_path)),
        Err(error) => (
            Config::default(),
            ConfigStatus::Invalid {
                path: config_path,
                error,
            },
        ),
    }
}

/// Load configuration from `path`, or the default location when `None`.
///
/// Returns Config::default() if the file is missing or invalid.
#[instrument(name = "load_config", skip_all)]
pub fn load_config(path: Option<&Path>) -> Config {
    let (config, status) = resolve_config(path);
    status.log();
    config
}

//! Tool configuration.
//!
//! Everything is optional: with no config file the defaults apply and the
//! controller connection details come from CLI flags. The password is never
//! part of the file or the defaults — it is read from the environment only.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::classify::Thresholds;

/// Environment variable the controller password is read from.
pub const PASSWORD_ENV: &str = "FABRICSNAP_PASSWORD";

/// Config file consulted when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "fabricsnap.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub controller: ControllerConfig,
    pub thresholds: Thresholds,
    pub snapshots: SnapshotConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Controller host name or address. Empty means "must come from the
    /// command line".
    pub host: String,
    pub username: String,
    /// Verify the controller's TLS certificate.
    pub verify_tls: bool,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: String::new(),
            verify_tls: true,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Directory snapshots are written to and listed from.
    pub dir: PathBuf,
    /// Fault lookback window in hours.
    pub fault_lookback_hours: i64,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("snapshots"),
            fault_lookback_hours: 20,
        }
    }
}

/// Errors loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

impl Config {
    /// Load configuration. An explicit path must exist and parse; without
    /// one, the default file is used when present, defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        match explicit {
            Some(path) => load_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    load_file(default)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }
}

fn load_file(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Controller password from the environment, if set and non-empty.
pub fn password_from_env() -> Option<String> {
    env::var(PASSWORD_ENV).ok().filter(|pwd| !pwd.is_empty())
}

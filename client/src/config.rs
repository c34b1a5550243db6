use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use solpot_api::consts::*;

use crate::error::ConfigError;

/// Process wide settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Config {
    pub update_client_seed: bool,
    pub delay_between_accounts: u64,
    pub seconds_per_day: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            update_client_seed: true,
            delay_between_accounts: DEFAULT_DELAY_BETWEEN_ACCOUNTS,
            seconds_per_day: SECONDS_PER_DAY,
        }
    }
}

impl Config {
    /// Loads the JSON config file. A missing file means all defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text, path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::ReadConfig {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_json(text: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }
}

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding `catalog.toml`, `purposes.toml` and `lessons/`.
    /// Built-in content is used when unset.
    #[serde(default)]
    pub content_dir: Option<String>,
    /// Default log filter when `WEAVELANG_LOG` is not set.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    pub fn content_dir(&self) -> Option<&Path> {
        self.content_dir.as_deref().map(Path::new)
    }
}

pub fn load_config_from_file(file_path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(file_path).map_err(|source| ConfigError::Read {
        path: file_path.to_path_buf(),
        source,
    })?;
    let loaded_config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: file_path.to_path_buf(),
        source,
    })?;

    if let Some(dir) = &loaded_config.content_dir {
        if !PathBuf::from(dir).is_dir() {
            return Err(ConfigError::InvalidValue {
                field: "content_dir".to_string(),
                reason: format!("'{}' specified in {} is not a valid directory", dir, file_path.display()),
            });
        }
    }
    if loaded_config.log_level.as_deref().is_some_and(|l| l.trim().is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: "log_level".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(loaded_config)
}

/// Loads an explicitly named config file, or `config.toml` from the working
/// directory if it exists. Only the explicit file is required to exist.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => load_config_from_file(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                load_config_from_file(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

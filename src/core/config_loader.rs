//! # Config Loader
//!
//! Loads `config.toml` from the vocab configuration directory. A missing file
//! is created with defaults so users have something to edit.

use crate::{core::paths, models::AppConfig};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize default configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid configuration: '{field}' must be at least 1.")]
    ZeroSize { field: &'static str },
}

/// Reads `config.toml` from `config_dir`, writing the defaults first if it
/// doesn't exist yet.
pub fn load_config(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let config_path = paths::config_file_in(config_dir);

    let config = if !config_path.exists() {
        let default_config = AppConfig::default();
        let toml_string = toml::to_string_pretty(&default_config)?;
        fs::write(&config_path, toml_string)?;
        log::info!("Created default configuration at '{}'", config_path.display());
        default_config
    } else {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: config_path.display().to_string(),
            source,
        })?
    };

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let sizes = [
        ("page_size", config.page_size),
        ("section_page_size", config.section_page_size),
        ("random_count", config.random_count),
    ];
    for (field, value) in sizes {
        if value == 0 {
            return Err(ConfigError::ZeroSize { field });
        }
    }
    Ok(())
}

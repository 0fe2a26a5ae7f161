// src/core/paths.rs

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILENAME, STATE_FILENAME};
use lazy_static::lazy_static;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref VOCAB_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to expand path '{path}': {reason}")]
    Expansion { path: String, reason: String },
    #[error("Could not determine the current working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

/// Returns the vocab configuration directory (`~/.config/vocab`, or
/// `$VOCAB_CONFIG_DIR` when set). Creates it if it doesn't exist.
///
/// Memoized: the first call computes and caches the path.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    let mut cached_path_guard = VOCAB_CONFIG_DIR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(path) = &*cached_path_guard {
        return Ok(path.clone());
    }

    let config_path = match env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::config_dir()
            .ok_or(PathError::ConfigDirNotFound)?
            .join(CONFIG_DIR_NAME),
    };

    if !config_path.exists() {
        fs::create_dir_all(&config_path).map_err(|e| PathError::ConfigDirCreation {
            path: config_path.display().to_string(),
            source: e,
        })?;
    }

    log::debug!("Using config directory '{}'", config_path.display());
    *cached_path_guard = Some(config_path.clone());
    Ok(config_path)
}

/// Path of `config.toml` inside the given config directory.
pub fn config_file_in(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILENAME)
}

/// Path of `state.bin` inside the given config directory.
pub fn state_file_in(config_dir: &Path) -> PathBuf {
    config_dir.join(STATE_FILENAME)
}

/// Turns a user-supplied data file path into an absolute one.
///
/// Expands `~` and environment variables, resolves relative paths against the
/// current working directory and strips Windows verbatim prefixes.
pub fn resolve_data_path(raw: &str) -> Result<PathBuf, PathError> {
    let cwd = env::current_dir().map_err(PathError::WorkingDir)?;
    resolve_data_path_from(raw, &cwd)
}

/// Same as [`resolve_data_path`], relative to an explicit base directory.
pub fn resolve_data_path_from(raw: &str, base: &Path) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(raw.trim()).map_err(|e| PathError::Expansion {
        path: raw.to_string(),
        reason: e.to_string(),
    })?;

    let path = PathBuf::from(expanded.into_owned());
    let absolute = if path.is_absolute() {
        path
    } else {
        base.join(path)
    };
    Ok(dunce::simplified(&absolute).to_path_buf())
}

/// Shows a path relative to the working directory when that is shorter.
pub fn display_path(path: &Path) -> String {
    let full = path.display().to_string();
    let Ok(cwd) = env::current_dir() else {
        return full;
    };
    match path.strip_prefix(&cwd) {
        Ok(rel) if !rel.as_os_str().is_empty() => {
            let rel = rel.display().to_string();
            if rel.len() < full.len() { rel } else { full }
        }
        _ => full,
    }
}

// src/core/data_file.rs

//! Checks and metadata for the JSON data file backing the section store.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use thiserror::Error;

use crate::constants::DATA_FILE_EXTENSION;

// Length of the truncated hash in bytes (16 bytes = 32 hex characters).
const FINGERPRINT_LENGTH: usize = 16;

#[derive(Error, Debug)]
pub enum DataFileError {
    #[error("File '{0}' does not exist.")]
    NotFound(String),
    #[error("'{0}' is a directory, not a file.")]
    IsDirectory(String),
    #[error("File '{0}' must have a .json extension.")]
    WrongExtension(String),
    #[error("Cannot read '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{path}' is not valid JSON: {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("The root of '{0}' must be a JSON object.")]
    NotAnObject(String),
}

/// What we know about a data file, gathered without failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub exists: bool,
    pub size: Option<u64>,
    pub modified: Option<SystemTime>,
    pub readable: bool,
    pub valid_json: bool,
    pub sections: usize,
    /// Truncated blake3 hash of the content, hex encoded.
    pub fingerprint: Option<String>,
    pub error: Option<String>,
}

/// Validates that `path` is a usable data file and returns its section count.
///
/// The file must exist, be a regular file with a `.json` extension, parse as
/// JSON and have an object at its root.
pub fn validate_data_file(path: &Path) -> Result<usize, DataFileError> {
    let shown = path.display().to_string();
    let metadata = fs::metadata(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DataFileError::NotFound(shown.clone())
        } else {
            DataFileError::Unreadable {
                path: shown.clone(),
                source,
            }
        }
    })?;

    if metadata.is_dir() {
        return Err(DataFileError::IsDirectory(shown));
    }
    if path.extension().and_then(|e| e.to_str()) != Some(DATA_FILE_EXTENSION) {
        return Err(DataFileError::WrongExtension(shown));
    }

    let content = fs::read(path).map_err(|source| DataFileError::Unreadable {
        path: shown.clone(),
        source,
    })?;
    count_sections(&content, &shown)
}

fn count_sections(content: &[u8], shown: &str) -> Result<usize, DataFileError> {
    let value: serde_json::Value =
        serde_json::from_slice(content).map_err(|source| DataFileError::InvalidJson {
            path: shown.to_string(),
            source,
        })?;
    value
        .as_object()
        .map(serde_json::Map::len)
        .ok_or_else(|| DataFileError::NotAnObject(shown.to_string()))
}

/// Collects [`FileInfo`] for `path`. Problems end up in `error` instead of
/// being returned.
pub fn inspect(path: &Path) -> FileInfo {
    let mut info = FileInfo {
        path: path.to_path_buf(),
        ..FileInfo::default()
    };
    let shown = path.display().to_string();

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            info.error = Some(e.to_string());
            return info;
        }
    };
    info.exists = true;
    info.size = Some(metadata.len());
    info.modified = metadata.modified().ok();

    if metadata.is_dir() {
        info.error = Some(DataFileError::IsDirectory(shown).to_string());
        return info;
    }

    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) => {
            info.error = Some(e.to_string());
            return info;
        }
    };
    info.readable = true;

    let hash = blake3::hash(&content);
    info.fingerprint = hash
        .as_bytes()
        .get(..FINGERPRINT_LENGTH)
        .map(hex::encode);

    match count_sections(&content, &shown) {
        Ok(sections) => {
            info.valid_json = true;
            info.sections = sections;
        }
        Err(DataFileError::NotAnObject(p)) => {
            info.valid_json = true;
            info.error = Some(DataFileError::NotAnObject(p).to_string());
        }
        Err(e) => info.error = Some(e.to_string()),
    }

    log::debug!("Inspected data file: {:?}", info);
    info
}

/// Human-readable byte count (B, KB, MB).
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    match bytes {
        b if b >= MB => format!("{}.{} MB", b / MB, (b % MB) * 10 / MB),
        b if b >= KB => format!("{}.{} KB", b / KB, (b % KB) * 10 / KB),
        b => format!("{} B", b),
    }
}

/// Coarse "how long ago" for a modification time.
pub fn format_age(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    match secs {
        0..=59 => t!("files.age.just_now").to_string(),
        60..=3_599 => format!(t!("files.age.minutes"), n = secs / 60),
        3_600..=86_399 => format!(t!("files.age.hours"), n = secs / 3_600),
        _ => format!(t!("files.age.days"), n = secs / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_valid_file_reports_section_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, r#"{"day1": [], "day2": [{"W": "a", "C": "b"}]}"#).unwrap();

        assert_eq!(validate_data_file(&path).unwrap(), 2);
    }

    #[test]
    fn test_missing_file_and_directory_are_rejected() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            validate_data_file(&dir.path().join("nope.json")),
            Err(DataFileError::NotFound(_))
        ));
        assert!(matches!(
            validate_data_file(dir.path()),
            Err(DataFileError::IsDirectory(_))
        ));
    }

    #[test]
    fn test_wrong_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "{}").unwrap();

        assert!(matches!(
            validate_data_file(&path),
            Err(DataFileError::WrongExtension(_))
        ));
    }

    #[test]
    fn test_invalid_json_and_non_object_root_are_rejected() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            validate_data_file(&broken),
            Err(DataFileError::InvalidJson { .. })
        ));

        let array = dir.path().join("array.json");
        fs::write(&array, "[]").unwrap();
        assert!(matches!(
            validate_data_file(&array),
            Err(DataFileError::NotAnObject(_))
        ));
    }

    #[test]
    fn test_inspect_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, r#"{"day1": []}"#).unwrap();

        let info = inspect(&path);
        assert!(info.exists && info.readable && info.valid_json);
        assert_eq!(info.sections, 1);
        assert_eq!(info.size, Some(12));
        assert_eq!(info.fingerprint.as_ref().map(String::len), Some(32));
        assert!(info.error.is_none());
    }

    #[test]
    fn test_inspect_missing_file_records_error() {
        let dir = tempdir().unwrap();
        let info = inspect(&dir.path().join("missing.json"));

        assert!(!info.exists);
        assert!(!info.readable);
        assert!(info.error.is_some());
    }

    #[test]
    fn test_size_and_age_formatting() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
        assert_eq!(format_age(Duration::from_secs(5)), "just now");
        assert_eq!(format_age(Duration::from_secs(125)), "2 min ago");
        assert_eq!(format_age(Duration::from_secs(7_200)), "2 h ago");
        assert_eq!(format_age(Duration::from_secs(3 * 86_400)), "3 days ago");
    }
}

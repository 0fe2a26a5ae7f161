// src/core/section_store.rs

use crate::models::{Section, SectionsDocument, Word};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors returned by section storage backends.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A section with this name already exists.
    #[error("Section '{name}' already exists.")]
    SectionExists { name: String },
    /// No section with this name exists.
    #[error("Section '{name}' does not exist.")]
    SectionNotFound { name: String },
    /// The word is already part of the section.
    #[error("Word '{word}' already exists in section '{section}'.")]
    WordExists { word: String, section: String },
    /// The word is not part of the section.
    #[error("Word '{word}' does not exist in section '{section}'.")]
    WordNotFound { word: String, section: String },
    /// A filesystem I/O error occurred.
    #[error("Filesystem Error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The data file is not a valid sections document.
    #[error("Failed to parse data file '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// The temporary file could not replace the data file.
    #[error("Failed to replace data file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage capability used by the section and word operations.
pub trait SectionStore {
    /// Creates an empty section. Fails if the name is taken.
    fn create_section(&self, name: &str) -> StoreResult<()>;
    fn get_section(&self, name: &str) -> StoreResult<Section>;
    /// All sections, ordered by name.
    fn list_sections(&self) -> StoreResult<Vec<Section>>;
    fn section_exists(&self, name: &str) -> StoreResult<bool>;
    /// Appends a word to a section. Fails if the section is missing or the
    /// word text is already present in it.
    fn add_word(&self, section: &str, word: Word) -> StoreResult<()>;
    fn remove_word(&self, section: &str, word: &str) -> StoreResult<()>;
    fn delete_section(&self, name: &str) -> StoreResult<()>;
}

/// A [`SectionStore`] backed by a single JSON document.
///
/// Every operation reads the whole file and mutations write it back. A missing
/// or empty file behaves as an empty document.
#[derive(Debug, Clone)]
pub struct JsonSectionStore {
    path: PathBuf,
}

impl JsonSectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<SectionsDocument> {
        if !self.path.exists() {
            return Ok(SectionsDocument::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        if content.trim().is_empty() {
            return Ok(SectionsDocument::new());
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Writes through a temp file in the same directory, then renames it over
    /// the data file.
    fn save(&self, document: &SectionsDocument) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|source| self.io_error(source))?;

        let json = serde_json::to_string_pretty(document).map_err(|source| StoreError::Json {
            path: self.path.display().to_string(),
            source,
        })?;

        let mut temp_file = NamedTempFile::new_in(&dir).map_err(|source| self.io_error(source))?;
        temp_file
            .write_all(json.as_bytes())
            .map_err(|source| self.io_error(source))?;
        temp_file.persist(&self.path)?;

        log::debug!(
            "Saved {} section(s) to '{}'",
            document.len(),
            self.path.display()
        );
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl SectionStore for JsonSectionStore {
    fn create_section(&self, name: &str) -> StoreResult<()> {
        let mut document = self.load()?;
        if document.contains_key(name) {
            return Err(StoreError::SectionExists {
                name: name.to_string(),
            });
        }
        document.insert(name.to_string(), Vec::new());
        self.save(&document)?;
        log::info!("Created section '{}'", name);
        Ok(())
    }

    fn get_section(&self, name: &str) -> StoreResult<Section> {
        let mut document = self.load()?;
        let words = document
            .remove(name)
            .ok_or_else(|| StoreError::SectionNotFound {
                name: name.to_string(),
            })?;
        Ok(Section {
            name: name.to_string(),
            words,
        })
    }

    fn list_sections(&self) -> StoreResult<Vec<Section>> {
        Ok(self
            .load()?
            .into_iter()
            .map(|(name, words)| Section { name, words })
            .collect())
    }

    fn section_exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.load()?.contains_key(name))
    }

    fn add_word(&self, section: &str, word: Word) -> StoreResult<()> {
        let mut document = self.load()?;
        let words = document
            .get_mut(section)
            .ok_or_else(|| StoreError::SectionNotFound {
                name: section.to_string(),
            })?;

        if words.iter().any(|existing| existing.word == word.word) {
            return Err(StoreError::WordExists {
                word: word.word,
                section: section.to_string(),
            });
        }

        log::info!("Adding word '{}' to section '{}'", word.word, section);
        words.push(word);
        self.save(&document)
    }

    fn remove_word(&self, section: &str, word: &str) -> StoreResult<()> {
        let mut document = self.load()?;
        let words = document
            .get_mut(section)
            .ok_or_else(|| StoreError::SectionNotFound {
                name: section.to_string(),
            })?;

        let before = words.len();
        words.retain(|existing| existing.word != word);
        if words.len() == before {
            return Err(StoreError::WordNotFound {
                word: word.to_string(),
                section: section.to_string(),
            });
        }

        log::info!("Removed word '{}' from section '{}'", word, section);
        self.save(&document)
    }

    fn delete_section(&self, name: &str) -> StoreResult<()> {
        let mut document = self.load()?;
        if document.remove(name).is_none() {
            return Err(StoreError::SectionNotFound {
                name: name.to_string(),
            });
        }
        log::info!("Deleted section '{}'", name);
        self.save(&document)
    }
}

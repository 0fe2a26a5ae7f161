// src/models.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_DATA_FILE, DEFAULT_PAGE_SIZE, DEFAULT_RANDOM_COUNT, DEFAULT_SECTION_PAGE_SIZE,
};

// --- STORAGE MODELS ---
// The field names mirror the on-disk JSON so existing data files keep loading.

/// A single vocabulary entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Word {
    #[serde(rename = "W")]
    pub word: String,
    #[serde(rename = "C")]
    pub translation: String,
    #[serde(rename = "Phrase", default)]
    pub phrase: String,
}

impl Word {
    pub fn new(
        word: impl Into<String>,
        translation: impl Into<String>,
        phrase: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            phrase: phrase.into(),
        }
    }
}

/// A named group of words, e.g. one study day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    pub name: String,
    pub words: Vec<Word>,
}

/// The whole data file: section name to its words.
pub type SectionsDocument = BTreeMap<String, Vec<Word>>;

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
    /// Zero-based position of the first item in the full listing.
    pub offset: usize,
}

/// A search result, remembering which section the word came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub section: String,
    pub word: Word,
}

// --- `config.toml` MODEL ---

/// Deserialized contents of `config.toml`. Every field has a default, so a
/// partial file is valid.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the JSON data file. `~` and environment variables are expanded.
    pub data_file: String,
    pub page_size: usize,
    pub section_page_size: usize,
    pub random_count: usize,
    /// Section used by one-shot commands when none was given or remembered.
    pub default_section: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            section_page_size: DEFAULT_SECTION_PAGE_SIZE,
            random_count: DEFAULT_RANDOM_COUNT,
            default_section: None,
        }
    }
}

// --- PERSISTED SESSION STATE (`state.bin`) ---

/// State carried from one run to the next.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    /// The section most recently selected or created.
    pub last_section: Option<String>,
    /// Data file chosen with `switch`; takes precedence over `config.toml`.
    pub active_data_file: Option<PathBuf>,
    /// The data file that was active before the last switch, for rollback.
    pub previous_data_file: Option<PathBuf>,
}

// src/core/validation.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The word cannot be empty.")]
    EmptyWord,
    #[error("The translation cannot be empty.")]
    EmptyTranslation,
    #[error("The section name cannot be empty.")]
    EmptySectionName,
    #[error("The section name '{0}' contains control characters.")]
    InvalidSectionName(String),
    #[error("The search keyword cannot be empty.")]
    EmptyKeyword,
    #[error("The count must be at least 1 (got {0}).")]
    InvalidCount(i64),
}

/// Checks a word entry. The phrase is optional and never validated.
/// Returns the trimmed word and translation.
pub fn validate_word(word: &str, translation: &str) -> Result<(String, String), ValidationError> {
    let word = word.trim();
    let translation = translation.trim();
    if word.is_empty() {
        return Err(ValidationError::EmptyWord);
    }
    if translation.is_empty() {
        return Err(ValidationError::EmptyTranslation);
    }
    Ok((word.to_string(), translation.to_string()))
}

/// Validates a section name and returns it trimmed.
pub fn validate_section_name(raw_name: &str) -> Result<String, ValidationError> {
    let name = raw_name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptySectionName);
    }
    if name.chars().any(char::is_control) {
        return Err(ValidationError::InvalidSectionName(name.escape_debug().to_string()));
    }
    Ok(name.to_string())
}

pub fn validate_keyword(raw: &str) -> Result<String, ValidationError> {
    let keyword = raw.trim();
    if keyword.is_empty() {
        return Err(ValidationError::EmptyKeyword);
    }
    Ok(keyword.to_string())
}

/// Counts come from user input as signed integers; anything below 1 is rejected.
pub fn validate_count(count: i64) -> Result<usize, ValidationError> {
    usize::try_from(count)
        .ok()
        .filter(|c| *c >= 1)
        .ok_or(ValidationError::InvalidCount(count))
}

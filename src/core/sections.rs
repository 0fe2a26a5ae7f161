// src/core/sections.rs

//! Section and word operations on top of a [`SectionStore`].
//!
//! These functions hold no state of their own. The currently selected section
//! is tracked by the caller (session map or persisted state) and passed in.

use crate::core::section_store::{SectionStore, StoreError};
use crate::core::validation::{self, ValidationError};
use crate::models::{Page, SearchHit, Section, Word};
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SectionsError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Section '{name}' has no words yet.")]
    EmptySection { name: String },
}

pub type SectionsResult<T> = Result<T, SectionsError>;

/// Slices `items` into one page.
///
/// A size of 0 is treated as 1. The requested page is clamped into
/// `1..=total_pages`, so asking past the end returns the last page.
pub fn paginate<T: Clone>(items: &[T], page: usize, size: usize) -> Page<T> {
    let size = size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(size);
    let current_page = page.clamp(1, total_pages.max(1));
    let offset = (current_page - 1) * size;
    let end = (offset + size).min(total);

    Page {
        items: items.get(offset..end).map(<[T]>::to_vec).unwrap_or_default(),
        total,
        current_page,
        total_pages,
        has_next: current_page < total_pages,
        has_prev: current_page > 1,
        offset,
    }
}

/// Validates and stores a new word. Returns the word as stored.
pub fn add_word<S: SectionStore + ?Sized>(
    store: &S,
    section: &str,
    word: &str,
    translation: &str,
    phrase: &str,
) -> SectionsResult<Word> {
    let (word, translation) = validation::validate_word(word, translation)?;
    let entry = Word::new(word, translation, phrase.trim());
    store.add_word(section, entry.clone())?;
    Ok(entry)
}

pub fn list_words<S: SectionStore + ?Sized>(
    store: &S,
    section: &str,
    page: usize,
    size: usize,
) -> SectionsResult<Page<Word>> {
    let section = store.get_section(section)?;
    Ok(paginate(&section.words, page, size))
}

/// Picks up to `count` distinct words from a section, uniformly at random.
pub fn random_words<S, R>(
    store: &S,
    section: &str,
    count: usize,
    rng: &mut R,
) -> SectionsResult<Vec<Word>>
where
    S: SectionStore + ?Sized,
    R: Rng + ?Sized,
{
    let section = store.get_section(section)?;
    if section.words.is_empty() {
        return Err(SectionsError::EmptySection { name: section.name });
    }
    let count = count.min(section.words.len());
    Ok(section
        .words
        .choose_multiple(rng, count)
        .cloned()
        .collect())
}

/// Case-insensitive substring search on word and translation, either in one
/// section or across all of them.
pub fn search_words<S: SectionStore + ?Sized>(
    store: &S,
    keyword: &str,
    section: Option<&str>,
) -> SectionsResult<Vec<SearchHit>> {
    let needle = validation::validate_keyword(keyword)?.to_lowercase();

    let sections = match section {
        Some(name) => vec![store.get_section(name)?],
        None => store.list_sections()?,
    };

    let hits = sections
        .into_iter()
        .flat_map(|Section { name, words }| {
            words
                .into_iter()
                .map(move |word| (name.clone(), word))
        })
        .filter(|(_, word)| {
            word.word.to_lowercase().contains(&needle)
                || word.translation.to_lowercase().contains(&needle)
        })
        .map(|(section, word)| SearchHit { section, word })
        .collect::<Vec<_>>();

    log::debug!("Search for '{}' found {} hit(s)", keyword, hits.len());
    Ok(hits)
}

pub fn create_section<S: SectionStore + ?Sized>(store: &S, name: &str) -> SectionsResult<String> {
    let name = validation::validate_section_name(name)?;
    store.create_section(&name)?;
    Ok(name)
}

pub fn list_sections<S: SectionStore + ?Sized>(
    store: &S,
    page: usize,
    size: usize,
) -> SectionsResult<Page<Section>> {
    let sections = store.list_sections()?;
    Ok(paginate(&sections, page, size))
}

/// Checks that the section exists and returns it. Remembering the selection
/// is up to the caller.
pub fn select_section<S: SectionStore + ?Sized>(store: &S, name: &str) -> SectionsResult<Section> {
    let name = validation::validate_section_name(name)?;
    Ok(store.get_section(&name)?)
}

pub fn remove_word<S: SectionStore + ?Sized>(
    store: &S,
    section: &str,
    word: &str,
) -> SectionsResult<()> {
    let word = word.trim();
    if word.is_empty() {
        return Err(ValidationError::EmptyWord.into());
    }
    Ok(store.remove_word(section, word)?)
}

pub fn delete_section<S: SectionStore + ?Sized>(store: &S, name: &str) -> SectionsResult<()> {
    let name = validation::validate_section_name(name)?;
    Ok(store.delete_section(&name)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::section_store::JsonSectionStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use tempfile::{TempDir, tempdir};

    fn store_with_words(words: &[(&str, &str)]) -> (TempDir, JsonSectionStore) {
        let dir = tempdir().unwrap();
        let store = JsonSectionStore::new(dir.path().join("sections.json"));
        store.create_section("day1").unwrap();
        for (word, translation) in words {
            store
                .add_word("day1", Word::new(*word, *translation, ""))
                .unwrap();
        }
        (dir, store)
    }

    #[test]
    fn test_paginate_middle_page() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 2, 10);

        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.offset, 10);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn test_paginate_clamps_out_of_range_pages() {
        let items: Vec<u32> = (1..=25).collect();

        let past_end = paginate(&items, 99, 10);
        assert_eq!(past_end.current_page, 3);
        assert_eq!(past_end.items, vec![21, 22, 23, 24, 25]);
        assert!(!past_end.has_next);

        let before_start = paginate(&items, 0, 10);
        assert_eq!(before_start.current_page, 1);
        assert!(!before_start.has_prev);
    }

    #[test]
    fn test_paginate_empty_and_zero_size() {
        let empty: Vec<u32> = Vec::new();
        let page = paginate(&empty, 3, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next && !page.has_prev);

        let items = vec![1, 2, 3];
        assert_eq!(paginate(&items, 1, 0).items, vec![1]);
    }

    #[test]
    fn test_add_word_trims_and_validates() {
        let (_dir, store) = store_with_words(&[]);

        let stored = add_word(&store, "day1", " apple ", " pomme ", " a phrase ").unwrap();
        assert_eq!(stored, Word::new("apple", "pomme", "a phrase"));

        let err = add_word(&store, "day1", "", "pomme", "").unwrap_err();
        assert!(matches!(
            err,
            SectionsError::Validation(ValidationError::EmptyWord)
        ));
    }

    #[test]
    fn test_random_words_never_exceed_section_or_repeat() {
        let (_dir, store) = store_with_words(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);
        let mut rng = StdRng::seed_from_u64(7);

        for requested in [1, 3, 4, 10] {
            let picked = random_words(&store, "day1", requested, &mut rng).unwrap();
            assert_eq!(picked.len(), requested.min(4));
            let unique: HashSet<_> = picked.iter().map(|w| w.word.clone()).collect();
            assert_eq!(unique.len(), picked.len());
        }
    }

    #[test]
    fn test_random_words_on_empty_section_fails() {
        let (_dir, store) = store_with_words(&[]);
        let mut rng = StdRng::seed_from_u64(1);

        let err = random_words(&store, "day1", 5, &mut rng).unwrap_err();
        assert!(matches!(err, SectionsError::EmptySection { name } if name == "day1"));
    }

    #[test]
    fn test_search_is_case_insensitive_on_both_fields() {
        let (_dir, store) = store_with_words(&[("Cat", "chat"), ("dog", "CHIEN"), ("bird", "oiseau")]);
        store.create_section("day2").unwrap();
        store.add_word("day2", Word::new("catalog", "catalogue", "")).unwrap();

        let hits = search_words(&store, "cat", None).unwrap();
        let found: Vec<_> = hits.iter().map(|h| (h.section.as_str(), h.word.word.as_str())).collect();
        assert_eq!(found, vec![("day1", "Cat"), ("day2", "catalog")]);

        let hits = search_words(&store, "chien", Some("day1")).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].word.word, "dog");

        assert!(search_words(&store, "cat", Some("day1")).unwrap().len() == 1);
    }

    #[test]
    fn test_search_requires_keyword() {
        let (_dir, store) = store_with_words(&[]);
        assert!(matches!(
            search_words(&store, "  ", None),
            Err(SectionsError::Validation(ValidationError::EmptyKeyword))
        ));
    }

    #[test]
    fn test_select_missing_section_fails() {
        let (_dir, store) = store_with_words(&[("a", "1")]);

        assert_eq!(select_section(&store, "day1").unwrap().words.len(), 1);
        assert!(matches!(
            select_section(&store, "day9"),
            Err(SectionsError::Store(StoreError::SectionNotFound { .. }))
        ));
    }

    #[test]
    fn test_list_sections_is_paged() {
        let dir = tempdir().unwrap();
        let store = JsonSectionStore::new(dir.path().join("sections.json"));
        for name in ["a", "b", "c"] {
            create_section(&store, name).unwrap();
        }

        let page = list_sections(&store, 2, 2).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "c");
        assert_eq!(page.total, 3);
    }
}

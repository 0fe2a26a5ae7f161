// src/state.rs

use crate::models::SessionState;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Filesystem Error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode session state: {0}")]
    Encode(#[from] bincode::error::EncodeError),
}

/// Tracks whether the session state was touched during this run.
/// A snapshot of the loaded state is kept from the first mutable access on.
enum Tracked {
    Pristine(SessionState),
    Dirty {
        original: SessionState,
        current: SessionState,
    },
}

/// Session state persisted between runs in `state.bin`.
pub struct AppState {
    state: Tracked,
    path: PathBuf,
}

impl AppState {
    pub fn new(session: SessionState, path: impl Into<PathBuf>) -> Self {
        Self {
            state: Tracked::Pristine(session),
            path: path.into(),
        }
    }

    /// Loads the state file. A missing file gives the default state; an
    /// unreadable or undecodable one is logged and replaced by the default.
    pub fn load(path: &Path) -> Self {
        let session = match fs::read(path) {
            Ok(bytes) => match bincode::serde::decode_from_slice::<SessionState, _>(
                &bytes,
                bincode::config::standard(),
            ) {
                Ok((session, _)) => session,
                Err(e) => {
                    log::warn!(
                        "Ignoring corrupted state file '{}': {}",
                        path.display(),
                        e
                    );
                    SessionState::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionState::default(),
            Err(e) => {
                log::warn!("Could not read state file '{}': {}", path.display(), e);
                SessionState::default()
            }
        };
        Self::new(session, path)
    }

    pub fn get(&self) -> &SessionState {
        match &self.state {
            Tracked::Pristine(session) => session,
            Tracked::Dirty { current, .. } => current,
        }
    }

    /// Mutable access. The first call snapshots the loaded state so that
    /// [`needs_saving`](Self::needs_saving) can compare against it.
    pub fn get_mut(&mut self) -> &mut SessionState {
        if let Tracked::Pristine(_) = self.state {
            let taken = std::mem::replace(&mut self.state, Tracked::Pristine(SessionState::default()));
            if let Tracked::Pristine(session) = taken {
                self.state = Tracked::Dirty {
                    original: session.clone(),
                    current: session,
                };
            }
        }

        match &mut self.state {
            Tracked::Dirty { current, .. } => current,
            Tracked::Pristine(session) => session,
        }
    }

    pub fn needs_saving(&self) -> bool {
        match &self.state {
            Tracked::Pristine(_) => false,
            Tracked::Dirty { original, current } => original != current,
        }
    }

    /// Writes the state file if anything changed. Returns whether it wrote.
    pub fn save_if_needed(&self) -> Result<bool, StateError> {
        if !self.needs_saving() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn save(&self) -> Result<(), StateError> {
        let io_error = |source| StateError::Io {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_error)?;
            }
        }
        let bytes = bincode::serde::encode_to_vec(self.get(), bincode::config::standard())?;
        fs::write(&self.path, bytes).map_err(io_error)?;
        log::debug!("Saved session state to '{}'", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fresh_state_is_pristine() {
        let dir = tempdir().unwrap();
        let state = AppState::load(&dir.path().join("state.bin"));

        assert_eq!(state.get(), &SessionState::default());
        assert!(!state.needs_saving());
    }

    #[test]
    fn test_mutable_access_without_change_is_not_dirty() {
        let mut state = AppState::new(SessionState::default(), "unused.bin");
        let _ = state.get_mut();
        assert!(!state.needs_saving());
    }

    #[test]
    fn test_change_marks_dirty_and_survives_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.bin");

        let mut state = AppState::load(&path);
        state.get_mut().last_section = Some("day1".to_string());
        state.get_mut().previous_data_file = Some(PathBuf::from("/tmp/old.json"));
        assert!(state.needs_saving());
        assert!(state.save_if_needed().unwrap());

        let reloaded = AppState::load(&path);
        assert_eq!(reloaded.get().last_section.as_deref(), Some("day1"));
        assert_eq!(
            reloaded.get().previous_data_file,
            Some(PathBuf::from("/tmp/old.json"))
        );
        assert!(!reloaded.needs_saving());
    }

    #[test]
    fn test_reverting_a_change_needs_no_save() {
        let mut state = AppState::new(SessionState::default(), "unused.bin");
        state.get_mut().last_section = Some("day1".to_string());
        state.get_mut().last_section = None;
        assert!(!state.needs_saving());
    }

    #[test]
    fn test_corrupted_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.bin");
        fs::write(&path, [0xff, 0xff, 0xff, 0xff, 0xff]).unwrap();

        let state = AppState::load(&path);
        assert_eq!(state.get(), &SessionState::default());
    }
}

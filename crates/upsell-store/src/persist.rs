//! Session-scoped snapshot storage.
//!
//! The whole [`StoreState`] is written as one JSON string under
//! [`SNAPSHOT_KEY`]. There is no version tag: anything that parses is
//! accepted, anything that does not is dropped in favor of the defaults.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::PersistError;
use crate::state::StoreState;

/// Key the snapshot lives under.
pub const SNAPSHOT_KEY: &str = "productState";

/// A string key/value slot scoped to one session.
pub trait SessionStorage {
    /// # Errors
    ///
    /// Returns [`PersistError`] if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// # Errors
    ///
    /// Returns [`PersistError`] if the backing store cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the backing store cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<(), PersistError>;
}

/// In-process storage; lives as long as the value does.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStorage {
    entries: HashMap<String, String>,
}

impl MemorySessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PersistError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a session directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// reader never sees a half-written snapshot.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    dir: PathBuf,
}

impl FileSessionStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileSessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistError::Io { path, source }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir).map_err(|source| PersistError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|source| PersistError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| PersistError::Io { path, source })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PersistError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistError::Io { path, source }),
        }
    }
}

/// Serializes `state` under [`SNAPSHOT_KEY`].
///
/// # Errors
///
/// Returns [`PersistError`] if serialization or the storage write fails.
pub fn save_snapshot<S: SessionStorage>(
    storage: &mut S,
    state: &StoreState,
) -> Result<(), PersistError> {
    let raw = serde_json::to_string(state)?;
    storage.set_item(SNAPSHOT_KEY, &raw)?;
    tracing::debug!(
        bytes = raw.len(),
        slots = state.slot_count(),
        "snapshot written"
    );
    Ok(())
}

/// Reads the snapshot back. A missing key, an unreadable store, or a payload
/// that does not parse all yield [`StoreState::default`]. Repeated slot ids
/// get fresh ones so later slot mutations are not rejected.
#[must_use]
pub fn load_snapshot<S: SessionStorage>(storage: &S) -> StoreState {
    let raw = match storage.get_item(SNAPSHOT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("no snapshot found, starting from defaults");
            return StoreState::default();
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not read snapshot, starting from defaults");
            return StoreState::default();
        }
    };

    match serde_json::from_str::<StoreState>(&raw) {
        Ok(mut state) => {
            state.ensure_first_slot();
            let reissued = state.reissue_duplicate_slot_ids();
            if reissued > 0 {
                tracing::warn!(reissued, "snapshot repeated slot ids, assigned fresh ones");
            }
            tracing::debug!(slots = state.slot_count(), "snapshot restored");
            state
        }
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed snapshot");
            StoreState::default()
        }
    }
}

#[cfg(test)]
#[path = "persist_test.rs"]
mod tests;

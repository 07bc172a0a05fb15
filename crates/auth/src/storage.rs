//! Durable key/value storage for the session mirror.
//!
//! The session is persisted as three string entries. Backends only have to
//! read single keys and apply a batch of writes; a backend that can make the
//! batch atomic (e.g. [`JsonFileStorage`]) should.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// `"true"` or `"false"`.
pub const KEY_IS_AUTHENTICATED: &str = "isAuthenticated";
/// The signed-in user, serialized as JSON.
pub const KEY_USER: &str = "user";
/// The bearer token.
pub const KEY_TOKEN: &str = "token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// A single mutation in a write batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageWrite {
    Set { key: &'static str, value: String },
    Remove { key: &'static str },
}

impl StorageWrite {
    pub fn set(key: &'static str, value: impl Into<String>) -> Self {
        Self::Set {
            key,
            value: value.into(),
        }
    }

    pub fn remove(key: &'static str) -> Self {
        Self::Remove { key }
    }

    fn apply_to(&self, entries: &mut BTreeMap<String, String>) {
        match self {
            StorageWrite::Set { key, value } => {
                entries.insert((*key).to_string(), value.clone());
            }
            StorageWrite::Remove { key } => {
                entries.remove(*key);
            }
        }
    }
}

/// Read/write contract of the durable session mirror.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Apply all writes, in order. Either all of them take effect or none do.
    fn apply(&mut self, writes: &[StorageWrite]) -> Result<(), StorageError>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn apply(&mut self, writes: &[StorageWrite]) -> Result<(), StorageError> {
        (**self).apply(writes)
    }
}

/// Process-local storage; nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed raw entries, e.g. to simulate what a previous run left behind.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, writes: &[StorageWrite]) -> Result<(), StorageError> {
        for write in writes {
            write.apply_to(&mut self.entries);
        }
        Ok(())
    }
}

/// A flat JSON object on disk, e.g. `{"isAuthenticated":"true","token":"..."}`.
///
/// Entries are cached in memory after `open`. Each batch is written to a
/// sibling temp file and renamed over the original.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Open the file at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        Ok(Self { path, entries })
    }

    /// Like [`open`](Self::open), but a corrupt file is discarded (it will be
    /// overwritten by the next write) instead of failing.
    pub fn open_or_reset(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        match Self::open(path.clone()) {
            Err(StorageError::Corrupt { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "discarding corrupt session file");
                Ok(Self {
                    path,
                    entries: BTreeMap::new(),
                })
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let bytes = serde_json::to_vec_pretty(entries).map_err(|e| io_err(io::Error::other(e)))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl SessionStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, writes: &[StorageWrite]) -> Result<(), StorageError> {
        let mut next = self.entries.clone();
        for write in writes {
            write.apply_to(&mut next);
        }
        self.write_file(&next)?;
        self.entries = next;
        tracing::debug!(path = %self.path.display(), writes = writes.len(), "session file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hrms-auth-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn memory_storage_applies_batches_in_order() {
        let mut storage = MemoryStorage::new();
        storage
            .apply(&[
                StorageWrite::set(KEY_TOKEN, "a"),
                StorageWrite::set(KEY_TOKEN, "b"),
                StorageWrite::set(KEY_USER, "{}"),
                StorageWrite::remove(KEY_USER),
            ])
            .unwrap();

        assert_eq!(storage.get(KEY_TOKEN).unwrap().as_deref(), Some("b"));
        assert_eq!(storage.get(KEY_USER).unwrap(), None);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn json_file_storage_survives_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let mut storage = JsonFileStorage::open(&path).unwrap();
        storage
            .apply(&[
                StorageWrite::set(KEY_IS_AUTHENTICATED, "true"),
                StorageWrite::set(KEY_TOKEN, "t-1"),
            ])
            .unwrap();

        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.get(KEY_IS_AUTHENTICATED).unwrap().as_deref(), Some("true"));
        assert_eq!(reopened.get(KEY_TOKEN).unwrap().as_deref(), Some("t-1"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn corrupt_file_fails_open_but_resets_on_request() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{not json").unwrap();

        assert!(matches!(
            JsonFileStorage::open(&path),
            Err(StorageError::Corrupt { .. })
        ));

        let storage = JsonFileStorage::open_or_reset(&path).unwrap();
        assert_eq!(storage.get(KEY_TOKEN).unwrap(), None);

        fs::remove_file(&path).unwrap();
    }
}

//! Local key-value persistence for the cart and wishlist lists.
//!
//! The store is the local-storage analogue: a flat string-to-string map
//! under fixed keys, overwritten wholesale on every mutation. Writes are
//! last-writer-wins with no locking and no merge - two processes sharing a
//! data directory get no ordering guarantee, by contract.
//!
//! Reads fail open: an absent key, an unreadable file, or unparsable stored
//! JSON all come back as the empty list (logged, never surfaced). Writes
//! propagate their errors; a failed write leaves the caller's in-memory
//! state untouched because validation happens entirely before persisting.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Fixed storage keys for the two lists.
pub mod keys {
    /// Key holding the serialized cart list.
    pub const CART: &str = "pomelo.cart";

    /// Key holding the serialized wishlist.
    pub const WISHLIST: &str = "pomelo.wishlist";
}

/// A flat string key-value store.
///
/// `put` overwrites unconditionally; there is no compare-and-swap and no
/// per-key locking. Implementations use interior mutability so the engine
/// can share the store behind `&self`.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the backing medium cannot be written.
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// File-backed store: one file per key under a data directory.
///
/// Durable for the lifetime of the directory, like origin-scoped browser
/// storage. Concurrent writers from other processes are last-writer-wins.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path(key), value)?;
        Ok(())
    }
}

/// Read and deserialize the list under `key`, failing open to empty.
///
/// Absent keys, read failures, and parse failures all yield `vec![]`;
/// the latter two are logged at `warn`. This mirrors the recovery contract
/// for corrupt local storage: treat it as "no data", never error.
pub fn read_list<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read stored list, treating as empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(list) => list,
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding unparsable stored list");
            Vec::new()
        }
    }
}

/// Serialize and overwrite the list under `key`.
///
/// # Errors
///
/// Returns [`StoreError`] if serialization or the write fails. Nothing is
/// written on serialization failure.
pub fn write_list<T: Serialize>(
    store: &impl KeyValueStore,
    key: &str,
    list: &[T],
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(list)?;
    store.put(key, &raw)
}

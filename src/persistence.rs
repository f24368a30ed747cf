//! Durable storage for the calculation history.
//!
//! A [`HistoryStore`] is a small keyed text store, much like browser local
//! storage: one record per key, read once at startup and rewritten after every
//! change. [`FileStore`] keeps each record as `<dir>/<key>.json`; [`MemoryStore`]
//! keeps them in a shared map.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::data::history::HistoryEntry;
use crate::error::StorageError;

/// Keyed text storage for persisted history records.
pub trait HistoryStore: Send {
    /// Read the record under `key`. `Ok(None)` if nothing was stored.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Replace the record under `key`.
    fn save(&mut self, key: &str, contents: &str) -> Result<(), StorageError>;
    /// Delete the record under `key`. Deleting a missing record is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

// ---------- File-backed store ----------

/// Stores each record as a JSON file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.axis-scaler`, falling back to the working directory when `HOME` is unset.
    pub fn default_dir() -> PathBuf {
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".axis-scaler"),
            None => PathBuf::from(".axis-scaler"),
        }
    }

    /// File path used for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

impl HistoryStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(txt) => Ok(Some(txt)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), contents)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------- In-memory store ----------

/// In-memory store. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw record under `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Put a raw record, bypassing serialization (e.g. to simulate corruption).
    pub fn insert(&self, key: &str, contents: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), contents.to_string());
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<(), StorageError> {
        self.insert(key, contents);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

// ---------- JSON helpers ----------

/// Serialize a history sequence as pretty JSON.
pub fn history_to_json(entries: &[HistoryEntry]) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Deserialize a history sequence from JSON.
pub fn history_from_json(json: &str) -> Result<Vec<HistoryEntry>, StorageError> {
    Ok(serde_json::from_str(json)?)
}

/// Write a history sequence to an arbitrary JSON file (export).
pub fn export_history_json(entries: &[HistoryEntry], path: &Path) -> Result<(), StorageError> {
    let txt = history_to_json(entries)?;
    fs::write(path, txt)?;
    Ok(())
}

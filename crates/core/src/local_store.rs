//! Local key/value mirror for session state.
//!
//! Values are JSON strings keyed by name, like browser local storage. The in-memory store is
//! the default; when a store path is configured the whole map is kept in one JSON file and
//! rewritten after every mutation.

use crate::config::CoreConfig;
use crate::{HerbalError, HerbalResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub trait LocalStore: Send {
    fn get(&self, key: &str) -> HerbalResult<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> HerbalResult<()>;
    fn remove(&mut self, key: &str) -> HerbalResult<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> HerbalResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> HerbalResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> HerbalResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating it lazily on first write.
    ///
    /// A file that is not a JSON object of strings is discarded with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`HerbalError::StoreRead`] if the file exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> HerbalResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "discarding malformed local store");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(HerbalError::StoreRead(err)),
        };
        Ok(Self { path, entries })
    }

    fn flush(&self) -> HerbalResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(HerbalError::StoreWrite)?;
            }
        }
        let text =
            serde_json::to_string_pretty(&self.entries).map_err(HerbalError::StoreSerialization)?;
        fs::write(&self.path, text).map_err(|err| {
            tracing::error!(path = %self.path.display(), error = %err, "failed to write local store");
            HerbalError::StoreWrite(err)
        })
    }
}

impl LocalStore for JsonFileStore {
    fn get(&self, key: &str) -> HerbalResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    /// Write `value` under `key`. On a failed flush the previous value is put back.
    fn set(&mut self, key: &str, value: String) -> HerbalResult<()> {
        let previous = self.entries.insert(key.to_string(), value);
        self.flush().inspect_err(|_| self.restore(key, previous))
    }

    fn remove(&mut self, key: &str) -> HerbalResult<()> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        self.flush().inspect_err(|_| self.restore(key, Some(previous)))
    }
}

impl JsonFileStore {
    fn restore(&mut self, key: &str, previous: Option<String>) {
        match previous {
            Some(value) => self.entries.insert(key.to_string(), value),
            None => self.entries.remove(key),
        };
    }
}

/// Open the store configured in `cfg`: a JSON file if a path is set, memory otherwise.
pub fn open_store(cfg: &CoreConfig) -> HerbalResult<Box<dyn LocalStore>> {
    match cfg.store_path() {
        Some(path) => Ok(Box::new(JsonFileStore::open(path)?)),
        None => Ok(Box::new(MemoryStore::new())),
    }
}

/// Read and decode `key`. Missing or malformed values yield `None`; malformed ones are removed.
pub fn load_json<T: DeserializeOwned>(store: &mut dyn LocalStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::error!(key, error = %err, "failed to read local store");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding malformed local store value");
            if let Err(err) = store.remove(key) {
                tracing::error!(key, error = %err, "failed to remove malformed value");
            }
            None
        }
    }
}

/// Encode `value` as JSON and write it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn LocalStore,
    key: &str,
    value: &T,
) -> HerbalResult<()> {
    let raw = serde_json::to_string(value).map_err(HerbalError::StoreSerialization)?;
    store.set(key, raw)
}

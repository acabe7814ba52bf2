//! Key-value settings store.
//!
//! The tracker keeps its whole state under three keys (`actions`, `markers`,
//! `history`), each holding one JSON value.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::HistoryResult;

/// A get/set store of JSON values.
pub trait SettingsStore {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> HistoryResult<Option<Value>>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: Value) -> HistoryResult<()>;
}

/// Read and deserialize the value under `key`.
pub fn load<T: DeserializeOwned>(
    store: &dyn SettingsStore,
    key: &str,
) -> HistoryResult<Option<T>> {
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and store `value` under `key`.
pub fn save<T: Serialize>(
    store: &mut dyn SettingsStore,
    key: &str,
    value: &T,
) -> HistoryResult<()> {
    store.set(key, serde_json::to_value(value)?)
}

/// A store that lives only in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> HistoryResult<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> HistoryResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// A store backed by a single JSON object on disk.
///
/// The file is rewritten on every `set`. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`, reading it if it exists.
    pub fn open(path: impl AsRef<Path>) -> HistoryResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                Map::new()
            } else {
                serde_json::from_str(&text)?
            }
        } else {
            Map::new()
        };
        Ok(Self { path, values })
    }

    /// The file this store writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> HistoryResult<()> {
        let text = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> HistoryResult<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> HistoryResult<()> {
        let previous = self.values.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

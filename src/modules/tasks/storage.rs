use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::model::TaskCollection;

/// Custom error type for storage operations
#[derive(Debug)]
pub enum StorageError {
    InvalidKey(String),
    InvalidData(String),
    IoError(io::Error),
}

// Implement conversion from io::Error to StorageError
impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::InvalidKey(key) => write!(f, "Invalid storage key: {:?}", key),
            StorageError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

/// Durable key-value slots. A write replaces the whole value stored under `key`.
pub trait Storage {
    /// Returns the last value written under `key`, or `None` if nothing was written yet
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each slot as a JSON file inside one directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(slot_file_name(key)?))
    }
}

/// Map a storage key onto a safe file name. Anything outside `[A-Za-z0-9_-]`
/// becomes `_`, so `@toDos` is kept in `_toDos.json`.
fn slot_file_name(key: &str) -> Result<String, StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey(key.to_string()));
    }

    let name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    Ok(format!("{}.json", name))
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            // Nothing saved yet
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.root)?;

        // Write next to the target and rename over it, so a reader sees either
        // the old or the new value, never a torn one.
        let mut file = NamedTempFile::new_in(&self.root)?;
        file.write_all(value.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|e| StorageError::IoError(e.error))?;

        Ok(())
    }
}

/// In-process slots; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Serialize the whole collection into the map-shaped JSON document
pub fn encode_collection(tasks: &TaskCollection) -> Result<String, StorageError> {
    serde_json::to_string_pretty(tasks).map_err(|e| StorageError::InvalidData(e.to_string()))
}

/// Parse a stored document. A literal `null` counts as an empty collection.
pub fn decode_collection(data: &str) -> Result<TaskCollection, StorageError> {
    let tasks: Option<TaskCollection> =
        serde_json::from_str(data).map_err(|e| StorageError::InvalidData(e.to_string()))?;
    Ok(tasks.unwrap_or_default())
}

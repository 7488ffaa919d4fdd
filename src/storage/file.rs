// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file backed store.

use super::{KeyValueStore, StorageError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key/value store persisted as one JSON object on disk.
///
/// The whole file is loaded at open and rewritten on every mutation
/// (temp file + rename), so a crash never leaves a half-written file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(data) if data.trim().is_empty() => BTreeMap::new(),
            Ok(data) => serde_json::from_str(&data)
                .map_err(|e| StorageError::Corrupt(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError::Read(format!("{}: {}", path.display(), e))),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened storage");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` to the entries and persist the result.
    fn mutate<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if !f(&mut entries) {
            return Ok(());
        }
        self.persist(&entries)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::Write(format!("{}: {}", parent.display(), e)))?;
            }
        }

        let data = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)
            .map_err(|e| StorageError::Write(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| StorageError::Write(format!("{}: {}", self.path.display(), e)))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.mutate(|entries| {
            let previous = entries.insert(key.to_string(), value.to_string());
            previous.as_deref() != Some(value)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.mutate(|entries| entries.remove(key).is_some())
    }
}

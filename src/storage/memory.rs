// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for tests and ephemeral sessions.

use super::{KeyValueStore, StorageError};
use dashmap::DashMap;
use std::sync::Arc;

/// Process-local store. Clones share the same map, so a "reload" can be
/// simulated by building fresh stores over a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let reloaded = store.clone();

        store.set("preferredLanguage", "es").unwrap();
        assert_eq!(
            reloaded.get("preferredLanguage").unwrap().as_deref(),
            Some("es")
        );

        reloaded.remove("preferredLanguage").unwrap();
        assert!(store.is_empty());
    }
}

//! In-process key-value backend, used by tests and by the `in_memory`
//! config option

use super::{KeyValueStore, StorageError};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    /// Number of `set` calls, for asserting write counts
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry
    #[cfg(test)]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    #[cfg(test)]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        log::trace!("memory write #{} to '{}'", self.writes, key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_writes() {
        let mut store = MemoryStore::with_entry("a", "1");
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.set("a", "2").unwrap();
        store.set("b", "3").unwrap();
        assert_eq!(store.writes(), 2);
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    }
}

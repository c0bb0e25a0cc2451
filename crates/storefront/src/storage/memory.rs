//! In-memory key/value store.

use std::collections::HashMap;

use super::{KeyValueStore, StorageError, validate_entry};

/// A [`KeyValueStore`] backed by a `HashMap`.
///
/// Can be switched into an unavailable mode where every `set` and `remove`
/// fails, which is how a full or disabled browser storage behaves, and into
/// an unreadable mode where every `get` fails.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    unavailable: bool,
    unreadable: bool,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty, writable store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(entry: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(entry.to_string(), value.to_string());
        store
    }

    /// Make subsequent writes fail (`true`) or succeed (`false`).
    pub const fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Make subsequent reads fail (`true`) or succeed (`false`).
    pub const fn set_unreadable(&mut self, unreadable: bool) {
        self.unreadable = unreadable;
    }

    /// Number of successful `set` calls so far.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Whether an entry exists.
    #[must_use]
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.contains_key(entry)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, entry: &str) -> Result<Option<String>, StorageError> {
        validate_entry(entry)?;
        if self.unreadable {
            return Err(StorageError::Unavailable("storage blocked".to_string()));
        }
        Ok(self.entries.get(entry).cloned())
    }

    fn set(&mut self, entry: &str, value: &str) -> Result<(), StorageError> {
        validate_entry(entry)?;
        if self.unavailable {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.entries.insert(entry.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, entry: &str) -> Result<(), StorageError> {
        validate_entry(entry)?;
        if self.unavailable {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        self.entries.remove(entry);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "[]").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.writes(), 1);

        store.remove("a").unwrap();
        assert!(!store.contains("a"));
        store.remove("a").unwrap();
    }

    #[test]
    fn test_unavailable_rejects_writes_but_keeps_data() {
        let mut store = MemoryStore::with_entry("a", "[1]");
        store.set_unavailable(true);

        assert!(matches!(
            store.set("a", "[2]"),
            Err(StorageError::Unavailable(_))
        ));
        assert_eq!(store.get("a").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.writes(), 0);
    }
}

//! In-memory store backend, used in tests and as a scratch session store.

use std::collections::HashMap;

use super::error::StoreError;
use super::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap total stored bytes (keys + values) so callers can exercise
    /// quota-exceeded handling.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self { entries: HashMap::new(), quota_bytes: Some(quota_bytes) }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey { key: key.to_string() });
        }

        if let Some(quota) = self.quota_bytes {
            let existing = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let projected = self.used_bytes() - existing + key.len() + value.len();
            if projected > quota {
                return Err(StoreError::QuotaExceeded { key: key.to_string() });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("scorecards").unwrap(), None);

        store.set("scorecards", "[]").unwrap();
        assert_eq!(store.get("scorecards").unwrap().as_deref(), Some("[]"));

        store.remove("scorecards").unwrap();
        assert_eq!(store.get("scorecards").unwrap(), None);
    }

    #[test]
    fn removing_a_missing_key_is_fine() {
        let mut store = MemoryStore::new();
        store.remove("nothing-here").unwrap();
    }

    #[test]
    fn quota_rejects_oversized_writes() {
        let mut store = MemoryStore::with_quota(16);
        store.set("k", "small").unwrap();

        let err = store.set("k2", "a much longer value").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
        assert!(err.is_recoverable());

        // the failed write left existing data intact
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
        assert_eq!(store.get("k2").unwrap(), None);
    }

    #[test]
    fn overwrite_within_quota_is_allowed() {
        let mut store = MemoryStore::with_quota(12);
        store.set("key", "12345678").unwrap();
        store.set("key", "87654321").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("87654321"));
    }
}

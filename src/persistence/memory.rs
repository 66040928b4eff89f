//! In-process storage for exercising the store without touching disk

use super::storage::{KeyValueStorage, StorageError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    denied: bool,
}

/// In-process storage; clones share the same slots
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit total bytes (keys plus values) across all slots
    pub fn with_quota(limit: usize) -> Self {
        let storage = Self::new();
        storage.inner.borrow_mut().quota = Some(limit);
        storage
    }

    /// Make every read and write fail with `AccessDenied`, or recover from that
    pub fn set_denied(&self, denied: bool) {
        self.inner.borrow_mut().denied = denied;
    }

    /// Raw slot content, bypassing failure simulation
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().entries.get(key).cloned()
    }

    /// Write a slot directly, bypassing quota and failure simulation
    pub fn put_raw(&self, key: &str, value: &str) {
        self.inner
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.borrow();
        if inner.denied {
            return Err(StorageError::AccessDenied { key: key.to_string() });
        }
        Ok(inner.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if inner.denied {
            return Err(StorageError::AccessDenied { key: key.to_string() });
        }

        if let Some(limit) = inner.quota {
            let others: usize = inner
                .entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }

        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_clones_share_slots() {
        let mut storage = MemoryStorage::new();
        let observer = storage.clone();

        storage.set_item("todoList", "[]").unwrap();
        assert_eq!(observer.raw("todoList").as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_storage_quota() {
        let mut storage = MemoryStorage::with_quota(12);

        storage.set_item("k", "0123456789").unwrap();
        // Overwriting the same key only counts the new value
        storage.set_item("k", "9876543210").unwrap();

        match storage.set_item("k", "this is far too long") {
            Err(StorageError::QuotaExceeded { needed, limit }) => {
                assert_eq!(limit, 12);
                assert_eq!(needed, 21);
            }
            other => panic!("expected quota error, got {:?}", other),
        }
        assert_eq!(storage.raw("k").as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_memory_storage_denied() {
        let mut storage = MemoryStorage::new();
        storage.put_raw("k", "v");
        storage.set_denied(true);

        assert!(matches!(storage.get_item("k"), Err(StorageError::AccessDenied { .. })));
        assert!(matches!(storage.set_item("k", "w"), Err(StorageError::AccessDenied { .. })));

        storage.set_denied(false);
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }
}

//! In-process key-value store

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::KeyValueStore;
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<String, String>,
    /// Max total bytes (keys + values), like a browser's storage quota
    quota: Option<usize>,
}

impl Inner {
    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

/// In-memory store
///
/// Cloning yields another handle onto the same entries, so a test can keep a
/// handle while a cell owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    /// Create an empty, unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store holding at most `bytes` of keys plus values
    pub fn with_quota(bytes: usize) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().quota = Some(bytes);
        store
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Bytes currently used by keys plus values
    pub fn used_bytes(&self) -> usize {
        self.inner.borrow().used_bytes()
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.borrow().entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();

        if let Some(quota) = inner.quota {
            let replaced = inner.entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = inner.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded { key: key.to_string() });
            }
        }

        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.inner.borrow_mut().entries.remove(key);
        Ok(())
    }
}

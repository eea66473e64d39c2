//! Value cell kept in sync with a key-value store
//!
//! Every successful mutation is a commit:
//! 1. encode the next value
//! 2. write it to the store under the cell's key
//! 3. replace the in-memory value
//! 4. notify subscribers
//!
//! A failure in 1 or 2 returns before 3, so the store and the in-memory
//! value never disagree.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec;
use crate::config::CellConfig;
use crate::error::CellError;
use crate::storage::KeyValueStore;

type Transform<T> = Box<dyn FnOnce(&T) -> T>;
type Listener<T> = Box<dyn Fn(&T)>;

/// Handle returned by [`PersistedCell::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A value persisted under a key
pub struct PersistedCell<T, S> {
    key: String,
    storage_key: String,
    value: T,
    default: T,
    store: S,
    config: CellConfig,
    pending: VecDeque<Transform<T>>,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_subscription: u64,
}

impl<T, S> PersistedCell<T, S>
where
    T: Serialize + DeserializeOwned + Clone,
    S: KeyValueStore,
{
    /// Bind `key` in `store`, starting from the stored value or `default`
    pub fn new(key: impl Into<String>, default: T, store: S) -> Result<Self, CellError> {
        Self::with_config(key, default, store, CellConfig::default())
    }

    /// Like [`new`](Self::new) with explicit options
    ///
    /// The default is not written to the store. A stored entry that doesn't
    /// decode is an error; it never falls back to the default.
    pub fn with_config(
        key: impl Into<String>,
        default: T,
        store: S,
        config: CellConfig,
    ) -> Result<Self, CellError> {
        let key = key.into();
        let storage_key = config.storage_key(&key);

        let stored = store.get_item(&storage_key).map_err(|source| CellError::StoreRead {
            key: storage_key.clone(),
            source,
        })?;

        let value = match stored {
            Some(text) => {
                let value = codec::decode(&text).map_err(|source| CellError::Decode {
                    key: storage_key.clone(),
                    source,
                })?;
                log::info!("Loaded '{}' from storage", storage_key);
                value
            }
            None => {
                log::info!("No stored value for '{}', using default", storage_key);
                default.clone()
            }
        };

        Ok(Self {
            key,
            storage_key,
            value,
            default,
            store,
            config,
            pending: VecDeque::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Remove the stored entry and restore the default
    pub fn reset(&mut self) -> Result<(), CellError> {
        self.store
            .remove_item(&self.storage_key)
            .map_err(|source| CellError::StoreWrite {
                key: self.storage_key.clone(),
                source,
            })?;
        self.value = self.default.clone();
        log::info!("Reset '{}' to default", self.storage_key);
        self.notify();
        Ok(())
    }

    /// Current value (cloned)
    pub fn get(&self) -> T {
        self.value.clone()
    }
}

impl<T, S> PersistedCell<T, S>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Replace the value
    pub fn set(&mut self, value: T) -> Result<(), CellError> {
        self.commit(value)
    }

    /// Replace the value with `f(current)`
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> Result<(), CellError> {
        let next = f(&self.value);
        self.commit(next)
    }

    /// Queue a transform to run on the next [`flush`](Self::flush)
    pub fn enqueue(&mut self, f: impl FnOnce(&T) -> T + 'static) {
        self.pending.push_back(Box::new(f));
    }

    /// Apply queued transforms in call order
    ///
    /// Each transform sees the value committed by the one before it. On
    /// failure the failing transform is dropped, the rest stay queued, and
    /// the error is returned.
    pub fn flush(&mut self) -> Result<(), CellError> {
        while let Some(f) = self.pending.pop_front() {
            let next = f(&self.value);
            self.commit(next)?;
        }
        Ok(())
    }

    fn commit(&mut self, next: T) -> Result<(), CellError> {
        let text = codec::encode(&next, self.config.encoding).map_err(|source| {
            log::warn!("Failed to encode '{}': {}", self.storage_key, source);
            CellError::Encode {
                key: self.storage_key.clone(),
                source,
            }
        })?;

        self.store
            .set_item(&self.storage_key, &text)
            .map_err(|source| {
                log::warn!("Failed to write '{}': {}", self.storage_key, source);
                CellError::StoreWrite {
                    key: self.storage_key.clone(),
                    source,
                }
            })?;

        log::debug!("Wrote '{}' ({} bytes)", self.storage_key, text.len());
        self.value = next;
        self.notify();
        Ok(())
    }
}

impl<T, S> PersistedCell<T, S> {
    /// Current value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Key as given by the caller
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key used in the store (namespace + key)
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &CellConfig {
        &self.config
    }

    /// Number of queued transforms
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Call `listener` with the new value after every commit
    pub fn subscribe(&mut self, listener: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.value);
        }
    }
}

impl<T: fmt::Debug, S> fmt::Debug for PersistedCell<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedCell")
            .field("storage_key", &self.storage_key)
            .field("value", &self.value)
            .field("pending", &self.pending.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

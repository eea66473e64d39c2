//! Synchronous textual key-value stores
//!
//! Backends:
//! - `MemoryStore`: in-process, shared between handles (tests, fallbacks)
//! - `FileStore`: one JSON file per store (native only)
//! - `LocalStorage`: browser `localStorage` / `sessionStorage` (wasm32 only)

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod web;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

use std::rc::Rc;

use crate::error::StoreError;

/// A store mapping string keys to text values
///
/// Methods take `&self`: backends hold their state behind a handle the way
/// `web_sys::Storage` does.
pub trait KeyValueStore {
    /// Text stored under `key`, or `None` if there is no entry
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous entry
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the entry under `key` (no-op if absent)
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

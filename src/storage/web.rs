//! Browser storage (wasm32 only)

use wasm_bindgen::{JsCast, JsValue};

use super::KeyValueStore;
use crate::error::StoreError;

/// `localStorage` or `sessionStorage` of the current window
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// The window's `localStorage`
    pub fn local() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or_else(no_window)?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(js_message(&e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }

    /// The window's `sessionStorage`
    pub fn session() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or_else(no_window)?;
        let storage = window
            .session_storage()
            .map_err(|e| StoreError::Unavailable(js_message(&e)))?
            .ok_or_else(|| StoreError::Unavailable("sessionStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }

    /// Wrap an existing `web_sys::Storage`
    pub fn from_storage(storage: web_sys::Storage) -> Self {
        Self { storage }
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Rejected(js_message(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|e| {
            if js_name(&e).as_deref() == Some("QuotaExceededError") {
                StoreError::QuotaExceeded { key: key.to_string() }
            } else {
                StoreError::Rejected(js_message(&e))
            }
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Rejected(js_message(&e)))
    }
}

fn no_window() -> StoreError {
    StoreError::Unavailable("no global window".to_string())
}

/// Exception name (`DOMException` extends `Error` in every current browser)
fn js_name(err: &JsValue) -> Option<String> {
    err.dyn_ref::<js_sys::Error>().map(|e| String::from(e.name()))
}

fn js_message(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

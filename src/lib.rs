//! Persisted Cell - a value kept in sync with LocalStorage
//!
//! Core modules:
//! - `cell`: `PersistedCell`, the value + store binding
//! - `storage`: Key-value store trait and backends (memory, file, browser)
//! - `codec`: JSON text encoding
//! - `config`: Key namespace and encoding options
//! - `error`: Cell and store errors
//!
//! ```
//! use persisted_cell::{PersistedCell, storage::MemoryStore};
//!
//! let store = MemoryStore::new();
//! let mut count = PersistedCell::new("count", 0, store.clone()).unwrap();
//! count.update(|n| n + 1).unwrap();
//!
//! let reloaded = PersistedCell::new("count", 0, store).unwrap();
//! assert_eq!(*reloaded.value(), 1);
//! ```

pub mod cell;
pub mod codec;
pub mod config;
pub mod error;
pub mod storage;

pub use cell::{PersistedCell, SubscriptionId};
pub use config::{CellConfig, Encoding};
pub use error::{CellError, StoreError};
pub use storage::{KeyValueStore, MemoryStore};

//! Error types for cells and stores

use thiserror::Error;

/// Failure reported by a [`KeyValueStore`](crate::storage::KeyValueStore)
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing store could not be reached (no window, storage disabled, ...)
    #[error("storage is not available: {0}")]
    Unavailable(String),

    /// Write would exceed the store's capacity
    #[error("storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },

    /// Store refused the operation for some other reason
    #[error("storage rejected the operation: {0}")]
    Rejected(String),

    #[error("storage I/O error")]
    Io(#[from] std::io::Error),

    /// Backing file exists but is not a JSON object of strings
    #[error("storage file is corrupt")]
    Corrupt(#[source] serde_json::Error),
}

/// Failure reported by a [`PersistedCell`](crate::PersistedCell)
#[derive(Error, Debug)]
pub enum CellError {
    /// Stored text under `key` does not decode to the cell's value type
    #[error("failed to decode stored value for '{key}'")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be encoded to text
    #[error("failed to encode value for '{key}'")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read '{key}' from storage")]
    StoreRead {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to write '{key}' to storage")]
    StoreWrite {
        key: String,
        #[source]
        source: StoreError,
    },
}

impl CellError {
    /// Storage key the failing operation was working on
    pub fn key(&self) -> &str {
        match self {
            CellError::Decode { key, .. }
            | CellError::Encode { key, .. }
            | CellError::StoreRead { key, .. }
            | CellError::StoreWrite { key, .. } => key,
        }
    }
}

//! Cell configuration
//!
//! Shared by every cell built from it; controls how keys are named in the
//! store and how values are written.

use serde::{Deserialize, Serialize};

/// Text layout used when writing values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Encoding {
    /// Single-line JSON
    #[default]
    Compact,
    /// Indented JSON, easier to inspect in browser devtools
    Pretty,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Compact => "Compact",
            Encoding::Pretty => "Pretty",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Some(Encoding::Compact),
            "pretty" => Some(Encoding::Pretty),
            _ => None,
        }
    }
}

/// Options applied to a [`PersistedCell`](crate::PersistedCell)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CellConfig {
    /// Prefix prepended to every key (e.g. `"myapp_"`)
    pub namespace: String,
    /// Layout of stored JSON
    pub encoding: Encoding,
}

impl CellConfig {
    /// Environment variable holding the key namespace
    pub const NAMESPACE_VAR: &'static str = "PERSISTED_CELL_NAMESPACE";
    /// Environment variable holding the encoding name
    pub const ENCODING_VAR: &'static str = "PERSISTED_CELL_ENCODING";

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Key actually used in the store for a cell key
    pub fn storage_key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    /// Load config from the environment (native only)
    ///
    /// Unset variables keep their defaults; an unknown encoding name is
    /// logged and ignored.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(namespace) = lookup(Self::NAMESPACE_VAR) {
            config.namespace = namespace;
        }

        if let Some(raw) = lookup(Self::ENCODING_VAR) {
            match Encoding::from_str(&raw) {
                Some(encoding) => config.encoding = encoding,
                None => log::warn!(
                    "Unknown encoding '{}', using {}",
                    raw,
                    config.encoding.as_str()
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_prefix() {
        let config = CellConfig::default();
        assert_eq!(config.storage_key("count"), "count");

        let config = config.with_namespace("app_");
        assert_eq!(config.storage_key("count"), "app_count");
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!(Encoding::from_str("Pretty"), Some(Encoding::Pretty));
        assert_eq!(Encoding::from_str(" compact "), Some(Encoding::Compact));
        assert_eq!(Encoding::from_str("yaml"), None);
    }

    #[test]
    fn test_from_lookup() {
        let config = CellConfig::from_lookup(|name| match name {
            CellConfig::NAMESPACE_VAR => Some("demo_".to_string()),
            CellConfig::ENCODING_VAR => Some("pretty".to_string()),
            _ => None,
        });
        assert_eq!(config.namespace, "demo_");
        assert_eq!(config.encoding, Encoding::Pretty);

        // Unknown encoding keeps the default
        let config = CellConfig::from_lookup(|name| {
            (name == CellConfig::ENCODING_VAR).then(|| "xml".to_string())
        });
        assert_eq!(config, CellConfig::default());
    }
}

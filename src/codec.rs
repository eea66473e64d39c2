//! JSON text encoding for stored values

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Encoding;

/// Encode a value to JSON text
pub fn encode<T: Serialize + ?Sized>(
    value: &T,
    encoding: Encoding,
) -> Result<String, serde_json::Error> {
    match encoding {
        Encoding::Compact => serde_json::to_string(value),
        Encoding::Pretty => serde_json::to_string_pretty(value),
    }
}

/// Decode JSON text (compact or pretty)
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(text)
}

//! Request DTOs for the store's HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The key to store the value under
/// - `value`: Any JSON value, `null` included
/// - `ttl_ms`: Optional TTL in milliseconds (uses the configured default if absent)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Request body for the bulk SET operation (PUT /mset)
///
/// Length agreement between `keys` and `values` is checked by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct SetMultiRequest {
    pub keys: Vec<String>,
    pub values: Vec<Value>,
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetMultiRequest {
    /// Validates every key in the batch.
    pub fn validate(&self) -> Option<String> {
        self.keys.iter().find_map(|key| validate_key(key))
    }
}

/// Request body for the bulk GET operation (POST /mget)
#[derive(Debug, Clone, Deserialize)]
pub struct GetMultiRequest {
    pub keys: Vec<String>,
}

/// Request body for POST /extend/:key
///
/// `force` selects the variant that also revives expired entries.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtendRequest {
    pub ttl_ms: u64,
    #[serde(default)]
    pub force: bool,
}

/// Query string for GET /get/:key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetQuery {
    /// Return the value even if its TTL has elapsed
    #[serde(default)]
    pub include_expired: bool,
}

//! Response DTOs for the store's HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::cache::StoreStats;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
///
/// Deleting a missing key is not an error; `removed` tells the caller which case happened.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub key: String,
    pub removed: bool,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>, removed: bool) -> Self {
        Self {
            key: key.into(),
            removed,
        }
    }
}

/// One slot of a bulk GET, aligned with the requested key order
#[derive(Debug, Clone, Serialize)]
pub struct GetMultiItem {
    pub key: String,
    /// False when the key is absent or expired; `value` is then `null`
    pub found: bool,
    pub value: Value,
}

/// Response body for the bulk GET operation (POST /mget)
#[derive(Debug, Clone, Serialize)]
pub struct GetMultiResponse {
    pub items: Vec<GetMultiItem>,
}

impl GetMultiResponse {
    /// Zips the requested keys with the store's position-aligned results
    pub fn new(keys: Vec<String>, values: Vec<Option<Value>>) -> Self {
        let items = keys
            .into_iter()
            .zip(values)
            .map(|(key, value)| GetMultiItem {
                key,
                found: value.is_some(),
                value: value.unwrap_or(Value::Null),
            })
            .collect();
        Self { items }
    }
}

/// Response body for the bulk SET operation (PUT /mset)
#[derive(Debug, Clone, Serialize)]
pub struct SetMultiResponse {
    pub message: String,
    pub count: usize,
}

impl SetMultiResponse {
    /// Creates a new SetMultiResponse
    pub fn new(count: usize) -> Self {
        Self {
            message: format!("{} keys set successfully", count),
            count,
        }
    }
}

/// Response body for POST /extend/:key
#[derive(Debug, Clone, Serialize)]
pub struct ExtendResponse {
    pub key: String,
    /// False when the key is absent, or expired without `force`
    pub extended: bool,
}

/// Response body for GET /meta/:key
#[derive(Debug, Clone, Serialize)]
pub struct MetaResponse {
    pub key: String,
    pub exists: bool,
    pub expired: bool,
    /// Last write or extension time, RFC 3339
    pub timestamp: Option<DateTime<Utc>>,
    /// Milliseconds left before expiry; `null` for absent keys and keys without TTL
    pub ttl_remaining_ms: Option<u64>,
}

/// Response body for POST /cleanup
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResponse {
    /// Number of expired entries removed
    pub removed: usize,
}

/// Response body for POST /purge
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    pub message: String,
}

impl PurgeResponse {
    pub fn new() -> Self {
        Self {
            message: "Store purged".to_string(),
        }
    }
}

impl Default for PurgeResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Current number of entries, expired ones included
    pub total_entries: usize,
    /// Entries waiting for a cleanup sweep
    pub expired_entries: usize,
    /// Entries still readable through GET
    pub live_entries: usize,
    /// expired_entries / total_entries
    pub expired_ratio: f64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            total_entries: stats.total_entries,
            expired_entries: stats.expired_entries,
            live_entries: stats.live_entries(),
            expired_ratio: stats.expired_ratio(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

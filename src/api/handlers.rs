//! API Handlers
//!
//! HTTP request handlers exposing the store's operations.
//!
//! The store locks internally and never blocks on I/O, so handlers call it
//! directly from the async context.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::cache::Store;
use crate::error::{CacheError, Result};
use crate::models::{
    CleanupResponse, DeleteResponse, ExtendRequest, ExtendResponse, GetMultiRequest,
    GetMultiResponse, GetQuery, GetResponse, HealthResponse, MetaResponse, PurgeResponse,
    SetMultiRequest, SetMultiResponse, SetRequest, SetResponse, StatsResponse,
};

/// Store type served over HTTP.
pub type JsonStore = Store<String, Value>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe store
    pub store: Arc<JsonStore>,
    /// TTL used when a write request carries none
    pub default_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState around the given store, with no default TTL.
    pub fn new(store: JsonStore) -> Self {
        Self {
            store: Arc::new(store),
            default_ttl: Duration::ZERO,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            store: Arc::new(Store::new()),
            default_ttl: config.default_ttl(),
        }
    }

    fn ttl_or_default(&self, ttl_ms: Option<u64>) -> Duration {
        ttl_ms.map(Duration::from_millis).unwrap_or(self.default_ttl)
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = state.ttl_or_default(req.ttl_ms);
    state.store.set_ttl(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value by key. With `?include_expired=true` the TTL is ignored.
/// Presence and expiration come from one snapshot of the entry.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<GetQuery>,
) -> Result<Json<GetResponse>> {
    match state.store.inspect(&key) {
        Some(meta) if meta.expired && !query.include_expired => Err(CacheError::Expired(key)),
        Some(meta) => Ok(Json(GetResponse::new(key, meta.value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let removed = state.store.unset(&key);
    Json(DeleteResponse::new(key, removed))
}

/// Handler for POST /mget
///
/// Looks up all keys under one lock acquisition.
pub async fn get_multi_handler(
    State(state): State<AppState>,
    Json(req): Json<GetMultiRequest>,
) -> Json<GetMultiResponse> {
    let values = state.store.get_multi(&req.keys);
    Json(GetMultiResponse::new(req.keys, values))
}

/// Handler for PUT /mset
///
/// Writes every pair with one shared timestamp. Rejects batches whose key
/// and value lists differ in length.
pub async fn set_multi_handler(
    State(state): State<AppState>,
    Json(req): Json<SetMultiRequest>,
) -> Result<Json<SetMultiResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = state.ttl_or_default(req.ttl_ms);
    let count = req.keys.len();
    state.store.set_multi_ttl(req.keys, req.values, ttl)?;

    Ok(Json(SetMultiResponse::new(count)))
}

/// Handler for POST /extend/:key
pub async fn extend_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<ExtendRequest>,
) -> Json<ExtendResponse> {
    let ttl = Duration::from_millis(req.ttl_ms);
    let extended = if req.force {
        state.store.must_extend(&key, ttl)
    } else {
        state.store.extend(&key, ttl)
    };

    Json(ExtendResponse { key, extended })
}

/// Handler for GET /meta/:key
///
/// Reports presence, expiration and timestamp without returning the value.
pub async fn meta_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<MetaResponse> {
    let response = match state.store.inspect(&key) {
        Some(meta) => MetaResponse {
            exists: true,
            expired: meta.expired,
            timestamp: Some(meta.timestamp),
            ttl_remaining_ms: meta
                .ttl_remaining
                .map(|remaining| remaining.as_millis() as u64),
            key,
        },
        None => MetaResponse {
            exists: false,
            expired: false,
            timestamp: None,
            ttl_remaining_ms: None,
            key,
        },
    };
    Json(response)
}

/// Handler for POST /cleanup
///
/// Runs one cleanup sweep. Nothing in the server sweeps on a timer; callers
/// decide when to invoke this.
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<CleanupResponse> {
    let removed = state.store.cleanup();
    if removed > 0 {
        info!("Cleanup: removed {} expired entries", removed);
    }
    Json(CleanupResponse { removed })
}

/// Handler for POST /purge
pub async fn purge_handler(State(state): State<AppState>) -> Json<PurgeResponse> {
    state.store.purge();
    info!("Store purged on request");
    Json(PurgeResponse::new())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.store.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

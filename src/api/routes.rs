//! API Routes
//!
//! Configures the Axum router with all store endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_handler, delete_handler, extend_handler, get_handler, get_multi_handler,
    health_handler, meta_handler, purge_handler, set_handler, set_multi_handler, stats_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a key-value pair
/// - `GET /get/:key` - Retrieve a value by key (`?include_expired=true` ignores TTL)
/// - `DELETE /del/:key` - Delete a key
/// - `POST /mget` - Retrieve several keys at once
/// - `PUT /mset` - Store several pairs at once
/// - `POST /extend/:key` - Reset a key's TTL
/// - `GET /meta/:key` - Presence, expiration and timestamp of a key
/// - `POST /cleanup` - Remove expired entries
/// - `POST /purge` - Remove every entry
/// - `GET /stats` - Entry counts
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/mget", post(get_multi_handler))
        .route("/mset", put(set_multi_handler))
        .route("/extend/:key", post(extend_handler))
        .route("/meta/:key", get(meta_handler))
        .route("/cleanup", post(cleanup_handler))
        .route("/purge", post(purge_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

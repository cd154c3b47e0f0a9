//! Gotcha - A thread-safe in-memory key-value store
//!
//! Provides a generic store with optional per-entry TTL, lazy expiration,
//! bulk operations and caller-driven cleanup, plus a small HTTP front end.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::Store;
pub use config::Config;
pub use error::{CacheError, Result};

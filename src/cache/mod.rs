//! Cache Module
//!
//! Provides the thread-safe in-memory store with lazy TTL expiration.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::{Entry, EntryMeta, Stamp};
pub use stats::StoreStats;
pub use store::Store;

// == Public Constants ==
/// TTL value meaning "never expires"
pub const NO_EXPIRATION: std::time::Duration = std::time::Duration::ZERO;

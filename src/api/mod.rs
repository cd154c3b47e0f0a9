//! API Module
//!
//! HTTP handlers and routing that expose a `Store<String, serde_json::Value>`
//! as a small REST service. See [`create_router`] for the endpoint list.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

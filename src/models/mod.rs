//! Request and Response models for the store's HTTP API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ExtendRequest, GetMultiRequest, GetQuery, SetMultiRequest, SetRequest};
pub use responses::{
    CleanupResponse, DeleteResponse, ExtendResponse, GetMultiItem, GetMultiResponse, GetResponse,
    HealthResponse, MetaResponse, PurgeResponse, SetMultiResponse, SetResponse, StatsResponse,
};

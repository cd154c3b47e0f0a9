//! Configuration Module
//!
//! Handles loading the HTTP front end's configuration from environment variables.
//! The store itself takes no configuration.

use std::env;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in milliseconds applied when a write request carries none (0 = never expire)
    pub default_ttl_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 0, never expire)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            default_ttl_ms: env::var("DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_ttl_ms),
        }
    }

    /// Default TTL as a `Duration`.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            default_ttl_ms: 0,
        }
    }
}

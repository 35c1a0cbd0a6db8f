//! Configuration Module
//!
//! Loads cache TTLs and server settings from environment variables.

use std::env;
use std::time::Duration;

/// Runtime configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in seconds for entries stored without an explicit TTL
    pub default_ttl: u64,
    /// TTL in seconds for nearby searches and place details
    pub places_ttl: u64,
    /// TTL in seconds for autocomplete suggestions
    pub autocomplete_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Generic TTL in seconds (default: 300)
    /// - `PLACES_TTL` - Places lookup TTL in seconds (default: 600)
    /// - `AUTOCOMPLETE_TTL` - Autocomplete TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            places_ttl: env_or("PLACES_TTL", defaults.places_ttl),
            autocomplete_ttl: env_or("AUTOCOMPLETE_TTL", defaults.autocomplete_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    pub fn places_ttl(&self) -> Duration {
        Duration::from_secs(self.places_ttl)
    }

    pub fn autocomplete_ttl(&self) -> Duration {
        Duration::from_secs(self.autocomplete_ttl)
    }
}

/// Parses `name` from the environment, falling back on absence or bad input.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: 300,
            places_ttl: 600,
            autocomplete_ttl: 300,
            server_port: 3000,
        }
    }
}

//! Request DTOs for the lead cache API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::PlaceRecord;

/// Default cap on places returned by the contact filter.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Request body for `PUT /cache`
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// Any JSON value
    pub value: Value,
    /// Optional TTL in milliseconds (uses the default if not specified)
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}

/// Query string for `DELETE /cache`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearQuery {
    /// Only clear keys starting with this prefix
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Request body for `POST /keys`
#[derive(Debug, Clone, Deserialize)]
pub struct DeriveKeyRequest {
    /// Logical operation name
    pub prefix: String,
    /// Parameter name to primitive value; nulls are ignored
    #[serde(default)]
    pub params: Map<String, Value>,
}

/// Request body for `POST /contacts/filter`
#[derive(Debug, Clone, Deserialize)]
pub struct ContactFilterRequest {
    pub places: Vec<PlaceRecord>,
    #[serde(default)]
    pub max_results: Option<usize>,
}

impl ContactFilterRequest {
    pub fn max_results(&self) -> usize {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }
}

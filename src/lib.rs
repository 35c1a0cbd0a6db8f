//! Lead Cache - TTL caching and contact filtering for place lookups
//!
//! Provides a TTL cache with lazy eviction, canonical cache-key derivation,
//! a read-through cache for an external places provider and a best-effort
//! contact-information filter for place records.

pub mod api;
pub mod cache;
pub mod config;
pub mod contact;
pub mod error;
pub mod keys;
pub mod models;
pub mod places;

pub use api::AppState;
pub use cache::{SharedCache, TtlCache};
pub use config::Config;
pub use keys::{derive_key, KeyParams};

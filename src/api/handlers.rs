//! API Handlers
//!
//! HTTP request handlers for each lead cache endpoint.

use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::{shared, SharedCache, TtlCache};
use crate::contact::{filter_with_contact, FilterStats};
use crate::error::{CacheError, Result};
use crate::keys::{derive_key, KeyParams};
use crate::models::{
    ClearQuery, ClearResponse, ContactFilterRequest, ContactFilterResponse, DeleteResponse,
    DeriveKeyRequest, DeriveKeyResponse, ExistsResponse, GetResponse, HealthResponse,
    SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache of arbitrary JSON values
    pub cache: SharedCache<Value>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: TtlCache<Value>) -> Self {
        Self {
            cache: shared(cache),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(TtlCache::new(config.default_ttl()))
    }
}

/// Handler for PUT /cache
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    let ttl = req
        .ttl_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| cache.default_ttl());
    cache.set_with_ttl(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key, ttl.as_millis() as u64)))
}

/// Handler for GET /cache/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a stale hit is evicted
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .cloned()
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;
    let ttl_remaining_ms = cache.ttl_remaining_ms(&key).unwrap_or(0);

    Ok(Json(GetResponse::new(key, value, ttl_remaining_ms)))
}

/// Handler for GET /cache/:key/exists
pub async fn exists_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ExistsResponse> {
    let exists = state.cache.write().await.has(&key);
    Json(ExistsResponse { key, exists })
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let existed = state.cache.write().await.delete(&key);
    Json(DeleteResponse::new(key, existed))
}

/// Handler for DELETE /cache
///
/// Clears everything, or only keys under `?prefix=`.
pub async fn clear_handler(
    State(state): State<AppState>,
    Query(query): Query<ClearQuery>,
) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    let removed = match query.prefix.as_deref() {
        Some(prefix) => cache.clear_prefix(prefix),
        None => {
            let removed = cache.len();
            cache.clear();
            removed
        }
    };

    Json(ClearResponse {
        removed,
        prefix: query.prefix,
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.write().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for POST /keys
///
/// Any prefix is accepted, the empty one included.
pub async fn derive_key_handler(Json(req): Json<DeriveKeyRequest>) -> Json<DeriveKeyResponse> {
    let params = KeyParams::from_json_object(&req.params);
    Json(DeriveKeyResponse {
        key: derive_key(&req.prefix, &params),
    })
}

/// Handler for POST /contacts/filter
pub async fn contact_filter_handler(
    Json(req): Json<ContactFilterRequest>,
) -> Json<ContactFilterResponse> {
    let max_results = req.max_results();
    let stats = FilterStats::from_places(&req.places);
    let places = filter_with_contact(req.places, max_results);

    Json(ContactFilterResponse { places, stats })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

//! Cached places lookups
//!
//! Wraps a `PlacesProvider` so repeated searches within the TTL never reach
//! the provider. Detail lookups cache "not found" as well, which stops
//! repeated calls for ids the provider does not know.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::cache::{fetch, shared, CacheStats, SharedCache, TtlCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::keys::{derive_key, KeyParams};
use crate::models::{LatLng, PlaceRecord, Prediction};
use crate::places::{
    PlacesProvider, AUTOCOMPLETE_PREFIX, DEFAULT_SEARCH_RADIUS, DETAILS_PREFIX, NEARBY_PREFIX,
};

/// What a places cache slot holds. The key family decides the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacesPayload {
    Nearby(Vec<PlaceRecord>),
    Details(Option<PlaceRecord>),
    Autocomplete(Vec<Prediction>),
}

/// Cache stats plus per-family key counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacesCacheStats {
    #[serde(flatten)]
    pub cache: CacheStats,
    pub places_keys: usize,
    pub nearby_keys: usize,
    pub details_keys: usize,
    pub autocomplete_keys: usize,
}

// == Key Builders ==
pub fn nearby_key(location: LatLng, radius: u32, kind: Option<&str>) -> String {
    let params = KeyParams::new()
        .with("lat", location.lat)
        .with("lng", location.lng)
        .with("radius", radius)
        .with("type", kind.unwrap_or("all"));
    derive_key(NEARBY_PREFIX, &params)
}

pub fn details_key(place_id: &str) -> String {
    derive_key(DETAILS_PREFIX, &KeyParams::new().with("placeId", place_id))
}

/// Location parameters are left out entirely when no location is given.
pub fn autocomplete_key(input: &str, location: Option<LatLng>) -> String {
    let params = KeyParams::new()
        .with("input", input)
        .with_opt("lat", location.map(|l| l.lat))
        .with_opt("lng", location.map(|l| l.lng));
    derive_key(AUTOCOMPLETE_PREFIX, &params)
}

fn family(prefix: &str) -> String {
    format!("{}:", prefix)
}

fn unexpected_payload(key: &str) -> CacheError {
    CacheError::Internal(format!("unexpected payload cached under '{}'", key))
}

// == Cached Places ==
pub struct CachedPlaces<P> {
    provider: P,
    cache: SharedCache<PlacesPayload>,
    places_ttl: Duration,
    autocomplete_ttl: Duration,
}

impl<P: PlacesProvider> CachedPlaces<P> {
    /// Uses the given cache with the default places TTLs.
    pub fn new(provider: P, cache: SharedCache<PlacesPayload>) -> Self {
        Self::with_ttls(provider, cache, &Config::default())
    }

    /// Uses the given cache with the TTLs from `config`.
    pub fn with_ttls(provider: P, cache: SharedCache<PlacesPayload>, config: &Config) -> Self {
        Self {
            provider,
            cache,
            places_ttl: config.places_ttl(),
            autocomplete_ttl: config.autocomplete_ttl(),
        }
    }

    /// Creates its own cache sized by `config`.
    pub fn from_config(provider: P, config: &Config) -> Self {
        let cache = shared(TtlCache::new(config.default_ttl()));
        Self::with_ttls(provider, cache, config)
    }

    /// Handle to the underlying cache.
    pub fn cache(&self) -> &SharedCache<PlacesPayload> {
        &self.cache
    }

    /// Nearby search, read through the cache.
    pub async fn nearby(
        &self,
        location: LatLng,
        radius: Option<u32>,
        kind: Option<&str>,
    ) -> Result<Vec<PlaceRecord>> {
        let radius = radius.unwrap_or(DEFAULT_SEARCH_RADIUS);
        let key = nearby_key(location, radius, kind);
        let provider = &self.provider;

        let payload = fetch::get_or_fetch(&self.cache, &key, self.places_ttl, move || async move {
            provider
                .nearby_search(location, radius, kind)
                .await
                .map(PlacesPayload::Nearby)
        })
        .await?;

        match payload {
            PlacesPayload::Nearby(places) => Ok(places),
            _ => Err(unexpected_payload(&key)),
        }
    }

    /// Place details, read through the cache. `None` results are cached too.
    pub async fn details(&self, place_id: &str) -> Result<Option<PlaceRecord>> {
        let key = details_key(place_id);
        let provider = &self.provider;

        let payload = fetch::get_or_fetch(&self.cache, &key, self.places_ttl, move || async move {
            provider
                .place_details(place_id)
                .await
                .map(PlacesPayload::Details)
        })
        .await?;

        match payload {
            PlacesPayload::Details(place) => Ok(place),
            _ => Err(unexpected_payload(&key)),
        }
    }

    /// Autocomplete suggestions, read through the cache.
    pub async fn autocomplete(
        &self,
        input: &str,
        location: Option<LatLng>,
    ) -> Result<Vec<Prediction>> {
        let key = autocomplete_key(input, location);
        let provider = &self.provider;

        let payload =
            fetch::get_or_fetch(&self.cache, &key, self.autocomplete_ttl, move || async move {
                provider
                    .autocomplete(input, location)
                    .await
                    .map(PlacesPayload::Autocomplete)
            })
            .await?;

        match payload {
            PlacesPayload::Autocomplete(predictions) => Ok(predictions),
            _ => Err(unexpected_payload(&key)),
        }
    }

    /// Drops every places entry and leaves other keys alone.
    ///
    /// Returns the number of entries removed.
    pub async fn clear(&self) -> usize {
        let mut cache = self.cache.write().await;
        let removed: usize = [NEARBY_PREFIX, DETAILS_PREFIX, AUTOCOMPLETE_PREFIX]
            .iter()
            .map(|prefix| cache.clear_prefix(&family(prefix)))
            .sum();
        info!(removed, "places cache cleared");
        removed
    }

    /// Reconciles the cache and counts what is left per key family.
    pub async fn stats(&self) -> PlacesCacheStats {
        let mut cache = self.cache.write().await;
        let stats = cache.stats();
        let nearby_keys = cache.count_prefix(&family(NEARBY_PREFIX));
        let details_keys = cache.count_prefix(&family(DETAILS_PREFIX));
        let autocomplete_keys = cache.count_prefix(&family(AUTOCOMPLETE_PREFIX));

        PlacesCacheStats {
            cache: stats,
            places_keys: nearby_keys + details_keys + autocomplete_keys,
            nearby_keys,
            details_keys,
            autocomplete_keys,
        }
    }
}

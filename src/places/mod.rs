//! Places Module
//!
//! Read-through cache in front of an external places provider.
//!
//! Three key families share one cache:
//! - `nearby_places` - nearby searches (10 minutes)
//! - `place_details` - detail lookups, including "not found" (10 minutes)
//! - `autocomplete` - suggestions (5 minutes)

mod cached;
mod provider;

pub use cached::{
    autocomplete_key, details_key, nearby_key, CachedPlaces, PlacesCacheStats, PlacesPayload,
};
pub use provider::PlacesProvider;

/// Key prefix for nearby searches
pub const NEARBY_PREFIX: &str = "nearby_places";

/// Key prefix for place details
pub const DETAILS_PREFIX: &str = "place_details";

/// Key prefix for autocomplete suggestions
pub const AUTOCOMPLETE_PREFIX: &str = "autocomplete";

/// Search radius in metres when the caller gives none
pub const DEFAULT_SEARCH_RADIUS: u32 = 5_000;

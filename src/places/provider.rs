//! Places provider seam
//!
//! The mapping/places service lives outside this crate. Callers plug in their
//! client by implementing `PlacesProvider`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{LatLng, PlaceRecord, Prediction};

#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Places within `radius` metres of `location`, optionally of one type.
    async fn nearby_search(
        &self,
        location: LatLng,
        radius: u32,
        kind: Option<&str>,
    ) -> Result<Vec<PlaceRecord>>;

    /// Full record for `place_id`, `Ok(None)` when the provider has no such place.
    async fn place_details(&self, place_id: &str) -> Result<Option<PlaceRecord>>;

    /// Suggestions for partial input, biased towards `location` when given.
    async fn autocomplete(&self, input: &str, location: Option<LatLng>) -> Result<Vec<Prediction>>;
}

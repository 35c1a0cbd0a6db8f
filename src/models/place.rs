//! Place records returned by the external places provider.
//!
//! Field names follow the provider's JSON so records can be passed through
//! the HTTP API unchanged.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// A user review attached to a place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A business or location from the places provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Opaque provider identifier
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub geometry: Geometry,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub international_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<PlaceReview>,
}

impl PlaceRecord {
    /// Minimal record, mostly useful for tests and fixtures.
    pub fn new(place_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Formatted phone number, falling back to the international one.
    pub fn best_phone(&self) -> Option<&str> {
        self.formatted_phone_number
            .as_deref()
            .or(self.international_phone_number.as_deref())
    }
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub description: String,
    pub place_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_payload() {
        let json = r#"{
            "place_id": "abc",
            "name": "Cafe Central",
            "formatted_address": "Rua A, 1",
            "geometry": {"location": {"lat": -23.55, "lng": -46.63}},
            "types": ["cafe", "establishment"],
            "rating": 4.5,
            "international_phone_number": "+55 11 5555-0000",
            "reviews": [{"author_name": "Ana", "text": "great"}]
        }"#;
        let place: PlaceRecord = serde_json::from_str(json).unwrap();

        assert_eq!(place.geometry.location, LatLng::new(-23.55, -46.63));
        assert_eq!(place.best_phone(), Some("+55 11 5555-0000"));
        assert_eq!(place.reviews.len(), 1);
        assert!(place.website.is_none());
    }

    #[test]
    fn test_minimal_payload() {
        let place: PlaceRecord =
            serde_json::from_str(r#"{"place_id": "x", "name": "Shop"}"#).unwrap();
        assert_eq!(place, PlaceRecord::new("x", "Shop"));
    }

    #[test]
    fn test_best_phone_prefers_formatted() {
        let place = PlaceRecord {
            formatted_phone_number: Some("(11) 5555-0000".to_string()),
            international_phone_number: Some("+55 11 5555-0000".to_string()),
            ..PlaceRecord::new("x", "Shop")
        };
        assert_eq!(place.best_phone(), Some("(11) 5555-0000"));
    }
}

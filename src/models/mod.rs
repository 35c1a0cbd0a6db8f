//! Request, response and domain models
//!
//! DTOs used for serializing/deserializing HTTP bodies, plus the place
//! records shared by the contact filter and the places cache.

pub mod place;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use place::{Geometry, LatLng, PlaceRecord, PlaceReview, Prediction};
pub use requests::{ClearQuery, ContactFilterRequest, DeriveKeyRequest, SetRequest};
pub use responses::{
    ClearResponse, ContactFilterResponse, DeleteResponse, DeriveKeyResponse, ErrorResponse,
    ExistsResponse, GetResponse, HealthResponse, SetResponse, StatsResponse,
};

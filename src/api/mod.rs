//! API Module
//!
//! HTTP handlers and routing for the lead cache REST API.
//!
//! # Endpoints
//! - `PUT /cache` / `DELETE /cache` - Store a value / clear
//! - `GET /cache/:key` / `DELETE /cache/:key` - Read / delete one key
//! - `GET /cache/:key/exists` - Freshness check
//! - `GET /stats` - Cache statistics
//! - `POST /keys` - Key derivation
//! - `POST /contacts/filter` - Contact filter
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

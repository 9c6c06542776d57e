//! API Module
//!
//! HTTP handlers and routing for the word shuffle REST API.
//!
//! # Endpoints
//! - `/` - Service description and version
//! - `/metrics` - Counter exposition for scraping
//! - `GET /read` - Random word tagged with a unique ID
//! - `POST /create` - Not implemented
//! - `PUT /update` - Not implemented
//! - `DELETE /delete` - Not implemented

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

//! API layer for the Artifacts domain
//!
//! Static retrieval of stored artifacts; there are no write endpoints.

pub mod routes;

pub use routes::routes;

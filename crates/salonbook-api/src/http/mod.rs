//! HTTP/REST API layer for salonbook.
//!
//! Axum-based REST API at `/api/v1/` with header-based identity, JSON error
//! bodies, and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;

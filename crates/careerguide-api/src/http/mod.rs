//! HTTP/REST API layer for CareerGuide.
//!
//! Axum-based REST API at `/api/v1/` with identity token authentication,
//! envelope response format for session routes, and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;

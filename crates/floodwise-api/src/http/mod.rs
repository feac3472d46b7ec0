//! HTTP/REST API layer for Floodwise.
//!
//! Axum-based REST API at `/api/v1/` with envelope response format and CORS
//! support. Each wizard session is addressed by its UUID.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;

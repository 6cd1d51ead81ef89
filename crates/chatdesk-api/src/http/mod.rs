//! HTTP/REST API layer for Chatdesk.
//!
//! Axum-based JSON API with bearer identity, a plain error body, and a CORS
//! layer restricted to the configured frontend origin.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;

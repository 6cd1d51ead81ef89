//! Shared domain types for Chatdesk.
//!
//! This crate contains the core domain types used across the Chatdesk service:
//! owner identities, conversation turns, transcript views, configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod identity;

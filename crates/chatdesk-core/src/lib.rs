//! Business logic and port definitions for Chatdesk.
//!
//! This crate owns the in-memory conversation store, the bearer identity
//! mechanism, and the message-send protocol. The external dialogue engine is
//! reached only through the [`relay::DialogueRelay`] trait, which the
//! infrastructure layer implements. It depends only on `chatdesk-types` --
//! never on `chatdesk-infra` or any HTTP crate.

pub mod chat;
pub mod identity;
pub mod relay;
pub mod session;

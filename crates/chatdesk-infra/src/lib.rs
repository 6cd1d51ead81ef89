//! Infrastructure implementations for Chatdesk.
//!
//! - [`rasa::RasaRelay`]: the HTTP client for the external dialogue engine,
//!   implementing `chatdesk_core::relay::DialogueRelay`.
//! - [`config`]: `config.toml` loading.

pub mod config;
pub mod rasa;

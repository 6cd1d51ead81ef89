//! Rasa REST webhook client.

pub mod client;
pub mod types;

pub use client::RasaRelay;

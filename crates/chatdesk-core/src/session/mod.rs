//! Request-level protocol: identity checks, transcript mutation, and the
//! relay round trip.

pub mod orchestrator;

pub use orchestrator::{DEFAULT_RELAY_DEADLINE, SessionOrchestrator};

//! Boundary to the external dialogue engine.
//!
//! [`DialogueRelay`] is the port the infrastructure layer implements (see
//! `chatdesk_infra::rasa::RasaRelay`). [`BoxDialogueRelay`] erases the
//! concrete type so the relay can be chosen at runtime.

pub mod box_relay;

pub use box_relay::BoxDialogueRelay;

use std::time::Duration;

use uuid::Uuid;

use chatdesk_types::chat::Turn;
use chatdesk_types::error::RelayError;

/// Sends one utterance to the dialogue engine and returns its replies.
///
/// Contract for implementations:
/// - exactly one outbound request per call, carrying the conversation id as
///   sender and the utterance as message;
/// - reply items with absent or empty text are dropped, every other item
///   becomes one [`TurnRole::Agent`](chatdesk_types::chat::TurnRole::Agent)
///   turn stamped with the local clock, in the order received;
/// - any non-success response, transport failure, or missed `deadline` is a
///   single [`RelayError`] and no turns are returned;
/// - no retries.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait DialogueRelay: Send + Sync {
    fn send(
        &self,
        conversation_id: Uuid,
        utterance: &str,
        deadline: Duration,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, RelayError>> + Send;
}

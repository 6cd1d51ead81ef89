//! BoxDialogueRelay -- object-safe dynamic dispatch wrapper for DialogueRelay.
//!
//! Same blanket-impl pattern as the other boxed ports:
//! 1. Define an object-safe `DialogueRelayDyn` trait with boxed futures
//! 2. Blanket-impl `DialogueRelayDyn` for all `T: DialogueRelay`
//! 3. `BoxDialogueRelay` wraps `Box<dyn DialogueRelayDyn>` and delegates

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use uuid::Uuid;

use chatdesk_types::chat::Turn;
use chatdesk_types::error::RelayError;

use super::DialogueRelay;

/// Object-safe version of [`DialogueRelay`] with boxed futures.
pub trait DialogueRelayDyn: Send + Sync {
    fn send_boxed<'a>(
        &'a self,
        conversation_id: Uuid,
        utterance: &'a str,
        deadline: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Turn>, RelayError>> + Send + 'a>>;
}

impl<T: DialogueRelay> DialogueRelayDyn for T {
    fn send_boxed<'a>(
        &'a self,
        conversation_id: Uuid,
        utterance: &'a str,
        deadline: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Turn>, RelayError>> + Send + 'a>> {
        Box::pin(self.send(conversation_id, utterance, deadline))
    }
}

/// Type-erased dialogue relay.
///
/// Lets the HTTP layer hold one concrete state type whether it is wired to
/// the real engine or to a stub.
pub struct BoxDialogueRelay {
    inner: Box<dyn DialogueRelayDyn>,
}

impl BoxDialogueRelay {
    pub fn new<T: DialogueRelay + 'static>(relay: T) -> Self {
        Self {
            inner: Box::new(relay),
        }
    }
}

impl DialogueRelay for BoxDialogueRelay {
    async fn send(
        &self,
        conversation_id: Uuid,
        utterance: &str,
        deadline: Duration,
    ) -> Result<Vec<Turn>, RelayError> {
        self.inner
            .send_boxed(conversation_id, utterance, deadline)
            .await
    }
}

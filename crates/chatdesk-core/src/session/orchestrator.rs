//! SessionOrchestrator -- the message-send protocol.
//!
//! Preconditions are checked in order and short-circuit: resolvable
//! identity, non-blank utterance, owned conversation. Once they pass, the
//! human turn is appended before the relay is called and is never rolled
//! back. A relay failure becomes a single system turn; it is not a request
//! failure.
//!
//! The relay call and the reconciling append run on their own task, so a
//! caller that goes away mid-send (client disconnect, dropped future) does
//! not leave the transcript ending in an unanswered human turn.

use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, debug, info, warn};
use uuid::Uuid;

use chatdesk_types::chat::{ConversationDetail, ConversationSummary, Turn, TurnRole};
use chatdesk_types::error::{RelayError, SessionError};
use chatdesk_types::identity::{LoginGrant, OwnerId};

use crate::chat::conversation::Conversation;
use crate::chat::store::ConversationStore;
use crate::identity::IdentityService;
use crate::relay::DialogueRelay;

/// Deadline for one relay call unless configured otherwise.
pub const DEFAULT_RELAY_DEADLINE: Duration = Duration::from_secs(10);

/// Prefix of the system notice written when the relay fails.
const RELAY_FAILURE_NOTICE: &str = "The assistant could not be reached";

/// Orchestrates identity, store, and relay for every request.
///
/// Generic over `DialogueRelay`; the API layer pins it to
/// [`BoxDialogueRelay`](crate::relay::BoxDialogueRelay).
pub struct SessionOrchestrator<R: DialogueRelay> {
    store: Arc<ConversationStore>,
    identity: IdentityService,
    relay: Arc<R>,
    relay_deadline: Duration,
}

impl<R: DialogueRelay + 'static> SessionOrchestrator<R> {
    pub fn new(store: Arc<ConversationStore>, identity: IdentityService, relay: R) -> Self {
        Self {
            store,
            identity,
            relay: Arc::new(relay),
            relay_deadline: DEFAULT_RELAY_DEADLINE,
        }
    }

    /// Override the relay deadline.
    pub fn with_relay_deadline(mut self, deadline: Duration) -> Self {
        self.relay_deadline = deadline;
        self
    }

    // --- Identity ---

    /// Exchange a username for a bearer token. The password is not checked.
    pub fn login(
        &self,
        username: &str,
        _password: Option<&str>,
    ) -> Result<LoginGrant, SessionError> {
        let display_name = username.trim();
        if display_name.is_empty() {
            return Err(SessionError::InvalidInput(
                "username must not be empty".to_string(),
            ));
        }

        let token = self
            .identity
            .issue_token(display_name)
            .map_err(|e| SessionError::InvalidInput(e.to_string()))?;

        info!(owner = %OwnerId::new(display_name), "Token issued");
        Ok(LoginGrant {
            token,
            display_name: display_name.to_string(),
        })
    }

    /// Resolve an optional bearer token to its owner.
    pub fn authenticate(&self, token: Option<&str>) -> Result<OwnerId, SessionError> {
        let token = token.ok_or(SessionError::Unauthenticated)?;
        self.identity.resolve_owner(token).map_err(|e| {
            debug!(error = %e, "Bearer token rejected");
            SessionError::Unauthenticated
        })
    }

    // --- Conversations ---

    pub fn create_conversation(
        &self,
        owner: &OwnerId,
        title: Option<&str>,
    ) -> ConversationDetail {
        self.store.create(owner, title).snapshot()
    }

    pub fn list_conversations(&self, owner: &OwnerId) -> Vec<ConversationSummary> {
        self.store.list(owner)
    }

    pub fn get_conversation(
        &self,
        owner: &OwnerId,
        conversation_id: Uuid,
    ) -> Result<ConversationDetail, SessionError> {
        Ok(self.store.get(owner, conversation_id)?.snapshot())
    }

    // --- Message send ---

    /// Run the full send protocol and return the resulting transcript.
    ///
    /// Returns `Ok` whatever the relay outcome; only the three precondition
    /// failures are errors, and none of them mutates the transcript.
    #[tracing::instrument(
        name = "send_message",
        skip(self, token, utterance),
        fields(conversation_id = %conversation_id)
    )]
    pub async fn send_message(
        &self,
        token: Option<&str>,
        conversation_id: Uuid,
        utterance: &str,
    ) -> Result<ConversationDetail, SessionError> {
        let owner = self.authenticate(token)?;

        let text = utterance.trim();
        if text.is_empty() {
            return Err(SessionError::InvalidInput(
                "message must not be empty".to_string(),
            ));
        }

        let conversation = self.store.get(&owner, conversation_id)?;
        conversation.record(TurnRole::Human, text);

        let relay = Arc::clone(&self.relay);
        let deadline = self.relay_deadline;
        let text = text.to_string();
        let task = tokio::spawn({
            let conversation = Arc::clone(&conversation);
            async move {
                relay_and_record(relay.as_ref(), &conversation, &owner, &text, deadline).await;
            }
            .instrument(tracing::Span::current())
        });

        if let Err(e) = task.await {
            warn!(error = %e, "Relay task failed, recording notice");
            conversation.record(
                TurnRole::System,
                format!("{RELAY_FAILURE_NOTICE}: the relay task was canceled"),
            );
        }

        Ok(conversation.snapshot())
    }
}

/// Call the relay and append its outcome: the replies on success, one system
/// notice on failure.
async fn relay_and_record<R: DialogueRelay>(
    relay: &R,
    conversation: &Conversation,
    owner: &OwnerId,
    text: &str,
    deadline: Duration,
) {
    match relay_with_deadline(relay, conversation.id(), text, deadline).await {
        Ok(replies) => {
            info!(owner = %owner, replies = replies.len(), "Relay succeeded");
            conversation.append_turns(replies);
        }
        Err(e) => {
            warn!(owner = %owner, error = %e, "Relay failed, recording notice");
            conversation.record(TurnRole::System, format!("{RELAY_FAILURE_NOTICE}: {e}"));
        }
    }
}

/// Call the relay, treating an overrun of the deadline as a failure even if
/// the implementation ignores it.
async fn relay_with_deadline<R: DialogueRelay>(
    relay: &R,
    conversation_id: Uuid,
    text: &str,
    deadline: Duration,
) -> Result<Vec<Turn>, RelayError> {
    match tokio::time::timeout(deadline, relay.send(conversation_id, text, deadline)).await {
        Ok(result) => result,
        Err(_) => Err(RelayError::Timeout(deadline)),
    }
}

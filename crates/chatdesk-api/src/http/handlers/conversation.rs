//! Conversation HTTP handlers.
//!
//! Endpoints:
//! - GET  /conversations                - List the caller's conversations
//! - POST /conversations                - Create a conversation
//! - GET  /conversations/{id}           - Get a conversation with its turns
//! - POST /conversations/{id}/messages  - Send a message and relay it

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use chatdesk_types::chat::{ConversationDetail, ConversationSummary};
use chatdesk_types::error::SessionError;

use crate::http::error::AppError;
use crate::http::extractors::auth::{BearerToken, Caller};
use crate::http::handlers::parse_body;
use crate::state::AppState;

/// Request body for conversation creation.
#[derive(Debug, Default, Deserialize)]
pub struct CreateConversationRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Request body for sending a message.
#[derive(Debug, Default, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
}

/// Parse a path id. Ids that are not UUIDs cannot name a conversation, so
/// they are reported as not found rather than as bad input.
fn parse_conversation_id(s: &str) -> Result<Uuid, SessionError> {
    s.parse::<Uuid>().map_err(|_| SessionError::NotFound)
}

/// GET /conversations - Summaries, most recently active first.
pub async fn list_conversations(
    State(state): State<AppState>,
    Caller(owner): Caller,
) -> Json<Vec<ConversationSummary>> {
    Json(state.orchestrator.list_conversations(&owner))
}

/// POST /conversations - Create an empty conversation.
pub async fn create_conversation(
    State(state): State<AppState>,
    Caller(owner): Caller,
    body: Bytes,
) -> Result<Json<ConversationDetail>, AppError> {
    let req: CreateConversationRequest = parse_body(&body)
        .map_err(|e| SessionError::InvalidInput(format!("invalid request body: {e}")))?;

    Ok(Json(
        state
            .orchestrator
            .create_conversation(&owner, req.title.as_deref()),
    ))
}

/// GET /conversations/{id} - Full detail including turns.
pub async fn get_conversation(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
) -> Result<Json<ConversationDetail>, AppError> {
    let id = parse_conversation_id(&id)?;
    Ok(Json(state.orchestrator.get_conversation(&owner, id)?))
}

/// POST /conversations/{id}/messages - Run the send protocol.
///
/// Identity, message, and ownership are checked in that order by the
/// orchestrator, so the raw token and an unparsed body are handed through.
pub async fn send_message(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ConversationDetail>, AppError> {
    // The nil UUID never names a conversation, so an unparsable id still
    // falls through to not-found after the identity and message checks.
    let id = parse_conversation_id(&id).unwrap_or(Uuid::nil());
    let req: SendMessageRequest = parse_body(&body).unwrap_or_default();

    let detail = state
        .orchestrator
        .send_message(token.as_deref(), id, &req.message)
        .await?;
    Ok(Json(detail))
}

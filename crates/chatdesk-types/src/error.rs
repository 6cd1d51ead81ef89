use std::time::Duration;

use thiserror::Error;

/// Errors from resolving a bearer token to a subject.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("subject must not be empty")]
    EmptySubject,

    #[error("malformed token: {0}")]
    Malformed(String),
}

/// Errors related to conversation lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversationError {
    /// Absent, or owned by someone else. The two are deliberately merged.
    #[error("conversation not found")]
    NotFound,
}

/// Failure of a single call to the external dialogue engine.
///
/// All variants are all-or-nothing: no partial reply list accompanies them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("dialogue engine returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("dialogue engine unreachable: {0}")]
    Unreachable(String),

    #[error("dialogue engine timed out after {0:?}")]
    Timeout(Duration),

    #[error("dialogue engine sent an unreadable reply: {0}")]
    Malformed(String),
}

/// Request-level failures of the message-send protocol.
///
/// Relay failures never appear here; they are folded into the transcript.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unauthenticated")]
    Unauthenticated,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("conversation not found")]
    NotFound,
}

impl From<ConversationError> for SessionError {
    fn from(e: ConversationError) -> Self {
        match e {
            ConversationError::NotFound => SessionError::NotFound,
        }
    }
}

impl From<IdentityError> for SessionError {
    fn from(_: IdentityError) -> Self {
        SessionError::Unauthenticated
    }
}

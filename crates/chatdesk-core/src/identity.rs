//! Unsigned bearer identity.
//!
//! Tokens are JWT-shaped (`header.payload.`) but carry no signature and no
//! expiry check: anyone who can read a token can forge an equivalent one.
//! This is intentionally insecure. The token scopes conversations to a
//! caller; it is not a security boundary.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chatdesk_types::error::IdentityError;
use chatdesk_types::identity::OwnerId;

/// Fixed header segment. `alg: none` advertises the missing signature.
const TOKEN_HEADER: &str = r#"{"alg":"none","typ":"JWT"}"#;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    iat: Option<i64>,
}

/// Issues and parses self-asserted subject tokens.
#[derive(Debug, Clone, Default)]
pub struct IdentityService;

impl IdentityService {
    pub fn new() -> Self {
        Self
    }

    /// Issue a token for `subject`, stamped with the current time.
    pub fn issue_token(&self, subject: &str) -> Result<String, IdentityError> {
        self.issue_token_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as of `issued_at`.
    ///
    /// Deterministic: the same subject and instant always yield the same
    /// token. The subject is stored verbatim so that
    /// [`resolve_subject`](Self::resolve_subject) returns it unchanged.
    pub fn issue_token_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, IdentityError> {
        if subject.is_empty() {
            return Err(IdentityError::EmptySubject);
        }

        let claims = Claims {
            sub: Some(subject.to_string()),
            iat: Some(issued_at.timestamp()),
        };
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| IdentityError::Malformed(format!("encode claims: {e}")))?;

        Ok(format!(
            "{}.{}.",
            URL_SAFE_NO_PAD.encode(TOKEN_HEADER),
            URL_SAFE_NO_PAD.encode(payload)
        ))
    }

    /// Parse a token back into the subject it was issued for.
    pub fn resolve_subject(&self, token: &str) -> Result<String, IdentityError> {
        let segments: Vec<&str> = token.trim().split('.').collect();
        if segments.len() < 2 {
            return Err(IdentityError::Malformed(
                "expected at least two segments".to_string(),
            ));
        }

        let payload = URL_SAFE_NO_PAD
            .decode(segments[1].trim_end_matches('='))
            .map_err(|e| IdentityError::Malformed(format!("payload is not base64: {e}")))?;

        let claims: Claims = serde_json::from_slice(&payload)
            .map_err(|e| IdentityError::Malformed(format!("payload is not JSON: {e}")))?;

        match claims.sub {
            Some(sub) if !sub.is_empty() => Ok(sub),
            _ => Err(IdentityError::Malformed("missing subject".to_string())),
        }
    }

    /// Resolve a token straight to the owner partition key.
    pub fn resolve_owner(&self, token: &str) -> Result<OwnerId, IdentityError> {
        self.resolve_subject(token).map(|sub| OwnerId::new(&sub))
    }
}

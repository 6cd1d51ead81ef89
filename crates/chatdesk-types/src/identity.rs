//! Owner identity used to partition conversations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Case-insensitive owner identity.
///
/// Not an entity of its own: it is only the partition key under which
/// conversations are created, listed, and fetched. Two identities are equal
/// iff their subjects are equal ignoring case, so the value is lower-cased
/// at construction. Whitespace is significant; callers that accept user
/// input (login) trim before a subject ever reaches a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Build an owner identity from a subject string.
    pub fn new(subject: &str) -> Self {
        Self(subject.to_lowercase())
    }

    /// The normalized key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(subject: &str) -> Self {
        Self::new(subject)
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginGrant {
    pub token: String,
    pub display_name: String,
}

//! Wire types for the Rasa REST channel.

use serde::{Deserialize, Serialize};

/// Outbound body: exactly `{sender, message}`.
#[derive(Debug, Serialize)]
pub struct RasaRequest<'a> {
    pub sender: String,
    pub message: &'a str,
}

/// One reply item. Items may carry images, buttons, or custom payloads
/// instead of text; only `text` is read.
#[derive(Debug, Deserialize)]
pub struct RasaReplyItem {
    #[serde(default)]
    pub text: Option<String>,
}

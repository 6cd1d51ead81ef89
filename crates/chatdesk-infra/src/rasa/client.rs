//! RasaRelay -- concrete [`DialogueRelay`] implementation over the Rasa REST
//! webhook (`POST /webhooks/rest/webhook`).
//!
//! One request per call, no retries. The per-item timestamps Rasa may send
//! are ignored; every retained reply is stamped with the local clock.

use std::time::Duration;

use tracing::debug;
use uuid::Uuid;

use chatdesk_core::relay::DialogueRelay;
use chatdesk_types::chat::Turn;
use chatdesk_types::config::DialogueConfig;
use chatdesk_types::error::RelayError;

use super::types::{RasaReplyItem, RasaRequest};

/// Maximum number of characters of an error body kept in a [`RelayError`].
const ERROR_BODY_LIMIT: usize = 200;

pub struct RasaRelay {
    client: reqwest::Client,
    webhook_url: String,
}

impl RasaRelay {
    /// Create a relay posting to `webhook_url`, with `timeout` as the client
    /// level ceiling. Each call is additionally bounded by its own deadline.
    pub fn new(webhook_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("chatdesk/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            webhook_url,
        }
    }

    pub fn from_config(config: &DialogueConfig) -> Self {
        Self::new(config.webhook_url(), config.timeout())
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

impl DialogueRelay for RasaRelay {
    #[tracing::instrument(
        name = "relay_send",
        skip(self, utterance),
        fields(conversation_id = %conversation_id, chars = utterance.chars().count())
    )]
    async fn send(
        &self,
        conversation_id: Uuid,
        utterance: &str,
        deadline: Duration,
    ) -> Result<Vec<Turn>, RelayError> {
        let body = RasaRequest {
            sender: conversation_id.to_string(),
            message: utterance,
        };

        let response = self
            .client
            .post(&self.webhook_url)
            .timeout(deadline)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify(e, deadline))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(RelayError::Status {
                status: status.as_u16(),
                body: error_body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let items: Vec<RasaReplyItem> = response.json().await.map_err(|e| {
            if e.is_timeout() {
                RelayError::Timeout(deadline)
            } else {
                RelayError::Malformed(e.to_string())
            }
        })?;

        let received = items.len();
        let turns = replies_to_turns(items);
        debug!(received, kept = turns.len(), "Dialogue engine replied");
        Ok(turns)
    }
}

/// Keep items with non-blank text, in order, as agent turns.
fn replies_to_turns(items: Vec<RasaReplyItem>) -> Vec<Turn> {
    items
        .into_iter()
        .filter_map(|item| item.text)
        .filter(|text| !text.trim().is_empty())
        .map(Turn::agent)
        .collect()
}

fn classify(e: reqwest::Error, deadline: Duration) -> RelayError {
    if e.is_timeout() {
        RelayError::Timeout(deadline)
    } else {
        RelayError::Unreachable(e.to_string())
    }
}

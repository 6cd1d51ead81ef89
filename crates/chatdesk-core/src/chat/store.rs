//! Owner-partitioned conversation store.
//!
//! Two levels of `DashMap`: owner -> (conversation id -> conversation).
//! Inserts and lookups shard-lock only; there is no store-wide mutex. The
//! store is constructed once at process start and handed to whoever needs
//! it, never reached through a global.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use chatdesk_types::chat::ConversationSummary;
use chatdesk_types::error::ConversationError;
use chatdesk_types::identity::OwnerId;

use super::conversation::Conversation;

#[derive(Debug, Default)]
pub struct ConversationStore {
    partitions: DashMap<OwnerId, DashMap<Uuid, Arc<Conversation>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a conversation in `owner`'s partition, creating the partition
    /// on first use.
    pub fn create(&self, owner: &OwnerId, title: Option<&str>) -> Arc<Conversation> {
        let conversation = Arc::new(Conversation::new(title));
        self.partitions
            .entry(owner.clone())
            .or_default()
            .insert(conversation.id(), Arc::clone(&conversation));

        info!(owner = %owner, conversation_id = %conversation.id(), "Conversation created");
        conversation
    }

    /// Summaries of every conversation `owner` holds, most recently active
    /// first. Ties on `updated_at` break by id, newest first.
    pub fn list(&self, owner: &OwnerId) -> Vec<ConversationSummary> {
        let Some(partition) = self.partitions.get(owner) else {
            return Vec::new();
        };

        let mut summaries: Vec<ConversationSummary> =
            partition.iter().map(|entry| entry.value().summary()).collect();
        drop(partition);

        summaries.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        summaries
    }

    /// Fetch a conversation only if it exists and belongs to `owner`.
    ///
    /// A conversation held by another owner is reported exactly like a
    /// missing one.
    pub fn get(&self, owner: &OwnerId, id: Uuid) -> Result<Arc<Conversation>, ConversationError> {
        self.partitions
            .get(owner)
            .and_then(|partition| partition.get(&id).map(|entry| Arc::clone(entry.value())))
            .ok_or(ConversationError::NotFound)
    }
}

//! Per-owner conversation state.
//!
//! [`store::ConversationStore`] partitions conversations by owner. Each
//! [`conversation::Conversation`] serializes its own mutations, so requests
//! touching different conversations never contend.

pub mod conversation;
pub mod store;
pub mod title;
pub mod transcript;

//! Application state wiring all services together.
//!
//! The conversation store is created exactly once here and shared by every
//! handler through the orchestrator; nothing reaches it globally.

use std::sync::Arc;

use chatdesk_core::chat::store::ConversationStore;
use chatdesk_core::identity::IdentityService;
use chatdesk_core::relay::BoxDialogueRelay;
use chatdesk_core::session::SessionOrchestrator;
use chatdesk_infra::rasa::RasaRelay;
use chatdesk_types::config::GlobalConfig;

/// Orchestrator pinned to the type-erased relay.
pub type ConcreteOrchestrator = SessionOrchestrator<BoxDialogueRelay>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ConcreteOrchestrator>,
    pub config: Arc<GlobalConfig>,
}

impl AppState {
    /// Wire the store and identity service to the configured dialogue engine.
    pub fn init(config: GlobalConfig) -> Self {
        let relay = RasaRelay::from_config(&config.dialogue);
        tracing::info!(url = %relay.webhook_url(), "Dialogue engine relay configured");
        Self::with_relay(config, BoxDialogueRelay::new(relay))
    }

    /// Wire the store and identity service to an arbitrary relay.
    pub fn with_relay(config: GlobalConfig, relay: BoxDialogueRelay) -> Self {
        let orchestrator = SessionOrchestrator::new(
            Arc::new(ConversationStore::new()),
            IdentityService::new(),
            relay,
        )
        .with_relay_deadline(config.dialogue.timeout());

        Self {
            orchestrator: Arc::new(orchestrator),
            config: Arc::new(config),
        }
    }
}

//! Application state wiring the orchestrator to its concrete stores.
//!
//! `ChatOrchestrator` is generic over the repository and generator traits;
//! AppState pins it to the in-memory stores and a boxed reply generator.

use std::sync::Arc;

use dumai_core::chat::ChatOrchestrator;
use dumai_core::reply::BoxReplyGenerator;
use dumai_infra::config::{load_config, resolve_data_dir};
use dumai_infra::llm::GroqReplyGenerator;
use dumai_infra::memory::{InMemoryIdentityStore, InMemoryMessageLog, InMemorySessionStore};
use dumai_types::config::AppConfig;

/// Concrete orchestrator type pinned to the infra implementations.
pub type ConcreteOrchestrator = ChatOrchestrator<
    InMemoryIdentityStore,
    InMemorySessionStore,
    InMemoryMessageLog<InMemorySessionStore>,
    BoxReplyGenerator,
>;

/// Shared application state, used by both the CLI and the REST API.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ConcreteOrchestrator>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Load configuration and wire the Groq-backed orchestrator.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_config(&data_dir).await;
        tracing::debug!(data_dir = %data_dir.display(), model = %config.llm.model, "Configuration loaded");

        let generator = GroqReplyGenerator::from_config(&config.llm)?;
        Ok(Self::with_generator(config, BoxReplyGenerator::new(generator)))
    }

    /// Wire fresh stores around an already chosen generator.
    pub fn with_generator(config: AppConfig, generator: BoxReplyGenerator) -> Self {
        let sessions = InMemorySessionStore::new();
        let chat = ChatOrchestrator::new(
            InMemoryIdentityStore::new(),
            sessions.clone(),
            InMemoryMessageLog::new(sessions),
            generator,
            config.chat.clone(),
        );

        Self {
            chat: Arc::new(chat),
            config: Arc::new(config),
        }
    }
}

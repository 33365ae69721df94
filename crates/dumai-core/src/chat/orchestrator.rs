//! Chat orchestrator: the per-turn state machine.
//!
//! `ChatOrchestrator` resolves (or creates) the identity and session for an
//! inbound turn, asks the reply generator for a response and persists the
//! user/assistant message pair. It is also the read façade the transport
//! layer uses for listings, so handlers never reach into the stores.
//!
//! Resolution precedence for a turn (first match wins):
//! 1. a supplied session id that exists
//! 2. a known user id, or a username (created on first contact)
//! 3. a transient session id for anonymous use, when allowed
//!
//! Nothing is written for a turn whose reply generation fails.

use dumai_types::chat::{ChatMessage, ChatSession, MessageRole, SessionTitle};
use dumai_types::config::ChatConfig;
use dumai_types::error::ChatError;
use dumai_types::identity::{Identity, PLACEHOLDER_CREDENTIAL, UserId};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chat::language::detect_language;
use crate::chat::personality::{PersonalityPicker, RandomPersonality, pick_personality};
use crate::chat::title::derive_title;
use crate::chat::turn::{TurnOutcome, TurnRequest, validate_username};
use crate::reply::ReplyGenerator;
use crate::repository::{IdentityRepository, MessageRepository, SessionRepository};

/// Record counts across the three stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatStats {
    pub users: u64,
    pub sessions: u64,
    pub messages: u64,
}

/// Session the current turn is recorded under.
#[derive(Debug)]
struct ActiveSession {
    id: String,
    personality: String,
    /// Derived title to apply once the reply has been generated.
    pending_title: Option<String>,
}

/// Orchestrates identity/session resolution, reply generation and message
/// persistence for chat turns.
///
/// Generic over the repository traits and the reply generator so that
/// dumai-core never depends on dumai-infra.
pub struct ChatOrchestrator<I, S, M, G> {
    identities: I,
    sessions: S,
    messages: M,
    generator: G,
    personalities: Box<dyn PersonalityPicker>,
    config: ChatConfig,
}

impl<I, S, M, G> ChatOrchestrator<I, S, M, G>
where
    I: IdentityRepository,
    S: SessionRepository,
    M: MessageRepository,
    G: ReplyGenerator,
{
    /// Create an orchestrator that draws personalities at random.
    pub fn new(identities: I, sessions: S, messages: M, generator: G, config: ChatConfig) -> Self {
        Self {
            identities,
            sessions,
            messages,
            generator,
            personalities: Box::new(RandomPersonality),
            config,
        }
    }

    /// Replace the personality source (deterministic pickers in tests).
    pub fn with_personality_picker(mut self, picker: impl PersonalityPicker + 'static) -> Self {
        self.personalities = Box::new(picker);
        self
    }

    pub fn identities(&self) -> &I {
        &self.identities
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    pub fn messages(&self) -> &M {
        &self.messages
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    // --- Turn processing ---

    /// Process one chat turn.
    ///
    /// Validation happens before any state is touched. The user message (when
    /// the turn carries text and is not the initial handshake) and the reply
    /// are persisted only after the generator succeeded.
    #[tracing::instrument(
        name = "chat_turn",
        skip(self, request),
        fields(initial = request.initial, has_session = request.session_id.is_some())
    )]
    pub async fn handle_turn(&self, request: TurnRequest) -> Result<TurnOutcome, ChatError> {
        request.validate(self.config.max_message_chars)?;

        let text = request.text();
        let active = self.resolve_session(&request).await?;
        let language = detect_language(text);

        let reply = match self
            .generator
            .generate_reply(text, request.initial, Some(&active.personality))
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    session_id = %active.id,
                    generator = self.generator.name(),
                    error = %e,
                    "Reply generation failed, nothing persisted for this turn"
                );
                return Err(e.into());
            }
        };

        if let Some(title) = &active.pending_title {
            if self.sessions.rename_title(&active.id, title).await?.is_some() {
                info!(session_id = %active.id, title = %title, "Session title derived");
            }
        }

        if !request.initial && !text.trim().is_empty() {
            let stored = self
                .messages
                .append(&active.id, MessageRole::User, text.to_string(), language.clone())
                .await?;
            debug!(session_id = %active.id, message_id = stored.id, "User message stored");
        }

        let stored = self
            .messages
            .append(&active.id, MessageRole::Assistant, reply.clone(), language.clone())
            .await?;
        debug!(session_id = %active.id, message_id = stored.id, "Assistant message stored");

        Ok(TurnOutcome {
            message: reply,
            session_id: active.id,
            language,
        })
    }

    async fn resolve_session(&self, request: &TurnRequest) -> Result<ActiveSession, ChatError> {
        let text = request.text();

        if let Some(session_id) = request.session_id.as_deref() {
            if let Some(session) = self.sessions.get_by_id(session_id).await? {
                let pending_title = if session.title_is_default && !request.initial {
                    match derive_title(text, &self.config.default_title) {
                        SessionTitle::Derived(title) => Some(title),
                        SessionTitle::Placeholder(_) => None,
                    }
                } else {
                    None
                };

                return Ok(ActiveSession {
                    id: session.id,
                    personality: session.personality,
                    pending_title,
                });
            }
            debug!(session_id, "Supplied session id is unknown, falling back to identity");
        }

        if let Some(owner) = self.resolve_identity(request).await? {
            let title = if request.initial {
                SessionTitle::Placeholder(self.config.default_title.clone())
            } else {
                derive_title(text, &self.config.default_title)
            };
            let personality = pick_personality(self.personalities.as_ref());
            let session = self.sessions.create(owner.id, title, personality).await?;

            info!(
                session_id = %session.id,
                owner_id = owner.id,
                title = %session.title,
                "Chat session created"
            );

            return Ok(ActiveSession {
                id: session.id,
                personality: session.personality,
                pending_title: None,
            });
        }

        if self.config.allow_anonymous {
            // Transient ids are never stored as sessions, so the listing
            // endpoints cannot find them.
            let id = Uuid::now_v7().to_string();
            let personality = pick_personality(self.personalities.as_ref()).to_string();
            debug!(session_id = %id, "Allocated transient session for anonymous turn");
            return Ok(ActiveSession {
                id,
                personality,
                pending_title: None,
            });
        }

        Err(ChatError::Unresolved)
    }

    async fn resolve_identity(&self, request: &TurnRequest) -> Result<Option<Identity>, ChatError> {
        if let Some(user_id) = request.user_id {
            if let Some(identity) = self.identities.get_by_id(user_id).await? {
                return Ok(Some(identity));
            }
            debug!(user_id, "Supplied user id is unknown");
        }

        match request.username.as_deref() {
            Some(username) => {
                let identity = self
                    .identities
                    .create_or_get(username, PLACEHOLDER_CREDENTIAL)
                    .await?;
                Ok(Some(identity))
            }
            None => Ok(None),
        }
    }

    // --- Read façade ---

    /// Register (or fetch) the identity for `username`. Idempotent.
    pub async fn register_user(&self, username: &str) -> Result<Identity, ChatError> {
        validate_username(username).map_err(|v| ChatError::Validation(vec![v]))?;
        let identity = self
            .identities
            .create_or_get(username, PLACEHOLDER_CREDENTIAL)
            .await?;
        debug!(user_id = identity.id, "User registered");
        Ok(identity)
    }

    /// Sessions of a user, most recently active first.
    pub async fn list_sessions(&self, owner_id: UserId) -> Result<Vec<ChatSession>, ChatError> {
        if self.identities.get_by_id(owner_id).await?.is_none() {
            return Err(ChatError::UserNotFound(owner_id));
        }
        Ok(self.sessions.list_by_owner(owner_id).await?)
    }

    /// A single stored session.
    pub async fn get_session(&self, session_id: &str) -> Result<ChatSession, ChatError> {
        self.sessions
            .get_by_id(session_id)
            .await?
            .ok_or_else(|| ChatError::SessionNotFound(session_id.to_string()))
    }

    /// Messages of a stored session in chronological order.
    pub async fn list_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>, ChatError> {
        let session = self.get_session(session_id).await?;
        Ok(self.messages.list_by_session(&session.id).await?)
    }

    /// The whole message log, ascending by id.
    pub async fn list_all_messages(&self) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.messages.list_all().await?)
    }

    pub async fn stats(&self) -> Result<ChatStats, ChatError> {
        Ok(ChatStats {
            users: self.identities.count().await?,
            sessions: self.sessions.count().await?,
            messages: self.messages.count().await?,
        })
    }
}

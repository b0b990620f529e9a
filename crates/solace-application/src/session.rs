//! Conversation session.
//!
//! A session owns one conversation's history and random source and feeds
//! each user turn through the shared [`SupportPipeline`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use solace_core::{
    AiResponse, CompletionProvider, ConversationMessage, Result, SolaceError, SupportPipeline,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Default upper bound on a single provider call.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for creating a [`ConversationSession`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Seed for template selection; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Upper bound on a provider call before the turn fails.
    pub provider_timeout: Duration,
    /// Whether to open the conversation with the catalog's welcome message.
    pub include_welcome: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            seed: None,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            include_welcome: true,
        }
    }
}

impl SessionOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn without_welcome(mut self) -> Self {
        self.include_welcome = false;
        self
    }
}

/// The assistant's answer to one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReply {
    /// The assistant message as appended to history.
    pub message: ConversationMessage,
    /// Set when the caller should surface crisis resources.
    pub requires_crisis_support: bool,
}

struct SessionState {
    history: Vec<ConversationMessage>,
    rng: StdRng,
}

/// One conversation with the support assistant.
///
/// Turns are serialized: the state lock is held for the whole turn, including
/// any provider call, so replies are appended in the order they were sent.
/// A turn either appends both the user message and the reply, or nothing.
pub struct ConversationSession {
    id: String,
    pipeline: SupportPipeline,
    provider: Option<Arc<dyn CompletionProvider>>,
    provider_timeout: Duration,
    state: Mutex<SessionState>,
}

impl ConversationSession {
    /// Creates a session that answers from catalog templates.
    pub fn new(pipeline: SupportPipeline, options: SessionOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut history = Vec::new();
        if options.include_welcome {
            let session = &pipeline.catalog().session;
            history.push(ConversationMessage::assistant(
                session.welcome.clone(),
                session.welcome_actions.clone(),
            ));
        }

        Self {
            id: Uuid::new_v4().to_string(),
            pipeline,
            provider: None,
            provider_timeout: options.provider_timeout,
            state: Mutex::new(SessionState { history, rng }),
        }
    }

    /// Creates a session whose non-crisis replies come from `provider`.
    pub fn with_provider(
        pipeline: SupportPipeline,
        provider: Arc<dyn CompletionProvider>,
        options: SessionOptions,
    ) -> Self {
        let mut session = Self::new(pipeline, options);
        session.provider = Some(provider);
        session
    }

    pub fn pipeline(&self) -> &SupportPipeline {
        &self.pipeline
    }

    /// Sends a user utterance and returns the assistant's reply.
    ///
    /// Blank utterances are ignored and return `Ok(None)` without touching
    /// history. On error, history is left exactly as it was.
    pub async fn send(&self, text: &str) -> Result<Option<SessionReply>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let response = match &self.provider {
            Some(provider) => self.respond_remote(text, &state.history, provider.as_ref()).await?,
            None => self.pipeline.respond_with(text, &state.history, &mut state.rng)?,
        };

        if response.requires_crisis_support {
            tracing::warn!(session_id = %self.id, "Crisis support required");
        }

        let AiResponse {
            text: reply_text,
            suggested_actions,
            requires_crisis_support,
        } = response;
        let reply = ConversationMessage::assistant(reply_text, suggested_actions);

        state.history.push(ConversationMessage::user(text));
        state.history.push(reply.clone());
        tracing::debug!(session_id = %self.id, len = state.history.len(), "Appended turn");

        Ok(Some(SessionReply {
            message: reply,
            requires_crisis_support,
        }))
    }

    async fn respond_remote(
        &self,
        text: &str,
        history: &[ConversationMessage],
        provider: &dyn CompletionProvider,
    ) -> Result<AiResponse> {
        let call = self.pipeline.respond_assisted(text, history, provider);
        match tokio::time::timeout(self.provider_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(SolaceError::provider(
                None,
                format!(
                    "{} did not respond within {}s",
                    provider.name(),
                    self.provider_timeout.as_secs_f32()
                ),
                true,
            )),
        }
    }

    /// Snapshot of the conversation so far, oldest first.
    pub async fn history(&self) -> Vec<ConversationMessage> {
        self.state.lock().await.history.clone()
    }

    /// Number of messages in the conversation, welcome included.
    pub async fn len(&self) -> usize {
        self.state.lock().await.history.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

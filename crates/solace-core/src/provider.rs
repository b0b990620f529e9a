//! Completion provider seam.
//!
//! A provider may supply free-form reply text for non-crisis turns. It never
//! sees crisis turns and never produces quick replies; both stay local.

use crate::error::Result;
use crate::message::{ConversationMessage, MessageRole};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fixed instruction sent ahead of every provider conversation.
pub const SYSTEM_INSTRUCTION: &str = r#"You are a compassionate mental health support companion. Your role is to:

1. Listen with empathy and validate emotions
2. Provide supportive, non-judgmental responses
3. Offer gentle coping strategies when appropriate
4. Encourage professional help when needed
5. Never provide medical advice or diagnoses

Guidelines:
- Use warm, empathetic language
- Acknowledge and validate feelings, then ask open-ended questions to encourage sharing
- Suggest breathing exercises, grounding techniques, or self-care when helpful
- Keep responses conversational and human-like
- If someone mentions serious mental health concerns, gently suggest professional support

Respond as a caring friend who is trained in active listening and emotional support."#;

/// One turn of the conversation as seen by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionTurn {
    pub role: MessageRole,
    pub content: String,
}

/// Everything a provider needs to produce a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system_instruction: String,
    /// Recent history (oldest first) followed by the new utterance.
    pub turns: Vec<CompletionTurn>,
}

impl CompletionRequest {
    /// Builds a request from the last `window` history entries plus `utterance`.
    pub fn build(utterance: &str, history: &[ConversationMessage], window: usize) -> Self {
        let start = history.len().saturating_sub(window);
        let mut turns: Vec<CompletionTurn> = history[start..]
            .iter()
            .map(|message| CompletionTurn {
                role: message.role,
                content: message.text.clone(),
            })
            .collect();
        turns.push(CompletionTurn {
            role: MessageRole::User,
            content: utterance.to_string(),
        });

        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            turns,
        }
    }
}

/// Remote text-completion backend.
///
/// Implementations must report every failure (missing credential, transport
/// error, non-success status, malformed payload) as an error instead of
/// returning placeholder text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

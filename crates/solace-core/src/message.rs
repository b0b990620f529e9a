//! Conversation message types.
//!
//! This module contains types for representing messages in a conversation,
//! including roles and message content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the support assistant.
    Assistant,
}

/// A single message in a conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    /// Unique message identifier (UUID format).
    pub id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub text: String,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
    /// Quick replies offered alongside an assistant message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_actions: Vec<String>,
}

impl ConversationMessage {
    /// Creates a user message stamped with the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::User,
            text: text.into(),
            timestamp: Utc::now(),
            suggested_actions: Vec::new(),
        }
    }

    /// Creates an assistant message with its quick replies.
    pub fn assistant(text: impl Into<String>, suggested_actions: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
            suggested_actions,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_role() {
        let user = ConversationMessage::user("hi");
        let assistant = ConversationMessage::assistant("hello", vec!["Tell me more".into()]);

        assert!(user.is_user());
        assert!(!assistant.is_user());
        assert_ne!(user.id, assistant.id);
        assert_eq!(assistant.suggested_actions, vec!["Tell me more".to_string()]);
    }

    #[test]
    fn test_serializes_camel_case_and_skips_empty_actions() {
        let json = serde_json::to_value(ConversationMessage::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
        assert!(json.get("suggestedActions").is_none());
    }
}

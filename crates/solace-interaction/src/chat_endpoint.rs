//! Transport-agnostic chat endpoint.
//!
//! Accepts the JSON body a remote client posts, runs it through the same
//! [`SupportPipeline`] the local path uses, and produces a status code plus
//! JSON body. Binding it to an HTTP server is left to the host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solace_core::{AiResponse, CompletionProvider, ConversationMessage, Result, SolaceError, SupportPipeline};
use std::sync::Arc;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// One prior turn as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryTurn {
    pub text: String,
    pub is_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl BoundaryTurn {
    pub fn into_message(self) -> ConversationMessage {
        let mut message = if self.is_user {
            ConversationMessage::user(self.text)
        } else {
            ConversationMessage::assistant(self.text, Vec::new())
        };
        if let Some(timestamp) = self.timestamp {
            message.timestamp = timestamp;
        }
        message
    }
}

/// Request body: `{ "message", "conversationHistory" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<BoundaryTurn>,
}

/// Failure body: `{ "error", "details" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatErrorPayload {
    pub error: String,
    pub details: String,
}

/// Status code and serialized body of one endpoint call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointReply {
    pub status: u16,
    pub body: String,
}

/// Maps an error to the status code the endpoint answers with.
pub fn status_for(err: &SolaceError) -> u16 {
    match err {
        SolaceError::InvalidRequest(_) => STATUS_BAD_REQUEST,
        _ => STATUS_INTERNAL_ERROR,
    }
}

/// Builds the failure reply for an error.
pub fn error_reply(err: &SolaceError) -> EndpointReply {
    let status = status_for(err);
    let error = if status == STATUS_BAD_REQUEST {
        "Invalid request"
    } else {
        "Failed to generate AI response"
    };
    let payload = ChatErrorPayload {
        error: error.to_string(),
        details: err.to_string(),
    };
    EndpointReply {
        status,
        body: serde_json::to_string(&payload)
            .unwrap_or_else(|_| format!(r#"{{"error":"{error}","details":""}}"#)),
    }
}

/// Where non-crisis reply text comes from.
#[derive(Clone)]
enum ReplySource {
    Templates,
    Provider(Arc<dyn CompletionProvider>),
    /// The provider could not be built; non-crisis turns fail with this error.
    Unavailable(SolaceError),
}

/// Chat endpoint over a shared pipeline.
///
/// With a provider, non-crisis reply text comes from the provider; without
/// one, the catalog templates answer. The crisis gate runs before any
/// provider is consulted, so crisis turns are answered even when the
/// provider is unavailable.
#[derive(Clone)]
pub struct ChatEndpoint {
    pipeline: SupportPipeline,
    source: ReplySource,
}

impl ChatEndpoint {
    pub fn new(pipeline: SupportPipeline, provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        let source = match provider {
            Some(provider) => ReplySource::Provider(provider),
            None => ReplySource::Templates,
        };
        Self { pipeline, source }
    }

    /// Endpoint backed by a provider whose construction may have failed.
    pub fn remote(pipeline: SupportPipeline, provider: Result<Arc<dyn CompletionProvider>>) -> Self {
        let source = match provider {
            Ok(provider) => ReplySource::Provider(provider),
            Err(err) => ReplySource::Unavailable(err),
        };
        Self { pipeline, source }
    }

    pub fn pipeline(&self) -> &SupportPipeline {
        &self.pipeline
    }

    /// Parses a raw request body.
    pub fn parse_request(body: &str) -> Result<ChatRequest> {
        let request: ChatRequest = serde_json::from_str(body)
            .map_err(|e| SolaceError::invalid_request(format!("Malformed request body: {e}")))?;
        if request.message.trim().is_empty() {
            return Err(SolaceError::invalid_request("message must not be empty"));
        }
        Ok(request)
    }

    /// Handles a parsed request.
    pub async fn handle(&self, request: ChatRequest) -> Result<AiResponse> {
        if self.pipeline.assess(&request.message).is_crisis {
            return Ok(self.pipeline.crisis_response());
        }

        let history: Vec<ConversationMessage> = request
            .conversation_history
            .into_iter()
            .map(BoundaryTurn::into_message)
            .collect();

        match &self.source {
            ReplySource::Provider(provider) => {
                self.pipeline
                    .respond_assisted(&request.message, &history, provider.as_ref())
                    .await
            }
            ReplySource::Templates => self.pipeline.respond(&request.message, &history),
            ReplySource::Unavailable(err) => Err(err.clone()),
        }
    }

    /// Handles a raw JSON body and returns the status code and JSON reply.
    pub async fn handle_json(&self, body: &str) -> EndpointReply {
        let result = match Self::parse_request(body) {
            Ok(request) => self.handle(request).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(response) => match serde_json::to_string(&response) {
                Ok(body) => EndpointReply {
                    status: STATUS_OK,
                    body,
                },
                Err(err) => error_reply(&SolaceError::from(err)),
            },
            Err(err) => {
                tracing::error!(error = %err, "Chat endpoint request failed");
                error_reply(&err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_with_history() {
        let request = ChatEndpoint::parse_request(
            r#"{
                "message": "I'm worried",
                "conversationHistory": [
                    {"text": "Hello", "isUser": false, "timestamp": "2024-05-01T10:00:00Z"},
                    {"text": "hi", "isUser": true}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(request.message, "I'm worried");
        assert_eq!(request.conversation_history.len(), 2);
        assert!(request.conversation_history[0].timestamp.is_some());
        assert!(request.conversation_history[1].is_user);
    }

    #[test]
    fn test_history_is_optional() {
        let request = ChatEndpoint::parse_request(r#"{"message":"hello"}"#).unwrap();
        assert!(request.conversation_history.is_empty());
    }

    #[test]
    fn test_malformed_requests_are_invalid() {
        for body in ["not json", "{}", r#"{"message": 42}"#, r#"{"message": "   "}"#] {
            let err = ChatEndpoint::parse_request(body).unwrap_err();
            assert_eq!(status_for(&err), STATUS_BAD_REQUEST, "body: {body}");
        }
    }

    #[test]
    fn test_turn_conversion_keeps_timestamp() {
        let timestamp: DateTime<Utc> = "2024-05-01T10:00:00Z".parse().unwrap();
        let message = BoundaryTurn {
            text: "hi".into(),
            is_user: true,
            timestamp: Some(timestamp),
        }
        .into_message();

        assert!(message.is_user());
        assert_eq!(message.timestamp, timestamp);
    }

    #[test]
    fn test_error_reply_shapes() {
        let reply = error_reply(&SolaceError::provider(Some(503), "unavailable", true));
        assert_eq!(reply.status, STATUS_INTERNAL_ERROR);
        let payload: ChatErrorPayload = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(payload.error, "Failed to generate AI response");
        assert!(payload.details.contains("503"));

        let reply = error_reply(&SolaceError::config("OPENAI_API_KEY not found"));
        assert_eq!(reply.status, STATUS_INTERNAL_ERROR);
    }
}

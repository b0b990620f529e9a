//! Boundaries of the support assistant: the OpenAI completion provider and
//! the remote chat endpoint contract.

pub mod chat_endpoint;
pub mod openai_api_agent;

pub use chat_endpoint::{BoundaryTurn, ChatEndpoint, ChatErrorPayload, ChatRequest, EndpointReply};
pub use openai_api_agent::OpenAiCompletionProvider;

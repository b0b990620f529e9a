//! Application layer for Solace.
//!
//! Coordinates the core pipeline with per-conversation state.

pub mod session;

pub use session::{ConversationSession, DEFAULT_PROVIDER_TIMEOUT, SessionOptions, SessionReply};

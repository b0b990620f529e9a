//! Domain core of the Solace support assistant.
//!
//! Holds the configuration catalog and the decision pipeline:
//! [`CrisisGate`] → [`EmotionClassifier`] → [`ResponseSelector`] /
//! [`ActionSuggester`], wired together by [`SupportPipeline`].

pub mod actions;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod crisis;
pub mod emotion;
pub mod error;
pub mod message;
pub mod pipeline;
pub mod provider;
pub mod response;
pub mod selector;

// Re-export common types
pub use actions::ActionSuggester;
pub use catalog::SupportCatalog;
pub use classifier::EmotionClassifier;
pub use crisis::CrisisGate;
pub use emotion::{EmotionLabel, EmotionSet};
pub use error::{Result, SolaceError};
pub use message::{ConversationMessage, MessageRole};
pub use pipeline::SupportPipeline;
pub use provider::{CompletionProvider, CompletionRequest, CompletionTurn};
pub use response::{AiResponse, Assessment, Selection, TemplateTier};
pub use selector::ResponseSelector;

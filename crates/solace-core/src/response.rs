//! Pipeline result types.

use crate::emotion::EmotionSet;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// The single contract surfaced to callers of the pipeline.
///
/// Built fresh for every call. When `requires_crisis_support` is true, `text`
/// and `suggested_actions` are the catalog's crisis template and crisis
/// actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResponse {
    pub text: String,
    pub suggested_actions: Vec<String>,
    pub requires_crisis_support: bool,
}

/// Gate and classifier output for one utterance.
///
/// Every call site (local templates, provider-assisted replies and the chat
/// endpoint) derives its policy decisions from this one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assessment {
    pub is_crisis: bool,
    pub labels: EmotionSet,
}

/// Named group of template utterances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TemplateTier {
    Crisis,
    Anxiety,
    Depression,
    Anger,
    Grief,
    Greeting,
    Supportive,
}

/// Output of the response selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Tier the base template was drawn from.
    pub tier: TemplateTier,
    /// Final reply text, including any appended suggestion.
    pub text: String,
    /// Whether a coping or encouragement line was appended.
    pub appended: bool,
}

impl Selection {
    pub fn into_text(self) -> String {
        self.text
    }
}

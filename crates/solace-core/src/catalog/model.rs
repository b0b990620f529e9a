//! Support catalog domain models.
//!
//! The catalog is the immutable configuration object handed to the pipeline
//! at construction: distress phrases, emotion keyword tables, template tiers,
//! quick-reply sets and the selection policy.

use crate::emotion::EmotionLabel;
use strum::IntoEnumIterator;
use serde::{Deserialize, Serialize};

/// Root of the catalog file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SupportCatalog {
    pub crisis: CrisisConfig,
    pub keywords: LabelTable,
    pub responses: ResponseTiers,
    pub coping: CopingPrompts,
    pub actions: ActionCatalog,
    #[serde(default)]
    pub policy: SelectionPolicy,
    pub session: SessionConfig,
    #[serde(default)]
    pub resources: CrisisResources,
    #[serde(default)]
    pub toolkit: CopingToolkit,
}

/// Crisis gate vocabulary and its fixed reply.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CrisisConfig {
    /// Distress phrases; any substring match trips the gate.
    pub phrases: Vec<String>,
    /// Fixed reply returned whenever the gate trips.
    pub message: String,
    /// Fixed quick replies returned whenever the gate trips.
    pub actions: Vec<String>,
}

/// One list of strings per emotion label.
///
/// Used for both keyword tables and per-label quick replies. Labels missing
/// from the file deserialize to empty lists.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LabelTable {
    pub anxiety: Vec<String>,
    pub depression: Vec<String>,
    pub anger: Vec<String>,
    pub grief: Vec<String>,
    pub trauma: Vec<String>,
    pub relationships: Vec<String>,
    pub work: Vec<String>,
    pub family: Vec<String>,
}

impl LabelTable {
    /// Returns the entries registered for `label`.
    pub fn get(&self, label: EmotionLabel) -> &[String] {
        match label {
            EmotionLabel::Anxiety => &self.anxiety,
            EmotionLabel::Depression => &self.depression,
            EmotionLabel::Anger => &self.anger,
            EmotionLabel::Grief => &self.grief,
            EmotionLabel::Trauma => &self.trauma,
            EmotionLabel::Relationships => &self.relationships,
            EmotionLabel::Work => &self.work,
            EmotionLabel::Family => &self.family,
        }
    }

    /// Number of entries across all labels.
    pub fn total_entries(&self) -> usize {
        EmotionLabel::iter().map(|label| self.get(label).len()).sum()
    }
}

/// Template tiers the selector draws from.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ResponseTiers {
    pub greeting: Vec<String>,
    pub anxiety: Vec<String>,
    pub depression: Vec<String>,
    pub anger: Vec<String>,
    pub grief: Vec<String>,
    pub supportive: Vec<String>,
    pub encouragement: Vec<String>,
}

/// Coping suggestions that may be appended to an emotion reply.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CopingPrompts {
    pub breathing: Vec<String>,
    pub grounding: Vec<String>,
    pub selfcare: Vec<String>,
}

/// Quick replies offered after a non-crisis reply.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ActionCatalog {
    /// Used when no matched label contributes an action.
    pub fallback: Vec<String>,
    #[serde(default)]
    pub labels: LabelTable,
}

/// Tunable selection policy.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SelectionPolicy {
    /// Chance of appending a breathing prompt to an anxiety reply.
    pub anxiety_coping_probability: f64,
    /// Chance of appending a self-care prompt to a depression reply.
    pub depression_coping_probability: f64,
    /// Chance of appending a grounding prompt to an anger reply.
    pub anger_coping_probability: f64,
    /// Chance of appending an encouragement to a general supportive reply.
    pub encouragement_probability: f64,
    /// History lengths up to this value (user and assistant turns) count as early conversation.
    pub early_conversation_turns: usize,
    pub max_suggested_actions: usize,
    /// Prior turns forwarded to a completion provider.
    pub history_window: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            anxiety_coping_probability: 0.5,
            depression_coping_probability: 0.5,
            anger_coping_probability: 0.5,
            encouragement_probability: 0.4,
            early_conversation_turns: 2,
            max_suggested_actions: 3,
            history_window: 10,
        }
    }
}

/// Opening message of a new conversation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub welcome: String,
    #[serde(default)]
    pub welcome_actions: Vec<String>,
}

/// A helpline shown alongside crisis replies.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Helpline {
    pub name: String,
    pub contact: String,
    pub description: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CrisisResources {
    pub helplines: Vec<Helpline>,
    pub emergency_guidance: Vec<String>,
    pub closing_note: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GroundingTechnique {
    pub title: String,
    pub description: String,
}

/// Self-help material surfaced outside the reply pipeline.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CopingToolkit {
    pub journal_prompts: Vec<String>,
    pub grounding_techniques: Vec<GroundingTechnique>,
}

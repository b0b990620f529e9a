//! Crisis gate.
//!
//! Scans an utterance for distress phrases. A match vetoes every other part
//! of the pipeline: the caller must return the fixed crisis reply and crisis
//! quick replies, and must not consult a completion provider.

use crate::catalog::CrisisConfig;

/// Case-insensitive substring detector over the catalog's distress phrases.
///
/// Matching is not word-bounded: "hopelessly" trips "hopeless".
#[derive(Debug, Clone)]
pub struct CrisisGate {
    phrases: Vec<String>,
}

impl CrisisGate {
    pub fn new(config: &CrisisConfig) -> Self {
        Self::from_phrases(config.phrases.iter().map(String::as_str))
    }

    pub fn from_phrases<'a>(phrases: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            phrases: phrases
                .into_iter()
                .map(|phrase| phrase.to_lowercase())
                .collect(),
        }
    }

    /// Returns true if any distress phrase occurs in `text`.
    pub fn is_crisis(&self, text: &str) -> bool {
        self.matched_phrase(text).is_some()
    }

    /// Returns the first distress phrase found in `text`, if any.
    pub fn matched_phrase(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        let phrase = self
            .phrases
            .iter()
            .find(|phrase| lower.contains(phrase.as_str()))?;

        tracing::warn!(phrase = %phrase, "Crisis detected");
        Some(phrase.as_str())
    }
}

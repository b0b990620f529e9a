//! Keyword emotion classifier.

use crate::catalog::LabelTable;
use crate::emotion::{EmotionLabel, EmotionSet};
use strum::IntoEnumIterator;

/// Tags an utterance with every label whose keyword list matches.
///
/// Labels are independent: each one is tested regardless of the others, and
/// an empty result (greetings, neutral statements) is an ordinary outcome.
#[derive(Debug, Clone)]
pub struct EmotionClassifier {
    tables: Vec<(EmotionLabel, Vec<String>)>,
}

impl EmotionClassifier {
    pub fn new(keywords: &LabelTable) -> Self {
        let tables = EmotionLabel::iter()
            .map(|label| {
                let lowered = keywords
                    .get(label)
                    .iter()
                    .map(|keyword| keyword.to_lowercase())
                    .collect();
                (label, lowered)
            })
            .collect();
        Self { tables }
    }

    pub fn classify(&self, text: &str) -> EmotionSet {
        let lower = text.to_lowercase();
        self.tables
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword.as_str())))
            .map(|(label, _)| *label)
            .collect()
    }
}

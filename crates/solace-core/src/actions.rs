//! Quick-reply suggestions.

use crate::catalog::{MAX_SUGGESTED_ACTIONS, SupportCatalog};
use crate::emotion::EmotionSet;

/// Derives the quick replies offered after a reply.
#[derive(Debug, Clone, Copy)]
pub struct ActionSuggester<'a> {
    catalog: &'a SupportCatalog,
}

impl<'a> ActionSuggester<'a> {
    pub fn new(catalog: &'a SupportCatalog) -> Self {
        Self { catalog }
    }

    /// Crisis replies get the fixed crisis set. Otherwise per-label actions
    /// are concatenated in label order and truncated, so earlier labels win.
    /// If no label contributes anything the generic fallback set is used.
    pub fn suggest(&self, labels: &EmotionSet, is_crisis: bool) -> Vec<String> {
        let limit = self.catalog.policy.max_suggested_actions.min(MAX_SUGGESTED_ACTIONS);

        if is_crisis {
            return self.catalog.crisis.actions.iter().take(limit).cloned().collect();
        }

        let mut suggestions: Vec<String> = labels
            .iter()
            .flat_map(|label| self.catalog.actions.labels.get(*label))
            .take(limit)
            .cloned()
            .collect();

        if suggestions.is_empty() {
            suggestions = self
                .catalog
                .actions
                .fallback
                .iter()
                .take(limit)
                .cloned()
                .collect();
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::EmotionLabel;

    fn catalog() -> SupportCatalog {
        SupportCatalog::bundled().unwrap().as_ref().clone()
    }

    fn labels(items: &[EmotionLabel]) -> EmotionSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_crisis_actions_verbatim() {
        let catalog = catalog();
        let actions = ActionSuggester::new(&catalog).suggest(&labels(&[EmotionLabel::Grief]), true);
        assert_eq!(
            actions,
            vec![
                "Get crisis support now",
                "Talk to a professional",
                "I'm in immediate danger"
            ]
        );
    }

    #[test]
    fn test_anxiety_actions() {
        let catalog = catalog();
        let actions = ActionSuggester::new(&catalog).suggest(&labels(&[EmotionLabel::Anxiety]), false);
        assert_eq!(
            actions,
            vec!["Help me feel calmer", "Breathing exercise", "Grounding technique"]
        );
    }

    #[test]
    fn test_first_label_takes_priority_when_truncating() {
        let catalog = catalog();
        let actions = ActionSuggester::new(&catalog)
            .suggest(&labels(&[EmotionLabel::Grief, EmotionLabel::Depression]), false);
        assert_eq!(
            actions,
            vec!["I feel hopeless", "Small self-care ideas", "Find motivation"]
        );
    }

    #[test]
    fn test_concatenates_across_labels_when_room() {
        let mut catalog = catalog();
        catalog.actions.labels.anxiety = vec!["Calm down together".into()];
        let actions = ActionSuggester::new(&catalog)
            .suggest(&labels(&[EmotionLabel::Anxiety, EmotionLabel::Anger]), false);
        assert_eq!(
            actions,
            vec!["Calm down together", "Help me process anger", "Healthy ways to cope"]
        );
    }

    #[test]
    fn test_fallback_when_no_labels() {
        let catalog = catalog();
        let actions = ActionSuggester::new(&catalog).suggest(&EmotionSet::new(), false);
        assert_eq!(
            actions,
            vec!["Tell me more", "Coping strategies", "I need encouragement"]
        );
    }

    #[test]
    fn test_fallback_when_labels_have_no_actions() {
        let catalog = catalog();
        let actions = ActionSuggester::new(&catalog)
            .suggest(&labels(&[EmotionLabel::Work, EmotionLabel::Family]), false);
        assert_eq!(actions, catalog.actions.fallback);
    }

    #[test]
    fn test_never_more_than_limit() {
        let mut catalog = catalog();
        catalog.policy.max_suggested_actions = 2;
        let suggester = ActionSuggester::new(&catalog);
        let all = labels(&[
            EmotionLabel::Anxiety,
            EmotionLabel::Depression,
            EmotionLabel::Anger,
            EmotionLabel::Grief,
        ]);
        assert_eq!(suggester.suggest(&all, false).len(), 2);
        assert_eq!(suggester.suggest(&all, true).len(), 2);
        assert_eq!(suggester.suggest(&EmotionSet::new(), false).len(), 2);
    }

    #[test]
    fn test_unvalidated_limit_still_capped_at_three() {
        let mut catalog = catalog();
        catalog.policy.max_suggested_actions = 6;
        let actions = ActionSuggester::new(&catalog).suggest(
            &labels(&[EmotionLabel::Anxiety, EmotionLabel::Depression]),
            false,
        );
        assert_eq!(
            actions,
            vec!["Help me feel calmer", "Breathing exercise", "Grounding technique"]
        );
    }
}

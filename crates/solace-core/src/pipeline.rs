//! The support decision pipeline.
//!
//! crisis gate → emotion classification → response selection → action
//! suggestion, producing one [`AiResponse`] per call.

use crate::actions::ActionSuggester;
use crate::catalog::SupportCatalog;
use crate::classifier::EmotionClassifier;
use crate::crisis::CrisisGate;
use crate::error::{Result, SolaceError};
use crate::message::ConversationMessage;
use crate::provider::{CompletionProvider, CompletionRequest};
use crate::response::{AiResponse, Assessment};
use crate::selector::ResponseSelector;
use rand::Rng;
use std::sync::Arc;

/// Stateless pipeline over an immutable catalog.
///
/// Cheap to clone and safe to share between conversations; nothing is
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct SupportPipeline {
    catalog: Arc<SupportCatalog>,
    gate: CrisisGate,
    classifier: EmotionClassifier,
}

impl SupportPipeline {
    pub fn new(catalog: Arc<SupportCatalog>) -> Self {
        let gate = CrisisGate::new(&catalog.crisis);
        let classifier = EmotionClassifier::new(&catalog.keywords);
        Self {
            catalog,
            gate,
            classifier,
        }
    }

    /// Pipeline over the bundled catalog.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(SupportCatalog::bundled()?))
    }

    pub fn catalog(&self) -> &SupportCatalog {
        &self.catalog
    }

    pub fn gate(&self) -> &CrisisGate {
        &self.gate
    }

    /// Runs the crisis gate and, when it does not trip, the classifier.
    pub fn assess(&self, utterance: &str) -> Assessment {
        if self.gate.is_crisis(utterance) {
            return Assessment {
                is_crisis: true,
                labels: Default::default(),
            };
        }

        let labels = self.classifier.classify(utterance);
        tracing::debug!(labels = ?labels, "Classified utterance");
        Assessment {
            is_crisis: false,
            labels,
        }
    }

    /// Quick replies for an assessment.
    pub fn suggest_actions(&self, assessment: &Assessment) -> Vec<String> {
        ActionSuggester::new(&self.catalog).suggest(&assessment.labels, assessment.is_crisis)
    }

    /// The fixed crisis reply.
    pub fn crisis_response(&self) -> AiResponse {
        AiResponse {
            text: self.catalog.crisis.message.clone(),
            suggested_actions: self.suggest_actions(&Assessment {
                is_crisis: true,
                labels: Default::default(),
            }),
            requires_crisis_support: true,
        }
    }

    /// Template reply using the supplied random source.
    pub fn respond_with<R: Rng + ?Sized>(
        &self,
        utterance: &str,
        history: &[ConversationMessage],
        rng: &mut R,
    ) -> Result<AiResponse> {
        let assessment = self.assess(utterance);
        if assessment.is_crisis {
            return Ok(self.crisis_response());
        }

        let selection = ResponseSelector::new(&self.catalog).select(
            history,
            &assessment.labels,
            false,
            rng,
        )?;

        Ok(AiResponse {
            text: selection.into_text(),
            suggested_actions: self.suggest_actions(&assessment),
            requires_crisis_support: false,
        })
    }

    /// Template reply using the thread-local generator.
    pub fn respond(&self, utterance: &str, history: &[ConversationMessage]) -> Result<AiResponse> {
        self.respond_with(utterance, history, &mut rand::thread_rng())
    }

    /// Reply whose text comes from a completion provider.
    ///
    /// The gate runs first and a crisis never reaches the provider. Quick
    /// replies are always computed locally. Provider failures are returned
    /// as errors; there is no silent template fallback.
    pub async fn respond_assisted(
        &self,
        utterance: &str,
        history: &[ConversationMessage],
        provider: &dyn CompletionProvider,
    ) -> Result<AiResponse> {
        let assessment = self.assess(utterance);
        if assessment.is_crisis {
            tracing::info!(provider = provider.name(), "Bypassing provider for crisis turn");
            return Ok(self.crisis_response());
        }

        let request = CompletionRequest::build(utterance, history, self.catalog.policy.history_window);
        let text = provider.complete(&request).await?;
        if text.trim().is_empty() {
            return Err(SolaceError::provider(
                None,
                format!("{} returned an empty completion", provider.name()),
                false,
            ));
        }

        Ok(AiResponse {
            text,
            suggested_actions: self.suggest_actions(&assessment),
            requires_crisis_support: false,
        })
    }
}

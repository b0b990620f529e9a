//! Support catalog: loading and validation.
//!
//! A bundled catalog is compiled into the binary and parsed once per process.
//! Alternative catalogs (reduced vocabularies for tests, localized banks) go
//! through the same [`SupportCatalog::from_toml_str`] path and the same
//! validation.

mod model;

pub use model::{
    ActionCatalog, CopingPrompts, CopingToolkit, CrisisConfig, CrisisResources,
    GroundingTechnique, Helpline, LabelTable, ResponseTiers, SelectionPolicy, SessionConfig,
    SupportCatalog,
};

use crate::emotion::EmotionLabel;
use crate::error::{Result, SolaceError};
use once_cell::sync::Lazy;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// Upper bound on prior turns forwarded to a completion provider.
pub const MAX_HISTORY_WINDOW: usize = 10;

/// Upper bound on quick replies attached to any response.
pub const MAX_SUGGESTED_ACTIONS: usize = 3;

const BUNDLED_CATALOG: &str = include_str!("default_catalog.toml");

static BUNDLED: Lazy<Result<Arc<SupportCatalog>>> =
    Lazy::new(|| SupportCatalog::from_toml_str(BUNDLED_CATALOG).map(Arc::new));

impl SupportCatalog {
    /// Returns the catalog bundled with the crate.
    ///
    /// Parsed and validated on first use, then shared for the rest of the
    /// process.
    pub fn bundled() -> Result<Arc<SupportCatalog>> {
        (*BUNDLED).clone()
    }

    /// Parses and validates a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: SupportCatalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Serializes the catalog back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks that every table the pipeline reads from is usable.
    ///
    /// Blank phrases are rejected because an empty string is contained in
    /// every utterance.
    pub fn validate(&self) -> Result<()> {
        non_empty_entries("crisis.phrases", &self.crisis.phrases)?;
        if self.crisis.message.trim().is_empty() {
            return Err(SolaceError::config("crisis.message is empty"));
        }
        non_empty_entries("crisis.actions", &self.crisis.actions)?;

        for label in EmotionLabel::iter() {
            non_empty_entries(&format!("keywords.{label}"), self.keywords.get(label))?;
            no_blank_entries(&format!("actions.labels.{label}"), self.actions.labels.get(label))?;
        }

        let tiers = [
            ("responses.greeting", &self.responses.greeting),
            ("responses.anxiety", &self.responses.anxiety),
            ("responses.depression", &self.responses.depression),
            ("responses.anger", &self.responses.anger),
            ("responses.grief", &self.responses.grief),
            ("responses.supportive", &self.responses.supportive),
            ("responses.encouragement", &self.responses.encouragement),
            ("coping.breathing", &self.coping.breathing),
            ("coping.grounding", &self.coping.grounding),
            ("coping.selfcare", &self.coping.selfcare),
            ("actions.fallback", &self.actions.fallback),
        ];
        for (name, entries) in tiers {
            non_empty_entries(name, entries)?;
        }

        self.policy.validate()?;

        if self.crisis.actions.len() > self.policy.max_suggested_actions {
            return Err(SolaceError::config(format!(
                "crisis.actions has {} entries, more than max_suggested_actions ({})",
                self.crisis.actions.len(),
                self.policy.max_suggested_actions
            )));
        }

        if self.session.welcome.trim().is_empty() {
            return Err(SolaceError::config("session.welcome is empty"));
        }

        Ok(())
    }
}

impl SelectionPolicy {
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("anxiety_coping_probability", self.anxiety_coping_probability),
            ("depression_coping_probability", self.depression_coping_probability),
            ("anger_coping_probability", self.anger_coping_probability),
            ("encouragement_probability", self.encouragement_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(SolaceError::config(format!(
                    "policy.{name} must be within [0, 1], got {p}"
                )));
            }
        }

        if !(1..=MAX_SUGGESTED_ACTIONS).contains(&self.max_suggested_actions) {
            return Err(SolaceError::config(format!(
                "policy.max_suggested_actions must be within [1, {MAX_SUGGESTED_ACTIONS}], got {}",
                self.max_suggested_actions
            )));
        }

        if self.history_window > MAX_HISTORY_WINDOW {
            return Err(SolaceError::config(format!(
                "policy.history_window must be at most {MAX_HISTORY_WINDOW}, got {}",
                self.history_window
            )));
        }

        Ok(())
    }
}

fn non_empty_entries(name: &str, entries: &[String]) -> Result<()> {
    if entries.is_empty() {
        return Err(SolaceError::config(format!("{name} has no entries")));
    }
    no_blank_entries(name, entries)
}

fn no_blank_entries(name: &str, entries: &[String]) -> Result<()> {
    if entries.iter().any(|entry| entry.trim().is_empty()) {
        return Err(SolaceError::config(format!("{name} contains a blank entry")));
    }
    Ok(())
}

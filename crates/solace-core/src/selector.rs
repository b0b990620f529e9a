//! Template response selection.
//!
//! Branches are evaluated in strict priority order and the first match wins:
//!
//! 1. crisis → fixed crisis message
//! 2. anxiety → anxiety tier, maybe + breathing prompt
//! 3. depression → depression tier, maybe + self-care prompt
//! 4. anger → anger tier, maybe + grounding prompt
//! 5. grief → grief tier
//! 6. early conversation → greeting tier
//! 7. otherwise → supportive tier, maybe + encouragement

use crate::catalog::SupportCatalog;
use crate::emotion::{EmotionLabel, EmotionSet};
use crate::error::{Result, SolaceError};
use crate::message::ConversationMessage;
use crate::response::{Selection, TemplateTier};
use rand::Rng;
use rand::seq::SliceRandom;

/// Picks reply text from the catalog's template tiers.
///
/// All randomness comes from the `rng` argument, so a seeded generator
/// reproduces the same reply for the same inputs.
#[derive(Debug, Clone, Copy)]
pub struct ResponseSelector<'a> {
    catalog: &'a SupportCatalog,
}

impl<'a> ResponseSelector<'a> {
    pub fn new(catalog: &'a SupportCatalog) -> Self {
        Self { catalog }
    }

    pub fn select<R: Rng + ?Sized>(
        &self,
        history: &[ConversationMessage],
        labels: &EmotionSet,
        is_crisis: bool,
        rng: &mut R,
    ) -> Result<Selection> {
        let responses = &self.catalog.responses;
        let coping = &self.catalog.coping;
        let policy = &self.catalog.policy;

        if is_crisis {
            return Ok(Selection {
                tier: TemplateTier::Crisis,
                text: self.catalog.crisis.message.clone(),
                appended: false,
            });
        }

        let selection = if labels.contains(&EmotionLabel::Anxiety) {
            self.pick_with_suffix(
                TemplateTier::Anxiety,
                &responses.anxiety,
                ("coping.breathing", coping.breathing.as_slice()),
                policy.anxiety_coping_probability,
                rng,
            )?
        } else if labels.contains(&EmotionLabel::Depression) {
            self.pick_with_suffix(
                TemplateTier::Depression,
                &responses.depression,
                ("coping.selfcare", coping.selfcare.as_slice()),
                policy.depression_coping_probability,
                rng,
            )?
        } else if labels.contains(&EmotionLabel::Anger) {
            self.pick_with_suffix(
                TemplateTier::Anger,
                &responses.anger,
                ("coping.grounding", coping.grounding.as_slice()),
                policy.anger_coping_probability,
                rng,
            )?
        } else if labels.contains(&EmotionLabel::Grief) {
            plain(TemplateTier::Grief, pick(TemplateTier::Grief.as_ref(), &responses.grief, rng)?)
        } else if history.len() <= policy.early_conversation_turns {
            plain(
                TemplateTier::Greeting,
                pick(TemplateTier::Greeting.as_ref(), &responses.greeting, rng)?,
            )
        } else {
            self.pick_with_suffix(
                TemplateTier::Supportive,
                &responses.supportive,
                ("responses.encouragement", responses.encouragement.as_slice()),
                policy.encouragement_probability,
                rng,
            )?
        };

        tracing::debug!(tier = %selection.tier, appended = selection.appended, "Selected template");
        Ok(selection)
    }

    /// Picks a base template, then independently decides whether to append
    /// one entry from `suffixes`.
    fn pick_with_suffix<R: Rng + ?Sized>(
        &self,
        tier: TemplateTier,
        templates: &[String],
        (suffix_name, suffixes): (&str, &[String]),
        probability: f64,
        rng: &mut R,
    ) -> Result<Selection> {
        let mut text = pick(tier.as_ref(), templates, rng)?;
        let appended = rng.gen_bool(probability);
        if appended {
            text.push(' ');
            text.push_str(&pick(suffix_name, suffixes, rng)?);
        }
        Ok(Selection {
            tier,
            text,
            appended,
        })
    }
}

fn plain(tier: TemplateTier, text: String) -> Selection {
    Selection {
        tier,
        text,
        appended: false,
    }
}

/// Uniform pick; an empty tier is a configuration error, never an empty reply.
fn pick<R: Rng + ?Sized>(name: &str, entries: &[String], rng: &mut R) -> Result<String> {
    entries
        .choose(rng)
        .cloned()
        .ok_or_else(|| SolaceError::config(format!("template tier '{name}' has no entries")))
}

//! Emotion labels detected in user utterances.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Topical/affective category detected from keyword presence.
///
/// Declaration order is significant: it is the order in which labels are
/// tested, iterated and used for tie-breaking by the selector and the
/// action suggester.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmotionLabel {
    Anxiety,
    Depression,
    Anger,
    Grief,
    Trauma,
    Relationships,
    Work,
    Family,
}

/// Labels matched for one utterance.
///
/// `Ord` on [`EmotionLabel`] follows declaration order, so iteration is
/// deterministic.
pub type EmotionSet = BTreeSet<EmotionLabel>;

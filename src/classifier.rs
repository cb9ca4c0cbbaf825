//! Intent Classifier
//!
//! Keyword triggers evaluated in a fixed priority order. A query carrying
//! triggers for several intents resolves to the earliest intent listed.

use crate::models::Intent;

/// Priority-ordered trigger sets — zero allocation
pub const INTENT_TRIGGERS: &[(Intent, &[&str])] = &[
    (
        Intent::GetMetric,
        &["what", "show", "tell", "get", "how much", "what's", "give me"],
    ),
    (
        Intent::Compare,
        &["compare", "comparison", "vs", "versus", "difference between"],
    ),
    (
        Intent::Trend,
        &["trend", "change", "growth", "over time", "historical"],
    ),
    (
        Intent::Ranking,
        &["best", "highest", "lowest", "top", "worst", "which", "who"],
    ),
];

/// Intent used when no trigger matches
pub const DEFAULT_INTENT: Intent = Intent::GetMetric;

pub struct IntentClassifier;

impl IntentClassifier {
    pub fn detect_intent(text: &str) -> Intent {
        let lowered = text.to_lowercase();

        INTENT_TRIGGERS
            .iter()
            .find(|(_, triggers)| triggers.iter().any(|t| lowered.contains(t)))
            .map(|(intent, _)| *intent)
            .unwrap_or(DEFAULT_INTENT)
    }
}

//! Named-entity recognition
//!
//! The extractor only needs organization mentions. [`CapitalizedSpanRecognizer`]
//! approximates them from capitalization, which is enough for company names
//! and ticker symbols typed in a question.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntityLabel {
    Organization,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityMention {
    pub text: String,
    pub label: EntityLabel,
}

/// Capability: find labelled entity mentions in raw text
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<EntityMention>;
}

/// Capitalized words that start questions or commands, never organizations
const NON_ENTITY_WORDS: &[&str] = &[
    "a", "an", "and", "are", "can", "compare", "did", "do", "does", "for", "get",
    "give", "has", "how", "i", "in", "is", "list", "me", "of", "please", "show",
    "tell", "the", "what", "what's", "when", "which", "who", "why", "was", "were",
];

/// Reports each run of consecutive capitalized tokens as an organization
#[derive(Debug, Clone, Copy, Default)]
pub struct CapitalizedSpanRecognizer;

impl EntityRecognizer for CapitalizedSpanRecognizer {
    fn recognize(&self, text: &str) -> Vec<EntityMention> {
        let mut mentions = Vec::new();
        let mut span: Vec<&str> = Vec::new();

        for raw in text.split_whitespace() {
            let token = clean_token(raw);

            if is_entity_token(token) {
                span.push(token);
            } else {
                flush(&mut span, &mut mentions);
            }

            // trailing punctuation ends a span
            if raw.ends_with(|c: char| matches!(c, ',' | '.' | '?' | '!' | ';' | ':')) {
                flush(&mut span, &mut mentions);
            }
        }
        flush(&mut span, &mut mentions);

        mentions
    }
}

fn clean_token(raw: &str) -> &str {
    let token = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '’');
    let token = token
        .strip_suffix("'s")
        .or_else(|| token.strip_suffix("’s"))
        .unwrap_or(token);
    token.trim_matches(|c: char| c == '\'' || c == '’')
}

fn is_entity_token(token: &str) -> bool {
    let starts_upper = token.chars().next().is_some_and(char::is_uppercase);
    starts_upper
        && !token.chars().all(|c| c.is_ascii_digit())
        && !NON_ENTITY_WORDS.contains(&token.to_lowercase().as_str())
}

fn flush(span: &mut Vec<&str>, mentions: &mut Vec<EntityMention>) {
    if span.is_empty() {
        return;
    }
    mentions.push(EntityMention {
        text: span.join(" "),
        label: EntityLabel::Organization,
    });
    span.clear();
}

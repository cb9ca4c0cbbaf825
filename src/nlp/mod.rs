//! Text-matching capabilities used by the entity extractor

pub mod recognizer;
pub mod similarity;

pub use recognizer::{CapitalizedSpanRecognizer, EntityLabel, EntityMention, EntityRecognizer};
pub use similarity::{PartialRatio, Similarity};

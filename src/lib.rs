//! Financial Query Engine
//!
//! Answers natural-language questions about Microsoft, Tesla and Apple
//! financials (fiscal years 2022-2024) from a static in-memory dataset.
//!
//! PIPELINE:
//! TEXT → EXTRACT + CLASSIFY → ROUTE → BUILD ANSWER → FORMAT (text + chart)
//!
//! Every stage is a pure function over an immutable [`QueryEngine`], so one
//! engine serves the console loop and concurrent HTTP requests alike.

pub mod answer;
pub mod api;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod formatter;
pub mod models;
pub mod nlp;
pub mod repl;
pub mod router;
pub mod store;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use answer::Answer;
pub use classifier::IntentClassifier;
pub use engine::QueryEngine;
pub use extractor::EntityExtractor;

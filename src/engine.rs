//! Query engine - the single entry point used by every transport
//!
//! TEXT → {EXTRACT, CLASSIFY} → ROUTE → BUILD → FORMAT
//!
//! The engine is an immutable context: construct it once and share it
//! (behind an `Arc`) across threads and requests.

use crate::answer::Answer;
use crate::classifier::IntentClassifier;
use crate::extractor::EntityExtractor;
use crate::models::{ParsedQuery, ResponsePayload};
use crate::router::route;
use crate::store::{FinancialData, StaticFinancialData};
use tracing::debug;

pub struct QueryEngine {
    data: Box<dyn FinancialData>,
    extractor: EntityExtractor,
}

impl QueryEngine {
    pub fn new(data: Box<dyn FinancialData>, extractor: EntityExtractor) -> Self {
        Self { data, extractor }
    }

    /// Engine over the compiled-in dataset with default matching capabilities
    pub fn builtin() -> Self {
        Self::new(
            Box::new(StaticFinancialData::builtin()),
            EntityExtractor::new(),
        )
    }

    pub fn parse(&self, text: &str) -> ParsedQuery {
        ParsedQuery {
            intent: IntentClassifier::detect_intent(text),
            company: self.extractor.extract_company(text),
            year: self.extractor.extract_year(text),
            metric: self.extractor.extract_metric(text),
        }
    }

    pub fn answer(&self, text: &str) -> Answer {
        let parsed = self.parse(text);
        route(&parsed, self.data.as_ref())
    }

    pub fn process(&self, text: &str) -> ResponsePayload {
        let answer = self.answer(text);
        debug!(query = %text, answer = ?answer, "Query processed");
        ResponsePayload::from(answer)
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

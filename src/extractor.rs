//! Entity Extractor
//!
//! Maps raw query text to a company, a fiscal year and a metric.
//!
//! Company resolution runs three tiers, first success wins:
//! 1. case-insensitive substring hit in the alias table
//! 2. organization mentions fuzzy-matched against alias keys (score > 70)
//! 3. canonical names fuzzy-matched against the whole query (score > 80)

use crate::models::{Company, FiscalYear, Metric};
use crate::nlp::{
    CapitalizedSpanRecognizer, EntityLabel, EntityRecognizer, PartialRatio, Similarity,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

pub const MENTION_MATCH_THRESHOLD: f64 = 70.0;
pub const DIRECT_MATCH_THRESHOLD: f64 = 80.0;

/// Alias → company. Longer aliases come first so `ms` never shadows them.
pub const COMPANY_ALIASES: &[(&str, Company)] = &[
    ("microsoft", Company::Microsoft),
    ("tesla", Company::Tesla),
    ("apple", Company::Apple),
    ("msft", Company::Microsoft),
    ("tsla", Company::Tesla),
    ("aapl", Company::Apple),
    ("ms", Company::Microsoft),
];

/// Evaluated top to bottom. Overlaps ("profit", "income") resolve to the
/// earlier metric.
pub const METRIC_SYNONYMS: &[(Metric, &[&str])] = &[
    (Metric::ProfitMargin, &["profit margin", "margin", "profitability", "profit %"]),
    (Metric::NetIncome, &["net income", "net profit", "profit", "earnings", "bottom line"]),
    (Metric::CashFlow, &["cash flow", "operating cash", "cash", "ocf"]),
    (Metric::Roe, &["roe", "return on equity", "equity return"]),
    (Metric::Assets, &["total assets", "assets"]),
    (Metric::Revenue, &["revenue", "sales", "income", "turnover"]),
];

const RECENCY_KEYWORDS: &[&str] = &["latest", "current", "recent", "now", "today"];

lazy_static! {
    static ref YEAR_PATTERN: Regex = {
        let years: Vec<&str> = FiscalYear::ALL.iter().map(|y| y.as_str()).collect();
        Regex::new(&format!(r"(?:^|\D)({})(?:\D|$)", years.join("|")))
            .expect("fiscal year pattern is valid")
    };
}

/// Entity extraction with swappable matching capabilities
pub struct EntityExtractor {
    similarity: Box<dyn Similarity>,
    recognizer: Box<dyn EntityRecognizer>,
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self {
            similarity: Box::new(PartialRatio),
            recognizer: Box::new(CapitalizedSpanRecognizer),
        }
    }

    pub fn with_capabilities(
        similarity: Box<dyn Similarity>,
        recognizer: Box<dyn EntityRecognizer>,
    ) -> Self {
        Self {
            similarity,
            recognizer,
        }
    }

    pub fn extract_company(&self, text: &str) -> Option<Company> {
        let lowered = text.to_lowercase();

        if let Some((alias, company)) = COMPANY_ALIASES
            .iter()
            .find(|(alias, _)| lowered.contains(*alias))
        {
            debug!(alias = %alias, company = %company, "Company resolved by alias");
            return Some(*company);
        }

        for mention in self.recognizer.recognize(text) {
            if mention.label != EntityLabel::Organization {
                continue;
            }
            let normalized = mention.text.trim().to_lowercase();
            if let Some((alias, company, score)) = self.best_alias(&normalized) {
                if score > MENTION_MATCH_THRESHOLD {
                    debug!(
                        mention = %mention.text,
                        alias = %alias,
                        score,
                        "Company resolved by entity mention"
                    );
                    return Some(company);
                }
            }
        }

        for company in Company::ROSTER {
            let score = self
                .similarity
                .score(&company.name().to_lowercase(), &lowered);
            if score > DIRECT_MATCH_THRESHOLD {
                debug!(company = %company, score, "Company resolved by fuzzy match");
                return Some(company);
            }
        }

        None
    }

    /// Highest-scoring alias; ties keep table order
    fn best_alias(&self, mention: &str) -> Option<(&'static str, Company, f64)> {
        let mut best: Option<(&'static str, Company, f64)> = None;
        for (alias, company) in COMPANY_ALIASES {
            let score = self.similarity.score(mention, alias);
            if best.map_or(true, |(_, _, top)| score > top) {
                best = Some((*alias, *company, score));
            }
        }
        best
    }

    /// Never fails: falls back to the most recent year
    pub fn extract_year(&self, text: &str) -> FiscalYear {
        if let Some(year) = YEAR_PATTERN
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| FiscalYear::from_token(m.as_str()))
        {
            return year;
        }

        let lowered = text.to_lowercase();
        if RECENCY_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            return FiscalYear::LATEST;
        }

        FiscalYear::LATEST
    }

    pub fn extract_metric(&self, text: &str) -> Option<Metric> {
        let lowered = text.to_lowercase();

        METRIC_SYNONYMS
            .iter()
            .find(|(_, synonyms)| synonyms.iter().any(|s| lowered.contains(s)))
            .map(|(metric, _)| *metric)
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::EntityMention;

    #[test]
    fn test_every_alias_resolves() {
        let extractor = EntityExtractor::new();
        for (alias, company) in COMPANY_ALIASES {
            assert_eq!(extractor.extract_company(alias), Some(*company), "alias {}", alias);
            assert_eq!(
                extractor.extract_company(&alias.to_uppercase()),
                Some(*company),
                "alias {}",
                alias
            );
        }
    }

    #[test]
    fn test_company_alias_in_sentence() {
        let extractor = EntityExtractor::new();
        assert_eq!(
            extractor.extract_company("What was Microsoft's revenue in 2024?"),
            Some(Company::Microsoft)
        );
        assert_eq!(
            extractor.extract_company("MSFT net income over time"),
            Some(Company::Microsoft)
        );
        assert_eq!(extractor.extract_company("aapl cash flow"), Some(Company::Apple));
        // "systems" contains "ms", but the full name is checked first
        assert_eq!(
            extractor.extract_company("Apple systems revenue"),
            Some(Company::Apple)
        );
    }

    #[test]
    fn test_company_from_entity_mention() {
        let extractor = EntityExtractor::new();
        assert_eq!(
            extractor.extract_company("What is Appl's profit margin?"),
            Some(Company::Apple)
        );
        assert_eq!(
            extractor.extract_company("Show Mircosoft revenue"),
            Some(Company::Microsoft)
        );
    }

    #[test]
    fn test_company_from_direct_fuzzy_match() {
        let extractor = EntityExtractor::new();
        assert_eq!(
            extractor.extract_company("microsft revenue"),
            Some(Company::Microsoft)
        );
    }

    #[test]
    fn test_company_none() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_company("Compare cash flow"), None);
        assert_eq!(extractor.extract_company("hello there"), None);
        assert_eq!(extractor.extract_company(""), None);
    }

    struct FixedRecognizer(Vec<EntityMention>);

    impl EntityRecognizer for FixedRecognizer {
        fn recognize(&self, _text: &str) -> Vec<EntityMention> {
            self.0.clone()
        }
    }

    struct ExactOnly;

    impl Similarity for ExactOnly {
        fn score(&self, a: &str, b: &str) -> f64 {
            if a == b { 100.0 } else { 0.0 }
        }
    }

    #[test]
    fn test_capabilities_are_swappable() {
        let extractor = EntityExtractor::with_capabilities(
            Box::new(ExactOnly),
            Box::new(FixedRecognizer(vec![EntityMention {
                text: "TSLA".to_string(),
                label: EntityLabel::Organization,
            }])),
        );
        // no alias substring in the text; the injected recognizer supplies it
        assert_eq!(extractor.extract_company("that carmaker"), Some(Company::Tesla));

        let strict = EntityExtractor::with_capabilities(
            Box::new(ExactOnly),
            Box::new(FixedRecognizer(vec![])),
        );
        assert_eq!(strict.extract_company("microsft revenue"), None);
    }

    struct FixedScore(f64);

    impl Similarity for FixedScore {
        fn score(&self, _a: &str, _b: &str) -> f64 {
            self.0
        }
    }

    fn carmaker_mention() -> FixedRecognizer {
        FixedRecognizer(vec![EntityMention {
            text: "Carmaker".to_string(),
            label: EntityLabel::Organization,
        }])
    }

    #[test]
    fn test_mention_threshold_is_strict() {
        let at_threshold = EntityExtractor::with_capabilities(
            Box::new(FixedScore(MENTION_MATCH_THRESHOLD)),
            Box::new(carmaker_mention()),
        );
        assert_eq!(at_threshold.extract_company("that carmaker"), None);

        // 70.1 is below the direct threshold, so only the mention tier can match
        let above = EntityExtractor::with_capabilities(
            Box::new(FixedScore(70.1)),
            Box::new(carmaker_mention()),
        );
        assert_eq!(above.extract_company("that carmaker"), Some(Company::Microsoft));
    }

    #[test]
    fn test_direct_threshold_is_strict() {
        let at_threshold = EntityExtractor::with_capabilities(
            Box::new(FixedScore(DIRECT_MATCH_THRESHOLD)),
            Box::new(FixedRecognizer(vec![])),
        );
        assert_eq!(at_threshold.extract_company("that carmaker"), None);

        let above = EntityExtractor::with_capabilities(
            Box::new(FixedScore(80.1)),
            Box::new(FixedRecognizer(vec![])),
        );
        // first company in the roster to clear the bar
        assert_eq!(above.extract_company("that carmaker"), Some(Company::Microsoft));
    }

    #[test]
    fn test_extract_year() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_year("revenue in 2022"), FiscalYear::Fy2022);
        assert_eq!(extractor.extract_year("FY2023 margin"), FiscalYear::Fy2023);
        assert_eq!(extractor.extract_year("2023 vs 2022"), FiscalYear::Fy2023);
        assert_eq!(extractor.extract_year("latest revenue"), FiscalYear::Fy2024);
        assert_eq!(extractor.extract_year("revenue"), FiscalYear::Fy2024);
        // outside the declared domain
        assert_eq!(extractor.extract_year("revenue in 2019"), FiscalYear::Fy2024);
        assert_eq!(extractor.extract_year("id 20225"), FiscalYear::Fy2024);
    }

    #[test]
    fn test_extract_metric() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_metric("Apple revenue"), Some(Metric::Revenue));
        assert_eq!(extractor.extract_metric("tesla SALES"), Some(Metric::Revenue));
        assert_eq!(extractor.extract_metric("net income"), Some(Metric::NetIncome));
        assert_eq!(extractor.extract_metric("bottom line"), Some(Metric::NetIncome));
        assert_eq!(extractor.extract_metric("operating cash"), Some(Metric::CashFlow));
        assert_eq!(extractor.extract_metric("return on equity"), Some(Metric::Roe));
        assert_eq!(extractor.extract_metric("total assets"), Some(Metric::Assets));
        assert_eq!(extractor.extract_metric("hello there"), None);
    }

    #[test]
    fn test_extract_metric_resolution_order() {
        let extractor = EntityExtractor::new();
        // two metrics mentioned: the earlier declared one wins, either way round
        assert_eq!(
            extractor.extract_metric("profit margin and revenue"),
            Some(Metric::ProfitMargin)
        );
        assert_eq!(
            extractor.extract_metric("revenue and profit margin"),
            Some(Metric::ProfitMargin)
        );
        assert_eq!(
            extractor.extract_metric("cash flow vs assets"),
            Some(Metric::CashFlow)
        );
        // "income" is also a revenue synonym
        assert_eq!(extractor.extract_metric("net income"), Some(Metric::NetIncome));
        assert_eq!(extractor.extract_metric("income"), Some(Metric::Revenue));
    }
}

//! Query Router
//!
//! Total, side-effect-free dispatch from a parsed query to an answer builder.

use crate::answer::{build_comparison, build_single_metric, build_trend, Answer, Missing};
use crate::models::{Intent, ParsedQuery};
use crate::store::FinancialData;
use tracing::debug;

pub fn route(query: &ParsedQuery, data: &dyn FinancialData) -> Answer {
    debug!(
        intent = %query.intent,
        company = ?query.company,
        year = %query.year,
        metric = ?query.metric,
        "Routing query"
    );

    match query.intent {
        Intent::Compare | Intent::Ranking => build_comparison(data, query.metric, query.year),
        Intent::Trend => build_trend(data, query.company, query.metric),
        Intent::GetMetric => match (query.company, query.metric) {
            (Some(company), Some(metric)) => build_single_metric(data, company, query.year, metric),
            // nothing recognised at all
            (None, None) => Answer::Help,
            (None, Some(_)) => Answer::Clarification {
                missing: Missing::Company,
            },
            (Some(_), None) => Answer::Clarification {
                missing: Missing::Metric,
            },
        },
    }
}

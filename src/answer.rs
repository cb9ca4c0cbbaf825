//! Answer builders
//!
//! One builder per intent family. Each returns a structured [`Answer`];
//! text and chart output are projections of it (see `formatter`).
//! Builders hold no state and only read the data store.

use crate::models::{Company, FiscalYear, Metric};
use crate::store::FinancialData;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RankMarker {
    Gold,
    Silver,
    Bronze,
}

impl RankMarker {
    pub fn for_position(index: usize) -> Option<Self> {
        match index {
            0 => Some(RankMarker::Gold),
            1 => Some(RankMarker::Silver),
            2 => Some(RankMarker::Bronze),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedEntry {
    pub company: Company,
    pub value: f64,
    pub rank: Option<RankMarker>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub year: FiscalYear,
    pub value: f64,
}

/// Percent change between the earliest and most recent year
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PercentChange {
    pub from: FiscalYear,
    pub to: FiscalYear,
    pub percent: f64,
}

impl PercentChange {
    /// Zero counts as decline
    pub fn is_growth(&self) -> bool {
        self.percent > 0.0
    }
}

/// What was missing from a query that needed it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Missing {
    /// get_metric without a company
    Company,
    /// get_metric without a metric
    Metric,
    /// compare/ranking without a metric
    ComparisonMetric,
    /// trend without a company or a metric
    TrendEntities,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    Metric {
        company: Company,
        year: FiscalYear,
        metric: Metric,
        value: f64,
    },
    /// Entries sorted by value, descending
    Comparison {
        metric: Metric,
        year: FiscalYear,
        entries: Vec<RankedEntry>,
    },
    /// Points in chronological order
    Trend {
        company: Company,
        metric: Metric,
        points: Vec<TrendPoint>,
        change: Option<PercentChange>,
    },
    NoData {
        company: Option<Company>,
        year: Option<FiscalYear>,
        metric: Metric,
    },
    Clarification { missing: Missing },
    Help,
}

pub fn build_single_metric(
    data: &dyn FinancialData,
    company: Company,
    year: FiscalYear,
    metric: Metric,
) -> Answer {
    match data.lookup(company, year, metric) {
        Some(value) => Answer::Metric {
            company,
            year,
            metric,
            value,
        },
        None => Answer::NoData {
            company: Some(company),
            year: Some(year),
            metric,
        },
    }
}

pub fn build_comparison(
    data: &dyn FinancialData,
    metric: Option<Metric>,
    year: FiscalYear,
) -> Answer {
    let Some(metric) = metric else {
        return Answer::Clarification {
            missing: Missing::ComparisonMetric,
        };
    };

    let mut values: Vec<(Company, f64)> = Company::ROSTER
        .iter()
        .filter_map(|company| data.lookup(*company, year, metric).map(|v| (*company, v)))
        .collect();

    if values.is_empty() {
        return Answer::NoData {
            company: None,
            year: Some(year),
            metric,
        };
    }

    // stable: equal values keep roster order
    values.sort_by(|a, b| b.1.total_cmp(&a.1));

    let entries = values
        .into_iter()
        .enumerate()
        .map(|(i, (company, value))| RankedEntry {
            company,
            value,
            rank: RankMarker::for_position(i),
        })
        .collect();

    Answer::Comparison {
        metric,
        year,
        entries,
    }
}

pub fn build_trend(
    data: &dyn FinancialData,
    company: Option<Company>,
    metric: Option<Metric>,
) -> Answer {
    let (Some(company), Some(metric)) = (company, metric) else {
        return Answer::Clarification {
            missing: Missing::TrendEntities,
        };
    };

    let points: Vec<TrendPoint> = FiscalYear::ALL
        .iter()
        .filter_map(|year| {
            data.lookup(company, *year, metric).map(|value| TrendPoint {
                year: *year,
                value,
            })
        })
        .collect();

    if points.is_empty() {
        return Answer::NoData {
            company: Some(company),
            year: None,
            metric,
        };
    }

    let start = data.lookup(company, FiscalYear::EARLIEST, metric);
    let end = data.lookup(company, FiscalYear::LATEST, metric);
    let change = match (start, end) {
        (Some(start), Some(end)) if start != 0.0 => Some(PercentChange {
            from: FiscalYear::EARLIEST,
            to: FiscalYear::LATEST,
            percent: (end - start) / start.abs() * 100.0,
        }),
        _ => None,
    };

    Answer::Trend {
        company,
        metric,
        points,
        change,
    }
}

//! Core data models for the financial query engine

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Company =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Company {
    Microsoft,
    Tesla,
    Apple,
}

impl Company {
    /// Fixed roster. Comparison ties keep this order.
    pub const ROSTER: [Company; 3] = [Company::Microsoft, Company::Tesla, Company::Apple];

    pub fn name(&self) -> &'static str {
        match self {
            Company::Microsoft => "Microsoft",
            Company::Tesla => "Tesla",
            Company::Apple => "Apple",
        }
    }
}

//
// ================= Fiscal Year =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FiscalYear {
    #[serde(rename = "2022")]
    Fy2022,
    #[serde(rename = "2023")]
    Fy2023,
    #[serde(rename = "2024")]
    Fy2024,
}

impl FiscalYear {
    /// Chronological order.
    pub const ALL: [FiscalYear; 3] = [FiscalYear::Fy2022, FiscalYear::Fy2023, FiscalYear::Fy2024];

    pub const EARLIEST: FiscalYear = FiscalYear::Fy2022;
    pub const LATEST: FiscalYear = FiscalYear::Fy2024;

    pub fn as_str(&self) -> &'static str {
        match self {
            FiscalYear::Fy2022 => "2022",
            FiscalYear::Fy2023 => "2023",
            FiscalYear::Fy2024 => "2024",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|year| year.as_str() == token)
    }
}

impl Default for FiscalYear {
    fn default() -> Self {
        FiscalYear::LATEST
    }
}

//
// ================= Metric =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MetricUnit {
    /// Currency, in millions
    Currency,
    Percentage,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Revenue,
    NetIncome,
    ProfitMargin,
    CashFlow,
    Roe,
    Assets,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Revenue,
        Metric::NetIncome,
        Metric::ProfitMargin,
        Metric::CashFlow,
        Metric::Roe,
        Metric::Assets,
    ];

    pub fn unit(&self) -> MetricUnit {
        match self {
            Metric::Revenue | Metric::NetIncome | Metric::CashFlow | Metric::Assets => {
                MetricUnit::Currency
            }
            Metric::ProfitMargin | Metric::Roe => MetricUnit::Percentage,
        }
    }

    /// Title-case label used in headers and chart titles
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Revenue => "Revenue",
            Metric::NetIncome => "Net Income",
            Metric::ProfitMargin => "Profit Margin",
            Metric::CashFlow => "Cash Flow",
            Metric::Roe => "ROE",
            Metric::Assets => "Assets",
        }
    }

    /// Label for use inside a sentence
    pub fn phrase(&self) -> &'static str {
        match self {
            Metric::Revenue => "revenue",
            Metric::NetIncome => "net income",
            Metric::ProfitMargin => "profit margin",
            Metric::CashFlow => "cash flow",
            Metric::Roe => "ROE",
            Metric::Assets => "assets",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Metric::Revenue => "revenue",
            Metric::NetIncome => "net_income",
            Metric::ProfitMargin => "profit_margin",
            Metric::CashFlow => "cash_flow",
            Metric::Roe => "roe",
            Metric::Assets => "assets",
        }
    }
}

//
// ================= Intent & Parsed Query =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    GetMetric,
    Compare,
    Trend,
    /// Answered exactly like `Compare`
    Ranking,
}

/// Per-request parse result. Never outlives the request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedQuery {
    pub intent: Intent,
    pub company: Option<Company>,
    /// Always populated; defaults to the most recent year
    pub year: FiscalYear,
    pub metric: Option<Metric>,
}

//
// ================= Response =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    #[serde(rename = "name")]
    pub label: String,
    pub value: f64,
}

/// Presentation-agnostic chart handed to a rendering collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartDescriptor {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    #[serde(rename = "data")]
    pub series: Vec<ChartPoint>,
    #[serde(rename = "yLabel")]
    pub y_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponsePayload {
    pub text: String,
    pub visualization: Option<ChartDescriptor>,
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::GetMetric => "get_metric",
            Intent::Compare => "compare",
            Intent::Trend => "trend",
            Intent::Ranking => "ranking",
        };
        write!(f, "{}", s)
    }
}

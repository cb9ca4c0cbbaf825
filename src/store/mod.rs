//! Financial data store
//!
//! Read-only `company → year → metric → value` table. Fixed at startup and
//! never mutated afterwards, so it is shared across requests without locking.

use crate::error::QueryEngineError;
use crate::models::{Company, FiscalYear, Metric};
use crate::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Lookup contract required by the answer builders.
/// Absence is a normal outcome, not an error.
pub trait FinancialData: Send + Sync {
    fn lookup(&self, company: Company, year: FiscalYear, metric: Metric) -> Option<f64>;
}

type NestedTable = HashMap<Company, HashMap<FiscalYear, HashMap<Metric, f64>>>;

/// In-memory financial table
#[derive(Debug, Clone, Default)]
pub struct StaticFinancialData {
    records: HashMap<(Company, FiscalYear, Metric), f64>,
}

/// Columns: revenue, net_income, profit_margin, cash_flow, roe, assets
const BUILTIN_ROWS: &[(Company, FiscalYear, [f64; 6])] = &[
    (Company::Microsoft, FiscalYear::Fy2024, [245122.0, 88136.0, 36.0, 118000.0, 52.8, 512163.0]),
    (Company::Microsoft, FiscalYear::Fy2023, [211915.0, 72361.0, 34.2, 87582.0, 45.2, 411976.0]),
    (Company::Microsoft, FiscalYear::Fy2022, [198270.0, 72738.0, 36.7, 89035.0, 43.6, 364840.0]),
    (Company::Tesla, FiscalYear::Fy2024, [97690.0, 7091.0, 7.3, 14900.0, 9.6, 122070.0]),
    (Company::Tesla, FiscalYear::Fy2023, [96773.0, 14997.0, 15.5, 13256.0, 23.6, 106618.0]),
    (Company::Tesla, FiscalYear::Fy2022, [81462.0, 12556.0, 15.4, 14724.0, 27.4, 82338.0]),
    (Company::Apple, FiscalYear::Fy2024, [391035.0, 93736.0, 24.0, 118254.0, 164.6, 364980.0]),
    (Company::Apple, FiscalYear::Fy2023, [383285.0, 96995.0, 25.3, 110543.0, 171.7, 352583.0]),
    (Company::Apple, FiscalYear::Fy2022, [394328.0, 99803.0, 25.3, 122151.0, 196.1, 352755.0]),
];

impl StaticFinancialData {
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled-in dataset (fiscal years 2022-2024)
    pub fn builtin() -> Self {
        let mut data = Self::new();
        for (company, year, values) in BUILTIN_ROWS {
            for (metric, value) in Metric::ALL.iter().zip(values.iter()) {
                data.insert(*company, *year, *metric, *value);
            }
        }
        data
    }

    /// Parse the nested `{"Apple": {"2024": {"revenue": 1.0}}}` layout
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let nested: NestedTable = serde_json::from_str(raw)?;

        let mut data = Self::new();
        for (company, years) in nested {
            for (year, metrics) in years {
                for (metric, value) in metrics {
                    if !value.is_finite() {
                        return Err(QueryEngineError::DataError(format!(
                            "{} {} {} is not a finite number",
                            company,
                            year,
                            metric.key()
                        )));
                    }
                    data.insert(company, year, metric, value);
                }
            }
        }

        Ok(data)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QueryEngineError::DataError(format!(
                "Failed to read dataset {}: {}",
                path.display(),
                e
            ))
        })?;

        let data = Self::from_json_str(&raw)?;
        info!(path = %path.display(), records = data.len(), "Loaded financial dataset");
        Ok(data)
    }

    pub fn insert(&mut self, company: Company, year: FiscalYear, metric: Metric, value: f64) {
        self.records.insert((company, year, metric), value);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FinancialData for StaticFinancialData {
    fn lookup(&self, company: Company, year: FiscalYear, metric: Metric) -> Option<f64> {
        self.records.get(&(company, year, metric)).copied()
    }
}

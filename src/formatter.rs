//! Response Formatter
//!
//! Renders an [`Answer`] two ways: display text and an optional chart.
//! Both projections read the same structured answer, so the chart series
//! always matches the figures quoted in the text, in the same order.

use crate::answer::{Answer, Missing, PercentChange, RankMarker, RankedEntry, TrendPoint};
use crate::models::{
    ChartDescriptor, ChartKind, ChartPoint, Company, FiscalYear, Metric, MetricUnit,
    ResponsePayload,
};

pub const HELP_TEXT: &str = "💡 **I can help you with financial insights! Try questions like:**

**Specific Queries:**
- \"What was Microsoft's revenue in 2024?\"
- \"Show me Apple's profit margin\"
- \"Tesla cash flow\"

**Comparisons:**
- \"Compare profit margins\"
- \"Which company has the best revenue?\"

**Trends:**
- \"Apple revenue growth\"
- \"Tesla net income over time\"

**Flexible Queries:**
- Works with company abbreviations (MSFT, AAPL, TSLA)
- Case-insensitive
- Handles typos and variations

Ask me anything about Microsoft, Tesla, or Apple! 💼";

/// Whole millions with thousands separators, e.g. `$245,122M`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}M", sign, group_thousands(rounded.abs() as u64))
}

/// One decimal place, e.g. `36.0%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_value(metric: Metric, value: f64) -> String {
    match metric.unit() {
        MetricUnit::Currency => format_currency(value),
        MetricUnit::Percentage => format_percentage(value),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn rank_symbol(rank: Option<RankMarker>) -> &'static str {
    match rank {
        Some(RankMarker::Gold) => "🥇",
        Some(RankMarker::Silver) => "🥈",
        Some(RankMarker::Bronze) => "🥉",
        None => "  ",
    }
}

fn metric_context(company: Company, metric: Metric, formatted: &str) -> String {
    match metric {
        Metric::Revenue => {
            "💡 This represents the total revenue generated during the fiscal year.".to_string()
        }
        Metric::NetIncome => {
            "💡 This is the company's bottom-line profit after all expenses.".to_string()
        }
        Metric::ProfitMargin => {
            format!("💡 {} keeps {} of every dollar as profit.", company, formatted)
        }
        Metric::CashFlow => {
            "💡 This shows cash generated from core business operations.".to_string()
        }
        Metric::Roe => {
            "💡 ROE measures how efficiently the company generates profits from equity."
                .to_string()
        }
        Metric::Assets => {
            "💡 This is the total value of everything the company owns at fiscal year end."
                .to_string()
        }
    }
}

//
// ================= Text =================
//

pub fn render_text(answer: &Answer) -> String {
    match answer {
        Answer::Metric {
            company,
            year,
            metric,
            value,
        } => {
            let formatted = format_value(*metric, *value);
            format!(
                "📊 **{}'s {} in {}:**\n   {}\n\n{}",
                company,
                metric.label(),
                year,
                formatted,
                metric_context(*company, *metric, &formatted)
            )
        }
        Answer::Comparison {
            metric,
            year,
            entries,
        } => render_comparison(*metric, *year, entries),
        Answer::Trend {
            company,
            metric,
            points,
            change,
        } => render_trend(*company, *metric, points, change.as_ref()),
        Answer::NoData {
            company,
            year,
            metric,
        } => match (company, year) {
            (Some(company), Some(year)) => format!(
                "Sorry, I don't have {} data for {} in {}.",
                metric.phrase(),
                company,
                year
            ),
            (None, Some(year)) => format!(
                "Sorry, I don't have {} data for any company in {}.",
                metric.phrase(),
                year
            ),
            (Some(company), None) => format!(
                "Sorry, I don't have any {} data for {}.",
                metric.phrase(),
                company
            ),
            (None, None) => format!("Sorry, I don't have any {} data.", metric.phrase()),
        },
        Answer::Clarification { missing } => clarification_text(*missing).to_string(),
        Answer::Help => HELP_TEXT.to_string(),
    }
}

fn render_comparison(metric: Metric, year: FiscalYear, entries: &[RankedEntry]) -> String {
    let mut out = format!("📊 **{} Comparison ({}):**\n\n", metric.label(), year);

    for entry in entries {
        out.push_str(&format!(
            "{} **{}**: {}\n",
            rank_symbol(entry.rank),
            entry.company,
            format_value(metric, entry.value)
        ));
    }

    if let Some(leader) = entries.first() {
        out.push_str(&format!(
            "\n💡 **{}** leads in {} for {}.",
            leader.company,
            metric.phrase(),
            year
        ));
    }

    out
}

fn render_trend(
    company: Company,
    metric: Metric,
    points: &[TrendPoint],
    change: Option<&PercentChange>,
) -> String {
    let mut out = format!(
        "📈 **{}'s {} Trend ({}-{}):**\n\n",
        company,
        metric.label(),
        FiscalYear::EARLIEST,
        FiscalYear::LATEST
    );

    for point in points {
        out.push_str(&format!(
            "- **{}**: {}\n",
            point.year,
            format_value(metric, point.value)
        ));
    }

    if let Some(change) = change {
        if change.is_growth() {
            out.push_str(&format!(
                "\n📈 **Growth**: {:.1}% increase from {} to {}",
                change.percent.abs(),
                change.from,
                change.to
            ));
        } else {
            out.push_str(&format!(
                "\n📉 **Decline**: {:.1}% decrease from {} to {}",
                change.percent.abs(),
                change.from,
                change.to
            ));
        }
    }

    out
}

fn clarification_text(missing: Missing) -> &'static str {
    match missing {
        Missing::Company => {
            "I couldn't tell which company you mean. Try Microsoft, Tesla or Apple (MSFT, TSLA, AAPL)."
        }
        Missing::Metric => {
            "I couldn't tell which metric you mean. Try revenue, net income, profit margin, cash flow, ROE or assets."
        }
        Missing::ComparisonMetric => {
            "Please specify which metric you'd like to compare (e.g., revenue, profit margin)."
        }
        Missing::TrendEntities => "Please specify both a company and metric for trend analysis.",
    }
}

//
// ================= Chart =================
//

pub fn chart_for(answer: &Answer) -> Option<ChartDescriptor> {
    match answer {
        Answer::Metric {
            company,
            year,
            metric,
            value,
        } => Some(ChartDescriptor {
            kind: ChartKind::Bar,
            title: format!("{} {} ({})", company, metric.label(), year),
            series: vec![ChartPoint {
                label: company.to_string(),
                value: *value,
            }],
            y_label: metric.label().to_string(),
        }),
        Answer::Comparison {
            metric,
            year,
            entries,
        } => Some(ChartDescriptor {
            kind: ChartKind::Bar,
            title: format!("{} Comparison ({})", metric.label(), year),
            series: entries
                .iter()
                .map(|e| ChartPoint {
                    label: e.company.to_string(),
                    value: e.value,
                })
                .collect(),
            y_label: metric.label().to_string(),
        }),
        Answer::Trend {
            company,
            metric,
            points,
            ..
        } => Some(ChartDescriptor {
            kind: ChartKind::Line,
            title: format!("{} {} Trend", company, metric.label()),
            series: points
                .iter()
                .map(|p| ChartPoint {
                    label: p.year.to_string(),
                    value: p.value,
                })
                .collect(),
            y_label: metric.label().to_string(),
        }),
        Answer::NoData { .. } | Answer::Clarification { .. } | Answer::Help => None,
    }
}

impl From<&Answer> for ResponsePayload {
    fn from(answer: &Answer) -> Self {
        Self {
            text: render_text(answer),
            visualization: chart_for(answer),
        }
    }
}

impl From<Answer> for ResponsePayload {
    fn from(answer: Answer) -> Self {
        Self::from(&answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::{build_comparison, build_trend};
    use crate::store::StaticFinancialData;

    fn parse_millions(formatted: &str) -> i64 {
        let digits: String = formatted
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-')
            .collect();
        digits.parse().unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(245122.0), "$245,122M");
        assert_eq!(format_currency(7091.0), "$7,091M");
        assert_eq!(format_currency(512.0), "$512M");
        assert_eq!(format_currency(1234567.0), "$1,234,567M");
        assert_eq!(format_currency(-5465.0), "-$5,465M");
        assert_eq!(format_currency(0.0), "$0M");
    }

    #[test]
    fn test_currency_round_trip() {
        for value in [0_i64, 7, 999, 1000, 14900, 118254, 512163, 1_000_000, -7091] {
            assert_eq!(parse_millions(&format_currency(value as f64)), value);
        }
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(36.0), "36.0%");
        assert_eq!(format_percentage(164.6), "164.6%");
        assert_eq!(format_percentage(9.96), "10.0%");
        assert_eq!(format_value(Metric::Roe, 52.8), "52.8%");
        assert_eq!(format_value(Metric::Assets, 82338.0), "$82,338M");
    }

    #[test]
    fn test_metric_text_and_chart() {
        let answer = Answer::Metric {
            company: Company::Apple,
            year: FiscalYear::Fy2024,
            metric: Metric::ProfitMargin,
            value: 24.0,
        };
        let payload = ResponsePayload::from(&answer);

        assert!(payload.text.contains("Apple's Profit Margin in 2024"));
        assert!(payload.text.contains("Apple keeps 24.0% of every dollar as profit."));

        let chart = payload.visualization.unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].label, "Apple");
    }

    #[test]
    fn test_comparison_text_matches_chart_order() {
        let data = StaticFinancialData::builtin();
        let answer = build_comparison(&data, Some(Metric::Roe), FiscalYear::Fy2024);
        let payload = ResponsePayload::from(&answer);

        assert!(payload.text.contains("🥇 **Apple**: 164.6%"));
        assert!(payload.text.contains("🥈 **Microsoft**: 52.8%"));
        assert!(payload.text.contains("🥉 **Tesla**: 9.6%"));
        assert!(payload.text.contains("**Apple** leads in ROE for 2024."));

        let chart = payload.visualization.unwrap();
        let labels: Vec<&str> = chart.series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Apple", "Microsoft", "Tesla"]);

        let first = payload.text.find("Apple").unwrap();
        let second = payload.text.find("Microsoft").unwrap();
        let third = payload.text.find("Tesla").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_trend_text() {
        let data = StaticFinancialData::builtin();
        let answer = build_trend(&data, Some(Company::Microsoft), Some(Metric::Revenue));
        let payload = ResponsePayload::from(&answer);

        assert!(payload.text.contains("- **2022**: $198,270M"));
        assert!(payload.text.contains("- **2024**: $245,122M"));
        // (245122 - 198270) / 198270 = 23.6%
        assert!(payload.text.contains("**Growth**: 23.6% increase from 2022 to 2024"));

        let chart = payload.visualization.unwrap();
        assert_eq!(chart.kind, ChartKind::Line);
        let labels: Vec<&str> = chart.series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2022", "2023", "2024"]);
    }

    #[test]
    fn test_trend_decline_and_flat() {
        let flat = Answer::Trend {
            company: Company::Tesla,
            metric: Metric::Assets,
            points: vec![],
            change: Some(PercentChange {
                from: FiscalYear::Fy2022,
                to: FiscalYear::Fy2024,
                percent: 0.0,
            }),
        };
        assert!(render_text(&flat).contains("**Decline**: 0.0% decrease"));
    }

    #[test]
    fn test_trend_without_change_has_no_clause() {
        let answer = Answer::Trend {
            company: Company::Tesla,
            metric: Metric::Assets,
            points: vec![TrendPoint {
                year: FiscalYear::Fy2023,
                value: 106618.0,
            }],
            change: None,
        };
        let text = render_text(&answer);
        assert!(!text.contains("Growth"));
        assert!(!text.contains("Decline"));
    }

    #[test]
    fn test_textual_answers_have_no_chart() {
        for answer in [
            Answer::Help,
            Answer::Clarification {
                missing: Missing::TrendEntities,
            },
            Answer::NoData {
                company: Some(Company::Tesla),
                year: Some(FiscalYear::Fy2022),
                metric: Metric::Roe,
            },
        ] {
            assert!(chart_for(&answer).is_none());
        }

        assert_eq!(render_text(&Answer::Help), HELP_TEXT);
        assert_eq!(
            render_text(&Answer::NoData {
                company: Some(Company::Tesla),
                year: Some(FiscalYear::Fy2022),
                metric: Metric::Roe,
            }),
            "Sorry, I don't have ROE data for Tesla in 2022."
        );
    }
}

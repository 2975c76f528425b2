//! Text rendering of calculation results
//!
//! Formats metrics the way the planner dashboard shows them: currency with
//! thousands separators, percentages at per-metric precision, FX to 4 places.

use crate::engine::{Metric, MetricsResult, Unit};
use crate::scenario::ScenarioComparison;

/// Format with a fixed number of decimals and `,` thousands separators
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // Avoid "-0.00" after rounding
    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_usd(value: f64) -> String {
    format!("${}", format_thousands(value, 2))
}

pub fn format_inr(value: f64) -> String {
    format!("₹{}", format_thousands(value, 2))
}

fn percent_decimals(metric: Metric) -> usize {
    match metric {
        Metric::TargetMarginPercent | Metric::IgstPercent | Metric::PassThroughRate => 0,
        Metric::AdjustedMarginPercent | Metric::BcdPercent => 1,
        _ => 2,
    }
}

/// Display string for one metric value
pub fn format_metric(metric: Metric, value: f64) -> String {
    match metric.unit() {
        Unit::Usd => format_usd(value),
        Unit::Inr => format_inr(value),
        Unit::Percent => format!("{:.*}%", percent_decimals(metric), value),
        Unit::Rate => format!("{:.4}", value),
        Unit::Units => format_thousands(value.trunc(), 0),
    }
}

/// Every metric as (label, formatted value), in dashboard order
pub fn metric_rows(result: &MetricsResult) -> Vec<(&'static str, String)> {
    Metric::ALL
        .iter()
        .map(|m| (m.label(), format_metric(*m, result.get(*m))))
        .collect()
}

/// One slice of the landed cost breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub component: &'static str,
    pub amount_usd: f64,
    /// Share of landed cost in percent (0 when landed cost is 0)
    pub share_percent: f64,
}

pub fn breakdown_rows(result: &MetricsResult) -> Vec<BreakdownRow> {
    let total = result.landed_cost_usd;
    result
        .cost_breakdown()
        .iter()
        .map(|(component, amount)| BreakdownRow {
            component: component.label(),
            amount_usd: *amount,
            share_percent: if total != 0.0 { amount / total * 100.0 } else { 0.0 },
        })
        .collect()
}

/// (label, current, updated) for every metric a scenario can move
pub fn comparison_rows(comparison: &ScenarioComparison) -> Vec<(&'static str, String, String)> {
    Metric::ALL
        .iter()
        .filter(|m| !matches!(m, Metric::Volume | Metric::PassThroughRate))
        .map(|m| {
            (
                m.label(),
                format_metric(*m, comparison.baseline.get(*m)),
                format_metric(*m, comparison.scenario.get(*m)),
            )
        })
        .collect()
}

/// Left-aligned first column, right-aligned value columns
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let pad = widths[i].saturating_sub(cell.chars().count());
                if i == 0 {
                    format!("{}{}", cell, " ".repeat(pad))
                } else {
                    format!("{}{}", " ".repeat(pad), cell)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = render_row(headers.to_vec());
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * columns.saturating_sub(1)));
    for row in rows {
        out.push('\n');
        out.push_str(&render_row(row.iter().map(String::as_str).collect()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ProductRecord, TariffRecord};
    use crate::engine::{compute, OverrideSet};
    use approx::assert_relative_eq;

    fn reference_result() -> MetricsResult {
        let product = ProductRecord {
            hs_code: "85171300".into(),
            importing_country: "IN".into(),
            country_of_origin: "VN".into(),
            base_price_usd: Some(100.0),
            freight_usd: Some(10.0),
            insurance_percent: Some(2.0),
            fx_rate: Some(80.0),
            bcd_percent: Some(10.0),
            igst_percent: Some(18.0),
            additional_duty_percent: None,
            fta_eligibility: false,
            fta_reduction_percent: None,
            volume_units: Some(1000.0),
            target_margin_percent: Some(20.0),
        };
        let tariff = TariffRecord {
            hs_code: "85171300".into(),
            country: "IN".into(),
            exporting_country: "VN".into(),
            fta_duty_rate_percent: None,
        };
        compute(&product, &tariff, &OverrideSet::default()).unwrap()
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(999.999, 2), "1,000.00");
        assert_eq!(format_thousands(12.0, 0), "12");
        assert_eq!(format_thousands(-10000.0, 2), "-10,000.00");
        assert_eq!(format_thousands(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(Metric::LandedCostUsd, 143.96), "$143.96");
        assert_eq!(format_metric(Metric::LandedCostInr, 11516.8), "₹11,516.80");
        assert_eq!(format_metric(Metric::AdjustedMarginPercent, 14.0), "14.0%");
        assert_eq!(format_metric(Metric::IgstPercent, 18.0), "18%");
        assert_eq!(format_metric(Metric::FxRate, 80.0), "80.0000");
        assert_eq!(format_metric(Metric::Volume, 12500.7), "12,500");
    }

    #[test]
    fn test_metric_rows_cover_everything() {
        let rows = metric_rows(&reference_result());
        assert_eq!(rows.len(), 24);
        assert_eq!(rows[0], ("Landed Cost (INR)", "₹11,516.80".to_string()));
        assert!(rows.contains(&("Profit (INR)", "₹2,303.36".to_string())));
    }

    #[test]
    fn test_breakdown_shares_sum_to_100() {
        let rows = breakdown_rows(&reference_result());
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].component, "Base Price");
        let total: f64 = rows.iter().map(|r| r.share_percent).sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_render_table_alignment() {
        let table = render_table(
            &["Metric", "Value"],
            &[vec!["FX Rate".into(), "80.0000".into()], vec!["BCD".into(), "10%".into()]],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Metric     Value");
        assert_eq!(lines[2], "FX Rate  80.0000");
        assert_eq!(lines[3], "BCD          10%");
    }
}

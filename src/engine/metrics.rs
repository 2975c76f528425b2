//! Output of a landed cost calculation

use serde::{Deserialize, Serialize};

/// Every derived metric of one calculation
///
/// USD amounts are per unit unless the name says otherwise
/// (`total_duty_exposure_usd` and `fta_savings_usd` are scaled by volume).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub base_price_usd: f64,
    pub freight_usd: f64,
    pub insurance_usd: f64,
    /// Effective BCD rate (FTA rate when it applies)
    pub bcd_percent: f64,
    pub igst_percent: f64,
    pub bcd_amount: f64,
    pub igst_amount: f64,
    pub additional_duty: f64,
    pub total_duties: f64,
    pub landed_cost_usd: f64,
    pub landed_cost_inr: f64,
    pub fx_rate: f64,
    pub volume: f64,
    pub target_margin_percent: f64,
    pub adjusted_margin_percent: f64,
    pub target_selling_price_inr: f64,
    pub profit_inr: f64,
    pub fx_impact_inr: f64,
    pub logistics_impact_usd: f64,
    pub duty_impact_usd: f64,
    pub total_duty_exposure_usd: f64,
    pub fta_savings_usd: f64,
    pub duty_impact_percent: f64,
    pub pass_through_rate: f64,
}

/// Named handle to one field of [`MetricsResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    BasePriceUsd,
    FreightUsd,
    InsuranceUsd,
    BcdPercent,
    IgstPercent,
    BcdAmount,
    IgstAmount,
    AdditionalDuty,
    TotalDuties,
    LandedCostUsd,
    LandedCostInr,
    FxRate,
    Volume,
    TargetMarginPercent,
    AdjustedMarginPercent,
    TargetSellingPriceInr,
    ProfitInr,
    FxImpactInr,
    LogisticsImpactUsd,
    DutyImpactUsd,
    TotalDutyExposureUsd,
    FtaSavingsUsd,
    DutyImpactPercent,
    PassThroughRate,
}

/// How a metric's value is denominated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Usd,
    Inr,
    Percent,
    Rate,
    Units,
}

impl Metric {
    /// Dashboard order: headline figures first, then components, then deltas
    pub const ALL: [Metric; 24] = [
        Metric::LandedCostInr,
        Metric::LandedCostUsd,
        Metric::TargetSellingPriceInr,
        Metric::ProfitInr,
        Metric::TargetMarginPercent,
        Metric::AdjustedMarginPercent,
        Metric::FreightUsd,
        Metric::InsuranceUsd,
        Metric::BcdPercent,
        Metric::IgstPercent,
        Metric::BcdAmount,
        Metric::IgstAmount,
        Metric::AdditionalDuty,
        Metric::TotalDuties,
        Metric::BasePriceUsd,
        Metric::Volume,
        Metric::FxRate,
        Metric::FxImpactInr,
        Metric::LogisticsImpactUsd,
        Metric::DutyImpactUsd,
        Metric::TotalDutyExposureUsd,
        Metric::FtaSavingsUsd,
        Metric::DutyImpactPercent,
        Metric::PassThroughRate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::BasePriceUsd => "Base Price (USD)",
            Metric::FreightUsd => "Freight Cost (USD)",
            Metric::InsuranceUsd => "Insurance Cost (USD)",
            Metric::BcdPercent => "BCD (%)",
            Metric::IgstPercent => "IGST (%)",
            Metric::BcdAmount => "BCD Amount (USD)",
            Metric::IgstAmount => "IGST Amount (USD)",
            Metric::AdditionalDuty => "Additional Duty (USD)",
            Metric::TotalDuties => "Total Duties & Taxes (USD)",
            Metric::LandedCostUsd => "Landed Cost (USD)",
            Metric::LandedCostInr => "Landed Cost (INR)",
            Metric::FxRate => "FX Rate",
            Metric::Volume => "Volume Units",
            Metric::TargetMarginPercent => "Target Margin (%)",
            Metric::AdjustedMarginPercent => "Adjusted Margin (%)",
            Metric::TargetSellingPriceInr => "Target Selling Price (INR)",
            Metric::ProfitInr => "Profit (INR)",
            Metric::FxImpactInr => "FX Impact (per unit INR)",
            Metric::LogisticsImpactUsd => "Logistics Impact (USD)",
            Metric::DutyImpactUsd => "Duty Impact (USD)",
            Metric::TotalDutyExposureUsd => "Total Duty Exposure (USD)",
            Metric::FtaSavingsUsd => "FTA Savings (USD)",
            Metric::DutyImpactPercent => "Duty Impact (%)",
            Metric::PassThroughRate => "Pass Through Rate (%)",
        }
    }

    /// Field name in serialized output
    pub fn key(&self) -> &'static str {
        match self {
            Metric::BasePriceUsd => "base_price_usd",
            Metric::FreightUsd => "freight_usd",
            Metric::InsuranceUsd => "insurance_usd",
            Metric::BcdPercent => "bcd_percent",
            Metric::IgstPercent => "igst_percent",
            Metric::BcdAmount => "bcd_amount",
            Metric::IgstAmount => "igst_amount",
            Metric::AdditionalDuty => "additional_duty",
            Metric::TotalDuties => "total_duties",
            Metric::LandedCostUsd => "landed_cost_usd",
            Metric::LandedCostInr => "landed_cost_inr",
            Metric::FxRate => "fx_rate",
            Metric::Volume => "volume",
            Metric::TargetMarginPercent => "target_margin_percent",
            Metric::AdjustedMarginPercent => "adjusted_margin_percent",
            Metric::TargetSellingPriceInr => "target_selling_price_inr",
            Metric::ProfitInr => "profit_inr",
            Metric::FxImpactInr => "fx_impact_inr",
            Metric::LogisticsImpactUsd => "logistics_impact_usd",
            Metric::DutyImpactUsd => "duty_impact_usd",
            Metric::TotalDutyExposureUsd => "total_duty_exposure_usd",
            Metric::FtaSavingsUsd => "fta_savings_usd",
            Metric::DutyImpactPercent => "duty_impact_percent",
            Metric::PassThroughRate => "pass_through_rate",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            Metric::LandedCostInr
            | Metric::TargetSellingPriceInr
            | Metric::ProfitInr
            | Metric::FxImpactInr => Unit::Inr,
            Metric::BcdPercent
            | Metric::IgstPercent
            | Metric::TargetMarginPercent
            | Metric::AdjustedMarginPercent
            | Metric::DutyImpactPercent
            | Metric::PassThroughRate => Unit::Percent,
            Metric::FxRate => Unit::Rate,
            Metric::Volume => Unit::Units,
            _ => Unit::Usd,
        }
    }
}

/// The six components that add up to landed cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostComponent {
    BasePrice,
    Freight,
    Insurance,
    Bcd,
    Igst,
    AdditionalDuty,
}

impl CostComponent {
    pub fn label(&self) -> &'static str {
        match self {
            CostComponent::BasePrice => "Base Price",
            CostComponent::Freight => "Freight Cost",
            CostComponent::Insurance => "Insurance Cost",
            CostComponent::Bcd => "BCD Amount",
            CostComponent::Igst => "IGST Amount",
            CostComponent::AdditionalDuty => "Additional Duty",
        }
    }
}

impl MetricsResult {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::BasePriceUsd => self.base_price_usd,
            Metric::FreightUsd => self.freight_usd,
            Metric::InsuranceUsd => self.insurance_usd,
            Metric::BcdPercent => self.bcd_percent,
            Metric::IgstPercent => self.igst_percent,
            Metric::BcdAmount => self.bcd_amount,
            Metric::IgstAmount => self.igst_amount,
            Metric::AdditionalDuty => self.additional_duty,
            Metric::TotalDuties => self.total_duties,
            Metric::LandedCostUsd => self.landed_cost_usd,
            Metric::LandedCostInr => self.landed_cost_inr,
            Metric::FxRate => self.fx_rate,
            Metric::Volume => self.volume,
            Metric::TargetMarginPercent => self.target_margin_percent,
            Metric::AdjustedMarginPercent => self.adjusted_margin_percent,
            Metric::TargetSellingPriceInr => self.target_selling_price_inr,
            Metric::ProfitInr => self.profit_inr,
            Metric::FxImpactInr => self.fx_impact_inr,
            Metric::LogisticsImpactUsd => self.logistics_impact_usd,
            Metric::DutyImpactUsd => self.duty_impact_usd,
            Metric::TotalDutyExposureUsd => self.total_duty_exposure_usd,
            Metric::FtaSavingsUsd => self.fta_savings_usd,
            Metric::DutyImpactPercent => self.duty_impact_percent,
            Metric::PassThroughRate => self.pass_through_rate,
        }
    }

    /// Landed cost components in USD, in breakdown order
    pub fn cost_breakdown(&self) -> [(CostComponent, f64); 6] {
        [
            (CostComponent::BasePrice, self.base_price_usd),
            (CostComponent::Freight, self.freight_usd),
            (CostComponent::Insurance, self.insurance_usd),
            (CostComponent::Bcd, self.bcd_amount),
            (CostComponent::Igst, self.igst_amount),
            (CostComponent::AdditionalDuty, self.additional_duty),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_metrics_listed_once() {
        let unique: HashSet<_> = Metric::ALL.iter().collect();
        assert_eq!(unique.len(), Metric::ALL.len());

        let labels: HashSet<_> = Metric::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels.len(), Metric::ALL.len());
    }

    #[test]
    fn test_keys_match_serialized_fields() {
        // Deserializing fails if any key is wrong or missing
        let object: serde_json::Map<String, serde_json::Value> = Metric::ALL
            .iter()
            .enumerate()
            .map(|(i, m)| (m.key().to_string(), serde_json::json!(i as f64)))
            .collect();
        let result: MetricsResult = serde_json::from_value(serde_json::Value::Object(object)).unwrap();

        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(result.get(*metric), i as f64, "{}", metric.key());
        }
    }

    #[test]
    fn test_units() {
        assert_eq!(Metric::ProfitInr.unit(), Unit::Inr);
        assert_eq!(Metric::DutyImpactPercent.unit(), Unit::Percent);
        assert_eq!(Metric::FtaSavingsUsd.unit(), Unit::Usd);
        assert_eq!(Metric::Volume.unit(), Unit::Units);
    }
}

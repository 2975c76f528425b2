//! Landed cost calculation
//!
//! A single pass from (product row, tariff row, overrides) to [`MetricsResult`].
//! Nothing here holds state, so results depend only on the arguments.

use super::metrics::MetricsResult;
use super::overrides::OverrideSet;
use crate::data::{ProductRecord, TariffRecord};
use crate::error::{PlannerError, PlannerResult};

/// Inputs after overrides have been applied, plus the stored values the
/// delta metrics compare against
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInputs {
    pub base_price: f64,
    pub freight: f64,
    pub insurance_percent: f64,
    pub fx_rate: f64,
    pub bcd_percent: f64,
    pub igst_percent: f64,
    pub additional_duty_percent: f64,
    pub fta_eligible: bool,
    pub volume: f64,
    pub target_margin: f64,
    pub pass_through_rate: f64,

    pub static_fx_rate: f64,
    pub static_bcd_percent: f64,
    /// Stored freight, only read when freight is overridden
    pub static_freight: Option<f64>,
}

fn required(value: Option<f64>, field: &'static str) -> PlannerResult<f64> {
    value.ok_or(PlannerError::MissingRequiredField { field })
}

fn resolve(replacement: Option<f64>, stored: Option<f64>, field: &'static str) -> PlannerResult<f64> {
    match replacement {
        Some(value) => Ok(value),
        None => required(stored, field),
    }
}

impl ResolvedInputs {
    pub fn resolve(product: &ProductRecord, overrides: &OverrideSet) -> PlannerResult<Self> {
        let static_freight = match overrides.freight_usd {
            Some(_) => Some(required(product.freight_usd, "freight_usd")?),
            None => None,
        };

        Ok(Self {
            base_price: resolve(overrides.base_price_usd, product.base_price_usd, "base_price_usd")?,
            freight: resolve(overrides.freight_usd, product.freight_usd, "freight_usd")?,
            insurance_percent: resolve(overrides.insurance_percent, product.insurance_percent, "insurance_percent")?,
            fx_rate: resolve(overrides.fx_rate, product.fx_rate, "fx_rate")?,
            bcd_percent: resolve(overrides.bcd_percent, product.bcd_percent, "bcd_percent")?,
            igst_percent: resolve(overrides.igst_percent, product.igst_percent, "igst_percent")?,
            additional_duty_percent: product.additional_duty_percent.unwrap_or(0.0),
            fta_eligible: product.fta_eligibility,
            volume: resolve(overrides.volume_override(), product.volume_units, "volume_units")?,
            target_margin: resolve(
                overrides.target_margin_percent,
                product.target_margin_percent,
                "target_margin_percent",
            )?,
            pass_through_rate: overrides.pass_through_rate,
            static_fx_rate: required(product.fx_rate, "fx_rate")?,
            static_bcd_percent: required(product.bcd_percent, "bcd_percent")?,
            static_freight,
        })
    }

    /// Duty rate actually charged: the FTA rate if eligible and positive, else BCD
    pub fn effective_bcd_percent(&self, tariff: &TariffRecord) -> f64 {
        match tariff.preferential_rate() {
            Some(rate) if self.fta_eligible => rate,
            _ => self.bcd_percent,
        }
    }
}

/// Compute all landed cost, pricing and delta metrics for one product
pub fn compute(
    product: &ProductRecord,
    tariff: &TariffRecord,
    overrides: &OverrideSet,
) -> PlannerResult<MetricsResult> {
    let inputs = ResolvedInputs::resolve(product, overrides)?;
    log::debug!("Resolved inputs for {}: {:?}", product.lane(), inputs);
    Ok(compute_resolved(&inputs, tariff))
}

/// Formula pipeline over already-resolved inputs
pub fn compute_resolved(inputs: &ResolvedInputs, tariff: &TariffRecord) -> MetricsResult {
    let base_price = inputs.base_price;
    let freight = inputs.freight;
    let bcd_effective = inputs.effective_bcd_percent(tariff);

    // Cost components
    let insurance = base_price * inputs.insurance_percent / 100.0;
    let bcd_amount = base_price * bcd_effective / 100.0;
    // IGST is levied on the duty-inclusive value
    let igst_amount = (base_price + freight + insurance + bcd_amount) * inputs.igst_percent / 100.0;
    let additional_duty = base_price * inputs.additional_duty_percent / 100.0;
    let total_duties = bcd_amount + igst_amount + additional_duty;

    let landed_cost_usd = base_price + freight + insurance + total_duties;
    let landed_cost_inr = landed_cost_usd * inputs.fx_rate;

    // Pricing on the pass-through-adjusted margin
    let adjusted_margin = inputs.target_margin * (inputs.pass_through_rate / 100.0);
    let target_selling_price_inr = landed_cost_inr * (1.0 + adjusted_margin / 100.0);
    let profit_inr = target_selling_price_inr - landed_cost_inr;

    // Deltas against the stored product values
    let fx_impact_inr = (inputs.fx_rate - inputs.static_fx_rate) * base_price;
    let logistics_impact_usd = inputs
        .static_freight
        .map_or(0.0, |static_freight| freight - static_freight);

    let static_bcd_amount = base_price * inputs.static_bcd_percent / 100.0;
    let duty_impact_usd = bcd_amount - static_bcd_amount;
    let duty_impact_percent = if static_bcd_amount > 0.0 {
        duty_impact_usd / static_bcd_amount * 100.0
    } else {
        0.0
    };

    let total_duty_exposure_usd = bcd_amount * inputs.volume;
    let fta_savings_usd = if inputs.fta_eligible {
        (static_bcd_amount - bcd_amount) * inputs.volume
    } else {
        -total_duty_exposure_usd
    };

    MetricsResult {
        base_price_usd: base_price,
        freight_usd: freight,
        insurance_usd: insurance,
        bcd_percent: bcd_effective,
        igst_percent: inputs.igst_percent,
        bcd_amount,
        igst_amount,
        additional_duty,
        total_duties,
        landed_cost_usd,
        landed_cost_inr,
        fx_rate: inputs.fx_rate,
        volume: inputs.volume,
        target_margin_percent: inputs.target_margin,
        adjusted_margin_percent: adjusted_margin,
        target_selling_price_inr,
        profit_inr,
        fx_impact_inr,
        logistics_impact_usd,
        duty_impact_usd,
        total_duty_exposure_usd,
        fta_savings_usd,
        duty_impact_percent,
        pass_through_rate: inputs.pass_through_rate,
    }
}

//! Scenario runner over pre-loaded reference tables
//!
//! Loads the tables once, then answers any number of lookups, calculations
//! and scenario comparisons against them without re-reading CSV files.

use crate::config::PlannerConfig;
use crate::data::{self, DataTables, TradeLane};
use crate::engine::{self, Metric, MetricsResult, OverrideSet};
use crate::error::{PlannerError, PlannerResult};
use rayon::prelude::*;

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::load(&PlannerConfig::default())?;
/// let lane = TradeLane::new("85171300", "IN", "VN");
///
/// let base = runner.calculate(&lane, 70.0)?;
/// let cmp = runner.compare(&lane, &OverrideSet { fx_rate: Some(84.0), ..Default::default() })?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    tables: DataTables,
}

/// Baseline and scenario results for the same lane and pass-through rate
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioComparison {
    pub lane: TradeLane,
    pub baseline: MetricsResult,
    pub scenario: MetricsResult,
}

impl ScenarioComparison {
    /// Scenario value minus baseline value
    pub fn delta(&self, metric: Metric) -> f64 {
        self.scenario.get(metric) - self.baseline.get(metric)
    }
}

/// Outcome of one product row in a portfolio sweep
#[derive(Debug)]
pub struct PortfolioEntry {
    pub lane: TradeLane,
    pub result: PlannerResult<MetricsResult>,
}

/// Volume-weighted totals over the rows that computed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioSummary {
    pub computed: usize,
    pub skipped: usize,
    pub total_landed_cost_inr: f64,
    pub total_profit_inr: f64,
    pub total_duty_exposure_usd: f64,
    pub total_fta_savings_usd: f64,
}

impl PortfolioSummary {
    pub fn from_entries(entries: &[PortfolioEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match &entry.result {
                Ok(r) => {
                    summary.computed += 1;
                    summary.total_landed_cost_inr += r.landed_cost_inr * r.volume;
                    summary.total_profit_inr += r.profit_inr * r.volume;
                    summary.total_duty_exposure_usd += r.total_duty_exposure_usd;
                    summary.total_fta_savings_usd += r.fta_savings_usd;
                }
                Err(_) => summary.skipped += 1,
            }
        }
        summary
    }
}

impl ScenarioRunner {
    pub fn new(tables: DataTables) -> Self {
        Self { tables }
    }

    /// Create runner by loading every table named in the config
    pub fn load(config: &PlannerConfig) -> PlannerResult<Self> {
        Ok(Self::new(DataTables::load(config)?))
    }

    pub fn tables(&self) -> &DataTables {
        &self.tables
    }

    pub fn hs_codes(&self) -> Vec<String> {
        data::hs_codes(&self.tables.tariff)
    }

    /// Importing and exporting countries available for an HS code
    pub fn valid_countries(&self, hs_code: &str) -> (Vec<String>, Vec<String>) {
        data::valid_countries_for_hs_code(&self.tables.tariff, hs_code)
    }

    /// Landed cost from stored values only
    pub fn calculate(&self, lane: &TradeLane, pass_through_rate: f64) -> PlannerResult<MetricsResult> {
        self.run(lane, &OverrideSet::with_pass_through(pass_through_rate))
    }

    /// Landed cost with the given overrides
    pub fn run(&self, lane: &TradeLane, overrides: &OverrideSet) -> PlannerResult<MetricsResult> {
        let (product, tariff) = data::find_lane(&self.tables, lane)?;
        engine::compute(product, tariff, overrides)
    }

    /// Run the baseline and the scenario side by side
    ///
    /// The baseline uses no field overrides but shares the scenario's
    /// pass-through rate, so differences come from the overrides alone.
    pub fn compare(&self, lane: &TradeLane, overrides: &OverrideSet) -> PlannerResult<ScenarioComparison> {
        let (product, tariff) = data::find_lane(&self.tables, lane)?;
        let baseline = engine::compute(
            product,
            tariff,
            &OverrideSet::with_pass_through(overrides.pass_through_rate),
        )?;
        let scenario = engine::compute(product, tariff, overrides)?;

        Ok(ScenarioComparison {
            lane: lane.clone(),
            baseline,
            scenario,
        })
    }

    /// Stored values for every overridable field, as a starting scenario
    pub fn scenario_defaults(&self, lane: &TradeLane, pass_through_rate: f64) -> PlannerResult<OverrideSet> {
        let (product, _) = data::find_lane(&self.tables, lane)?;
        Ok(OverrideSet {
            volume: product.volume_units,
            freight_usd: product.freight_usd,
            insurance_percent: product.insurance_percent,
            base_price_usd: product.base_price_usd,
            target_margin_percent: product.target_margin_percent,
            fx_rate: product.fx_rate,
            bcd_percent: product.bcd_percent,
            igst_percent: product.igst_percent,
            pass_through_rate,
        })
    }

    /// Apply the same overrides to every product row, in parallel
    ///
    /// Rows with no tariff match or a missing field are returned with their
    /// error rather than aborting the sweep.
    pub fn run_portfolio(&self, overrides: &OverrideSet) -> Vec<PortfolioEntry> {
        let entries: Vec<PortfolioEntry> = self
            .tables
            .product
            .par_iter()
            .map(|product| {
                let lane = product.lane();
                let result = data::filter_tariffs(&self.tables.tariff, &lane)
                    .first()
                    .ok_or_else(|| PlannerError::NoMatchingRecord {
                        hs_code: lane.hs_code.clone(),
                        importing_country: lane.importing_country.clone(),
                        exporting_country: lane.exporting_country.clone(),
                    })
                    .and_then(|tariff| engine::compute(product, tariff, overrides));
                PortfolioEntry { lane, result }
            })
            .collect();

        for entry in &entries {
            if let Err(err) = &entry.result {
                log::warn!("Skipping {}: {}", entry.lane, err);
            }
        }

        entries
    }
}

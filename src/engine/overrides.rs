//! Scenario overrides applied on top of a product row

use crate::config::DEFAULT_PASS_THROUGH_RATE;
use serde::{Deserialize, Serialize};

/// Optional replacements for the overridable product fields
///
/// `None` means "use the stored value". The one exception is `volume`:
/// an override of exactly `0.0` also falls back to the stored volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideSet {
    pub volume: Option<f64>,
    pub freight_usd: Option<f64>,
    pub insurance_percent: Option<f64>,
    pub base_price_usd: Option<f64>,
    pub target_margin_percent: Option<f64>,
    pub fx_rate: Option<f64>,
    pub bcd_percent: Option<f64>,
    pub igst_percent: Option<f64>,

    /// Share of the target margin passed to the customer, 0-100
    pub pass_through_rate: f64,
}

impl Default for OverrideSet {
    fn default() -> Self {
        Self {
            volume: None,
            freight_usd: None,
            insurance_percent: None,
            base_price_usd: None,
            target_margin_percent: None,
            fx_rate: None,
            bcd_percent: None,
            igst_percent: None,
            pass_through_rate: DEFAULT_PASS_THROUGH_RATE,
        }
    }
}

impl OverrideSet {
    /// No field overrides, only a pass-through rate
    pub fn with_pass_through(pass_through_rate: f64) -> Self {
        Self {
            pass_through_rate,
            ..Default::default()
        }
    }

    /// Same field overrides with a different pass-through rate
    pub fn at_pass_through(mut self, pass_through_rate: f64) -> Self {
        self.pass_through_rate = pass_through_rate;
        self
    }

    /// True when no product field is replaced
    pub fn is_baseline(&self) -> bool {
        self.volume_override().is_none()
            && self.freight_usd.is_none()
            && self.insurance_percent.is_none()
            && self.base_price_usd.is_none()
            && self.target_margin_percent.is_none()
            && self.fx_rate.is_none()
            && self.bcd_percent.is_none()
            && self.igst_percent.is_none()
    }

    /// Volume override with zero treated as not provided
    pub fn volume_override(&self) -> Option<f64> {
        self.volume.filter(|v| *v != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_passes_full_margin() {
        let overrides = OverrideSet::default();
        assert_eq!(overrides.pass_through_rate, 100.0);
        assert!(overrides.is_baseline());
    }

    #[test]
    fn test_zero_volume_is_not_an_override() {
        let overrides = OverrideSet {
            volume: Some(0.0),
            ..Default::default()
        };
        assert_eq!(overrides.volume_override(), None);
        assert!(overrides.is_baseline());

        let overrides = OverrideSet {
            volume: Some(250.0),
            ..Default::default()
        };
        assert_eq!(overrides.volume_override(), Some(250.0));
        assert!(!overrides.is_baseline());
    }

    #[test]
    fn test_zero_freight_is_an_override() {
        let overrides = OverrideSet {
            freight_usd: Some(0.0),
            ..Default::default()
        }
        .at_pass_through(70.0);
        assert!(!overrides.is_baseline());
        assert_eq!(overrides.pass_through_rate, 70.0);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let overrides: OverrideSet = serde_json::from_str(r#"{ "fx_rate": 83.5 }"#).unwrap();
        assert_eq!(overrides.fx_rate, Some(83.5));
        assert_eq!(overrides.pass_through_rate, 100.0);
    }
}

//! Run configuration for the planner
//!
//! Defaults match the layout produced by the cleaning step (`data/cleaned/`).
//! A JSON file may override any subset of fields.

use crate::error::{PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Default directory holding the cleaned CSV tables
pub const DEFAULT_DATA_PATH: &str = "data/cleaned";

/// Pass-through rate used when none is given (all of the margin is applied)
pub const DEFAULT_PASS_THROUGH_RATE: f64 = 100.0;

/// File names of the five cleaned tables, relative to the data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFiles {
    pub product: String,
    pub supplier: String,
    pub tariff: String,
    pub financial: String,
    pub policy: String,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            product: "product_master_data_final.csv".into(),
            supplier: "supplier_master.csv".into(),
            tariff: "trade_&_tariff_reference_data.csv".into(),
            financial: "financial__performance_data.csv".into(),
            policy: "policy_&_volatility_data.csv".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Directory containing the cleaned tables
    pub data_dir: PathBuf,

    pub tables: TableFiles,

    /// Share of the target margin passed to the customer, 0-100
    pub pass_through_rate: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_PATH),
            tables: TableFiles::default(),
            pass_through_rate: DEFAULT_PASS_THROUGH_RATE,
        }
    }
}

impl PlannerConfig {
    /// Load a config from a JSON file; missing keys keep their defaults
    pub fn from_json_path(path: &Path) -> PlannerResult<Self> {
        let file = File::open(path).map_err(|source| PlannerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_reader(file)
    }

    pub fn from_json_reader<R: std::io::Read>(reader: R) -> PlannerResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn table_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "data_dir": "fixtures", "tables": { "tariff": "tariffs.csv" } }"#;
        let config = PlannerConfig::from_json_reader(json.as_bytes()).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("fixtures"));
        assert_eq!(config.tables.tariff, "tariffs.csv");
        assert_eq!(config.tables.product, "product_master_data_final.csv");
        assert_eq!(config.pass_through_rate, DEFAULT_PASS_THROUGH_RATE);
        assert_eq!(
            config.table_path(&config.tables.tariff),
            PathBuf::from("fixtures").join("tariffs.csv")
        );
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let result = PlannerConfig::from_json_reader("{ not json".as_bytes());
        assert!(matches!(result, Err(PlannerError::Config(_))));
    }
}

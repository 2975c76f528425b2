//! Record types for the cleaned reference tables

use serde::{Deserialize, Serialize};

/// Key triple shared by the product master and the tariff reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeLane {
    pub hs_code: String,
    pub importing_country: String,
    pub exporting_country: String,
}

impl TradeLane {
    pub fn new(
        hs_code: impl Into<String>,
        importing_country: impl Into<String>,
        exporting_country: impl Into<String>,
    ) -> Self {
        Self {
            hs_code: hs_code.into(),
            importing_country: importing_country.into(),
            exporting_country: exporting_country.into(),
        }
    }
}

impl std::fmt::Display for TradeLane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.hs_code, self.exporting_country, self.importing_country)
    }
}

/// A single row of the product master
///
/// Numeric columns are `None` when the cell was empty or the column was
/// absent from the file. The engine decides which of them it actually needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Harmonized System classification code
    pub hs_code: String,

    /// Country importing the goods
    pub importing_country: String,

    /// Country of origin (the exporting side of the lane)
    pub country_of_origin: String,

    /// Unit base price in USD
    pub base_price_usd: Option<f64>,

    /// Unit freight in USD
    pub freight_usd: Option<f64>,

    /// Insurance as a percentage of base price
    pub insurance_percent: Option<f64>,

    /// USD to INR conversion rate
    pub fx_rate: Option<f64>,

    /// Basic customs duty, percent of base price
    pub bcd_percent: Option<f64>,

    /// IGST, percent of the duty-inclusive value
    pub igst_percent: Option<f64>,

    /// Additional duty, percent of base price (treated as 0 when absent)
    pub additional_duty_percent: Option<f64>,

    /// Whether the product qualifies for the preferential FTA rate
    pub fta_eligibility: bool,

    /// FTA reduction as recorded in the master (informational)
    pub fta_reduction_percent: Option<f64>,

    /// Shipment volume in units
    pub volume_units: Option<f64>,

    /// Target margin over landed cost, percent
    pub target_margin_percent: Option<f64>,
}

impl ProductRecord {
    pub fn lane(&self) -> TradeLane {
        TradeLane::new(&self.hs_code, &self.importing_country, &self.country_of_origin)
    }

    pub fn matches(&self, lane: &TradeLane) -> bool {
        self.hs_code == lane.hs_code
            && self.importing_country == lane.importing_country
            && self.country_of_origin == lane.exporting_country
    }
}

/// A single row of the trade & tariff reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffRecord {
    pub hs_code: String,

    /// Importing country
    pub country: String,

    pub exporting_country: String,

    /// Preferential duty rate under an FTA, percent (nullable)
    pub fta_duty_rate_percent: Option<f64>,
}

impl TariffRecord {
    pub fn matches(&self, lane: &TradeLane) -> bool {
        self.hs_code == lane.hs_code
            && self.country == lane.importing_country
            && self.exporting_country == lane.exporting_country
    }

    /// FTA rate usable as the effective duty: present and strictly positive
    pub fn preferential_rate(&self) -> Option<f64> {
        self.fta_duty_rate_percent.filter(|rate| *rate > 0.0)
    }
}

/// Flat table kept as normalized headers and string cells
///
/// Used for the supplier, financial performance and policy tables, which the
/// engine does not consume but the planner loads alongside the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell value by row index and normalized column name
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// All values of one column, in row order
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tariff(rate: Option<f64>) -> TariffRecord {
        TariffRecord {
            hs_code: "85171300".into(),
            country: "IN".into(),
            exporting_country: "VN".into(),
            fta_duty_rate_percent: rate,
        }
    }

    #[test]
    fn test_preferential_rate_requires_positive_value() {
        assert_eq!(tariff(Some(5.0)).preferential_rate(), Some(5.0));
        assert_eq!(tariff(Some(0.0)).preferential_rate(), None);
        assert_eq!(tariff(None).preferential_rate(), None);
    }

    #[test]
    fn test_tariff_matches_lane() {
        let t = tariff(None);
        assert!(t.matches(&TradeLane::new("85171300", "IN", "VN")));
        assert!(!t.matches(&TradeLane::new("85171300", "VN", "IN")));
    }

    #[test]
    fn test_raw_table_accessors() {
        let table = RawTable {
            headers: vec!["supplier_id".into(), "country".into()],
            rows: vec![
                vec!["S1".into(), "CN".into()],
                vec!["S2".into()],
            ],
        };
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "country"), Some("CN"));
        assert_eq!(table.get(1, "country"), None);
        assert_eq!(table.column("country"), Some(vec!["CN", ""]));
        assert!(table.column("missing").is_none());
    }
}

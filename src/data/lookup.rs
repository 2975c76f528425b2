//! Record lookup by HS code and trade lane

use super::loader::DataTables;
use super::records::{ProductRecord, TariffRecord, TradeLane};
use crate::error::{PlannerError, PlannerResult};
use std::collections::BTreeSet;

/// Product rows matching the lane exactly
pub fn filter_products<'a>(products: &'a [ProductRecord], lane: &TradeLane) -> Vec<&'a ProductRecord> {
    products.iter().filter(|p| p.matches(lane)).collect()
}

/// Tariff rows matching the lane exactly
pub fn filter_tariffs<'a>(tariffs: &'a [TariffRecord], lane: &TradeLane) -> Vec<&'a TariffRecord> {
    tariffs.iter().filter(|t| t.matches(lane)).collect()
}

/// Resolve a lane to the single product row and tariff row the engine needs
///
/// Either side being empty is `NoMatchingRecord`. The key triple is expected
/// to be unique; if it is not, the first row in file order wins.
pub fn find_lane<'a>(
    tables: &'a DataTables,
    lane: &TradeLane,
) -> PlannerResult<(&'a ProductRecord, &'a TariffRecord)> {
    let products = filter_products(&tables.product, lane);
    let tariffs = filter_tariffs(&tables.tariff, lane);

    if products.len() > 1 || tariffs.len() > 1 {
        log::warn!(
            "Lane {} is not unique ({} product rows, {} tariff rows); using the first of each",
            lane,
            products.len(),
            tariffs.len()
        );
    }

    match (products.first(), tariffs.first()) {
        (Some(product), Some(tariff)) => Ok((*product, *tariff)),
        _ => Err(PlannerError::NoMatchingRecord {
            hs_code: lane.hs_code.clone(),
            importing_country: lane.importing_country.clone(),
            exporting_country: lane.exporting_country.clone(),
        }),
    }
}

/// Importing and exporting countries present in the tariff table for an HS code
///
/// Each list is deduplicated and sorted.
pub fn valid_countries_for_hs_code(tariffs: &[TariffRecord], hs_code: &str) -> (Vec<String>, Vec<String>) {
    let mut importing = BTreeSet::new();
    let mut exporting = BTreeSet::new();

    for tariff in tariffs.iter().filter(|t| t.hs_code == hs_code) {
        importing.insert(tariff.country.clone());
        exporting.insert(tariff.exporting_country.clone());
    }

    (importing.into_iter().collect(), exporting.into_iter().collect())
}

/// Every HS code in the tariff table, deduplicated and sorted
pub fn hs_codes(tariffs: &[TariffRecord]) -> Vec<String> {
    tariffs
        .iter()
        .map(|t| t.hs_code.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tariff(hs: &str, country: &str, exporter: &str) -> TariffRecord {
        TariffRecord {
            hs_code: hs.into(),
            country: country.into(),
            exporting_country: exporter.into(),
            fta_duty_rate_percent: None,
        }
    }

    fn product(hs: &str, importer: &str, origin: &str, price: f64) -> ProductRecord {
        ProductRecord {
            hs_code: hs.into(),
            importing_country: importer.into(),
            country_of_origin: origin.into(),
            base_price_usd: Some(price),
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
        }
    }

    fn tables() -> DataTables {
        DataTables::from_records(
            vec![
                product("8517", "IN", "VN", 100.0),
                product("8517", "IN", "CN", 90.0),
                product("8517", "IN", "VN", 120.0),
            ],
            vec![
                tariff("8517", "IN", "VN"),
                tariff("8517", "IN", "CN"),
                tariff("8517", "AE", "CN"),
                tariff("3004", "IN", "DE"),
            ],
        )
    }

    #[test]
    fn test_valid_countries_sorted_and_unique() {
        let tables = tables();
        let (importing, exporting) = valid_countries_for_hs_code(&tables.tariff, "8517");
        assert_eq!(importing, vec!["AE", "IN"]);
        assert_eq!(exporting, vec!["CN", "VN"]);

        let (importing, exporting) = valid_countries_for_hs_code(&tables.tariff, "0000");
        assert!(importing.is_empty() && exporting.is_empty());
    }

    #[test]
    fn test_hs_codes() {
        assert_eq!(hs_codes(&tables().tariff), vec!["3004", "8517"]);
    }

    #[test]
    fn test_find_lane_first_row_wins() {
        let tables = tables();
        let (product, tariff) = find_lane(&tables, &TradeLane::new("8517", "IN", "VN")).unwrap();
        assert_eq!(product.base_price_usd, Some(100.0));
        assert_eq!(tariff.exporting_country, "VN");
    }

    #[test]
    fn test_find_lane_requires_both_sides() {
        let tables = tables();
        // Tariff exists but no product row
        let err = find_lane(&tables, &TradeLane::new("8517", "AE", "CN")).unwrap_err();
        assert!(matches!(err, PlannerError::NoMatchingRecord { .. }));

        // Neither exists
        let err = find_lane(&tables, &TradeLane::new("9999", "IN", "VN")).unwrap_err();
        assert!(matches!(err, PlannerError::NoMatchingRecord { .. }));
    }

    #[test]
    fn test_filter_is_exact_match() {
        let tables = tables();
        let lane = TradeLane::new("8517", "IN", "vn");
        assert!(filter_products(&tables.product, &lane).is_empty());
        assert!(filter_tariffs(&tables.tariff, &lane).is_empty());
    }
}

//! Load the cleaned reference tables from CSV
//!
//! Headers are normalized on read (lower-case, underscores, `%` spelled out)
//! so files exported straight from the workbook load the same as cleaned ones.

use super::records::{ProductRecord, RawTable, TariffRecord};
use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Normalize a column header to the cleaned naming scheme
///
/// `"Base Price (USD)"` becomes `"base_price_usd"`, `"BCD %"` becomes `"bcd_percent"`.
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .replace(['(', ')'], "")
        .replace('%', "percent")
        .replace('/', "_")
}

/// Parse a numeric cell, tolerating thousands separators
///
/// Empty and `nan` cells are absent values, not errors.
pub fn parse_number(column: &str, raw: Option<&str>) -> PlannerResult<Option<f64>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    cleaned
        .parse::<f64>()
        .map(Some)
        .map_err(|_| PlannerError::InvalidValue {
            column: column.to_string(),
            value: raw.to_string(),
        })
}

/// Interpret the product master's Yes/No eligibility flag
pub fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Some("yes" | "y" | "true" | "1")
    )
}

/// Raw CSV row matching the product master columns
#[derive(Debug, Deserialize)]
struct ProductCsvRow {
    hs_code: String,
    importing_country: String,
    #[serde(alias = "country_of_origin")]
    country_of_origin_coo: String,
    #[serde(default)]
    base_price_usd: Option<String>,
    #[serde(default)]
    freight_usd: Option<String>,
    #[serde(default)]
    insurance_percent: Option<String>,
    #[serde(default)]
    fx_rate: Option<String>,
    #[serde(default)]
    bcd_percent: Option<String>,
    #[serde(default)]
    igst_percent: Option<String>,
    #[serde(default)]
    additional_duty_percent: Option<String>,
    #[serde(default)]
    fta_eligibility: Option<String>,
    #[serde(default)]
    fta_reduction_percent: Option<String>,
    #[serde(default)]
    volume_units: Option<String>,
    #[serde(default)]
    target_margin_percent: Option<String>,
}

impl ProductCsvRow {
    fn to_record(self) -> PlannerResult<ProductRecord> {
        let num = |column: &str, value: &Option<String>| parse_number(column, value.as_deref());

        Ok(ProductRecord {
            base_price_usd: num("base_price_usd", &self.base_price_usd)?,
            freight_usd: num("freight_usd", &self.freight_usd)?,
            insurance_percent: num("insurance_percent", &self.insurance_percent)?,
            fx_rate: num("fx_rate", &self.fx_rate)?,
            bcd_percent: num("bcd_percent", &self.bcd_percent)?,
            igst_percent: num("igst_percent", &self.igst_percent)?,
            additional_duty_percent: num("additional_duty_percent", &self.additional_duty_percent)?,
            fta_eligibility: parse_flag(self.fta_eligibility.as_deref()),
            fta_reduction_percent: num("fta_reduction_percent", &self.fta_reduction_percent)?,
            volume_units: num("volume_units", &self.volume_units)?,
            target_margin_percent: num("target_margin_percent", &self.target_margin_percent)?,
            hs_code: self.hs_code,
            importing_country: self.importing_country,
            country_of_origin: self.country_of_origin_coo,
        })
    }
}

/// Raw CSV row matching the trade & tariff reference columns
#[derive(Debug, Deserialize)]
struct TariffCsvRow {
    hs_code: String,
    country: String,
    exporting_country: String,
    #[serde(default)]
    fta_duty_rate_percent: Option<String>,
}

impl TariffCsvRow {
    fn to_record(self) -> PlannerResult<TariffRecord> {
        Ok(TariffRecord {
            fta_duty_rate_percent: parse_number(
                "fta_duty_rate_percent",
                self.fta_duty_rate_percent.as_deref(),
            )?,
            hs_code: self.hs_code,
            country: self.country,
            exporting_country: self.exporting_country,
        })
    }
}

/// CSV reader with trimmed fields and normalized headers
fn normalized_reader<R: Read>(reader: R) -> PlannerResult<csv::Reader<R>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = csv_reader.headers()?.iter().map(normalize_header).collect();
    csv_reader.set_headers(StringRecord::from(headers));
    Ok(csv_reader)
}

fn open(path: &Path) -> PlannerResult<File> {
    File::open(path).map_err(|source| PlannerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load product master rows from any reader
pub fn load_products_from_reader<R: Read>(reader: R) -> PlannerResult<Vec<ProductRecord>> {
    let mut csv_reader = normalized_reader(reader)?;
    let mut products = Vec::new();

    for result in csv_reader.deserialize() {
        let row: ProductCsvRow = result?;
        products.push(row.to_record()?);
    }

    Ok(products)
}

pub fn load_products<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<ProductRecord>> {
    load_products_from_reader(open(path.as_ref())?)
}

/// Load trade & tariff reference rows from any reader
pub fn load_tariffs_from_reader<R: Read>(reader: R) -> PlannerResult<Vec<TariffRecord>> {
    let mut csv_reader = normalized_reader(reader)?;
    let mut tariffs = Vec::new();

    for result in csv_reader.deserialize() {
        let row: TariffCsvRow = result?;
        tariffs.push(row.to_record()?);
    }

    Ok(tariffs)
}

pub fn load_tariffs<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<TariffRecord>> {
    load_tariffs_from_reader(open(path.as_ref())?)
}

/// Load any table as normalized headers plus string cells
pub fn load_raw_table_from_reader<R: Read>(reader: R) -> PlannerResult<RawTable> {
    let mut csv_reader = normalized_reader(reader)?;
    let headers = csv_reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

pub fn load_raw_table<P: AsRef<Path>>(path: P) -> PlannerResult<RawTable> {
    load_raw_table_from_reader(open(path.as_ref())?)
}

/// All five reference tables, loaded once and shared read-only
#[derive(Debug, Clone, Default)]
pub struct DataTables {
    pub product: Vec<ProductRecord>,
    pub supplier: RawTable,
    pub tariff: Vec<TariffRecord>,
    pub financial: RawTable,
    pub policy: RawTable,
}

impl DataTables {
    /// Load every table named by the config from its data directory
    pub fn load(config: &PlannerConfig) -> PlannerResult<Self> {
        let files = &config.tables;
        let tables = Self {
            product: load_products(config.table_path(&files.product))?,
            supplier: load_raw_table(config.table_path(&files.supplier))?,
            tariff: load_tariffs(config.table_path(&files.tariff))?,
            financial: load_raw_table(config.table_path(&files.financial))?,
            policy: load_raw_table(config.table_path(&files.policy))?,
        };

        log::info!(
            "Loaded tables from {}: {} products, {} tariffs, {} suppliers, {} financial rows, {} policy rows",
            config.data_dir.display(),
            tables.product.len(),
            tables.tariff.len(),
            tables.supplier.len(),
            tables.financial.len(),
            tables.policy.len(),
        );

        Ok(tables)
    }

    /// Tables holding only products and tariffs, for callers that build them in memory
    pub fn from_records(product: Vec<ProductRecord>, tariff: Vec<TariffRecord>) -> Self {
        Self {
            product,
            tariff,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_CSV: &str = "\
HS Code,Importing Country,Country of Origin (COO),Base Price (USD),Freight (USD),Insurance %,FX Rate,BCD %,IGST %,FTA Eligibility,Volume Units,Target Margin %,Supplier
85171300,IN,VN,100,10,2,80,10,18,No,\"1,000\",20,Acme
85171300,IN,KR,95.5,12,1.5,80,10,18,Yes,500,25,Bolt
";

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" Base Price (USD) "), "base_price_usd");
        assert_eq!(normalize_header("BCD %"), "bcd_percent");
        assert_eq!(normalize_header("Country of Origin (COO)"), "country_of_origin_coo");
        assert_eq!(normalize_header("Freight/Unit"), "freight_unit");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("v", Some("1,250.5")).unwrap(), Some(1250.5));
        assert_eq!(parse_number("v", Some("  ")).unwrap(), None);
        assert_eq!(parse_number("v", Some("NaN")).unwrap(), None);
        assert_eq!(parse_number("v", None).unwrap(), None);
        assert!(matches!(
            parse_number("bcd_percent", Some("ten")),
            Err(PlannerError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("Yes")));
        assert!(parse_flag(Some(" true ")));
        assert!(!parse_flag(Some("No")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_load_products_from_reader() {
        let products = load_products_from_reader(PRODUCT_CSV.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);

        let p = &products[0];
        assert_eq!(p.hs_code, "85171300");
        assert_eq!(p.country_of_origin, "VN");
        assert_eq!(p.base_price_usd, Some(100.0));
        assert_eq!(p.volume_units, Some(1000.0));
        assert!(!p.fta_eligibility);
        // Columns absent from the file load as None
        assert_eq!(p.additional_duty_percent, None);
        assert_eq!(p.fta_reduction_percent, None);

        assert!(products[1].fta_eligibility);
    }

    #[test]
    fn test_empty_numeric_cell_loads_as_none() {
        let csv = "hs_code,importing_country,country_of_origin,base_price_usd,fx_rate\n\
                   1001,IN,AU,,80\n";
        let products = load_products_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(products[0].base_price_usd, None);
        assert_eq!(products[0].fx_rate, Some(80.0));
    }

    #[test]
    fn test_load_tariffs_from_reader() {
        let csv = "HS Code,Country,Exporting Country,FTA Duty Rate %\n\
                   85171300,IN,VN,\n\
                   85171300,IN,KR,5\n";
        let tariffs = load_tariffs_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(tariffs.len(), 2);
        assert_eq!(tariffs[0].fta_duty_rate_percent, None);
        assert_eq!(tariffs[1].fta_duty_rate_percent, Some(5.0));
    }

    #[test]
    fn test_load_raw_table_from_reader() {
        let csv = "Supplier ID,Lead Time (Days)\nS1,30\nS2,45\n";
        let table = load_raw_table_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["supplier_id", "lead_time_days"]);
        assert_eq!(table.get(1, "lead_time_days"), Some("45"));
    }

    #[test]
    fn test_load_default_tables() {
        let result = DataTables::load(&PlannerConfig::default());
        assert!(result.is_ok(), "Failed to load tables: {:?}", result.err());

        let tables = result.unwrap();
        assert_eq!(tables.product.len(), 4);
        assert_eq!(tables.tariff.len(), 4);
        assert!(!tables.supplier.is_empty());
        assert!(!tables.financial.is_empty());
        assert!(!tables.policy.is_empty());

        // Quoted thousands separator in volume_units
        assert_eq!(tables.product[2].volume_units, Some(1200.0));
        assert_eq!(tables.tariff[1].fta_duty_rate_percent, Some(5.0));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_products("does/not/exist.csv");
        assert!(matches!(result, Err(PlannerError::Io { .. })));
    }
}

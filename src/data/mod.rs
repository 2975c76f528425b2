//! Reference tables and record lookup

mod records;
pub mod loader;
pub mod lookup;

pub use records::{ProductRecord, TariffRecord, RawTable, TradeLane};
pub use loader::{DataTables, load_products, load_products_from_reader, load_tariffs, load_tariffs_from_reader};
pub use lookup::{find_lane, filter_products, filter_tariffs, valid_countries_for_hs_code, hs_codes};

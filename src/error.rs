//! Error types shared by data access and the landed cost engine

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    /// Lookup found no product row or no tariff row for the key triple
    #[error("no matching data for HS code {hs_code} ({exporting_country} -> {importing_country})")]
    NoMatchingRecord {
        hs_code: String,
        importing_country: String,
        exporting_country: String,
    },

    /// A required numeric column is empty and no override replaces it
    #[error("required field '{field}' is missing")]
    MissingRequiredField { field: &'static str },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value '{value}' in column '{column}'")]
    InvalidValue { column: String, value: String },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type PlannerResult<T> = Result<T, PlannerError>;

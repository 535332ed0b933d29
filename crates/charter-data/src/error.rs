//! Data loading errors.

use thiserror::Error;

/// Errors raised while reading a market data file.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("Row {row}: invalid value {value:?} for {column}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("Expected a JSON array of objects")]
    NotAnArray,
    #[error("Unsupported file extension: {0}")]
    UnsupportedFormat(String),
}

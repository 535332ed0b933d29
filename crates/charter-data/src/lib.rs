//! Data loading utilities for charter.
//!
//! Market data arrives as raw candles plus pre-computed indicator columns.
//! Loaders sort by time and log (never reject) inconsistent candles.

pub mod csv;
pub mod error;
pub mod json;
pub mod source;
pub mod time;
pub mod validation;

use std::path::Path;

pub use self::csv::{load_market_data_from_csv, load_market_data_from_reader, CsvLoader};
pub use error::DataError;
pub use json::{load_market_data_from_json, load_market_data_from_json_reader, JsonLoader};
pub use source::{DataSource, MarketData};
pub use validation::{analyze_time_gaps, validate_candle, GapReport};

/// Pick a loader from the file extension (`.csv` or `.json`).
pub fn loader_for_path(path: &Path) -> Result<Box<dyn DataSource>, DataError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => Ok(Box::new(CsvLoader::new(path))),
        "json" => Ok(Box::new(JsonLoader::new(path))),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

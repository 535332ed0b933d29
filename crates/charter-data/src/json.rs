//! JSON data loading implementation.
//!
//! Accepts an array of flat objects, one per time point:
//! `[{"time": 1700000000, "open": 1.0, ..., "RSI": 55.2, "MACD": 0.1}, ...]`.
//! Numbers may also be given as strings, as many exchange APIs do.

use std::io::Read;
use std::path::{Path, PathBuf};

use charter_core::Candle;
use charter_indicators::{IndicatorField, IndicatorRow};
use serde_json::{Map, Value};

use crate::error::DataError;
use crate::source::{assemble, DataSource, MarketData};
use crate::time::{normalize_timestamp, parse_time};

/// Loads market data from JSON files.
pub struct JsonLoader {
    path: PathBuf,
}

impl JsonLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for JsonLoader {
    fn load(&self) -> anyhow::Result<MarketData> {
        Ok(load_market_data_from_json(&self.path)?)
    }
}

fn invalid(row: usize, column: &str, value: &Value) -> DataError {
    DataError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn price(object: &Map<String, Value>, row: usize, key: &'static str) -> Result<f64, DataError> {
    let value = object.get(key).ok_or(DataError::MissingColumn(key))?;
    as_number(value).ok_or_else(|| invalid(row, key, value))
}

fn time(object: &Map<String, Value>, row: usize) -> Result<i64, DataError> {
    let (key, value) = ["time", "timestamp", "date"]
        .iter()
        .find_map(|k| object.get(*k).map(|v| (*k, v)))
        .ok_or(DataError::MissingColumn("time"))?;

    let parsed = match value {
        Value::Number(n) => n.as_f64().filter(|ts| ts.is_finite()).map(normalize_timestamp),
        Value::String(s) => parse_time(s),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(row, key, value))
}

fn record(value: &Value, row: usize) -> Result<(Candle, IndicatorRow), DataError> {
    let object = value.as_object().ok_or(DataError::NotAnArray)?;
    let time = time(object, row)?;

    let candle = Candle::new(
        time,
        price(object, row, "open")?,
        price(object, row, "high")?,
        price(object, row, "low")?,
        price(object, row, "close")?,
    );

    let mut indicators = IndicatorRow::new(time);
    for (key, value) in object {
        let Some(field) = IndicatorField::from_key(key) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let number = as_number(value).ok_or_else(|| invalid(row, key, value))?;
        indicators.values.insert(field, number);
    }

    Ok((candle, indicators))
}

/// Load market data from any JSON reader.
pub fn load_market_data_from_json_reader<R: Read>(reader: R) -> Result<MarketData, DataError> {
    let root: Value = serde_json::from_reader(reader)?;
    let items = root.as_array().ok_or(DataError::NotAnArray)?;

    let records = items
        .iter()
        .enumerate()
        .map(|(row, item)| record(item, row))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(assemble(records))
}

/// Load market data from a JSON file.
pub fn load_market_data_from_json<P: AsRef<Path>>(path: P) -> Result<MarketData, DataError> {
    let file = std::io::BufReader::new(std::fs::File::open(path)?);
    load_market_data_from_json_reader(file)
}

//! CSV data loading implementation.

use std::io::Read;
use std::path::{Path, PathBuf};

use charter_core::Candle;
use charter_indicators::{IndicatorField, IndicatorRow};

use crate::error::DataError;
use crate::source::{assemble, DataSource, MarketData};
use crate::time::parse_time;

/// Loads market data from CSV files.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for CsvLoader {
    fn load(&self) -> anyhow::Result<MarketData> {
        Ok(load_market_data_from_csv(&self.path)?)
    }
}

/// Column positions resolved from the header row.
struct Columns {
    time: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    indicators: Vec<(usize, IndicatorField)>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DataError> {
        let lower: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &'static str| {
            lower
                .iter()
                .position(|h| h == name)
                .ok_or(DataError::MissingColumn(name))
        };

        let time = lower
            .iter()
            .position(|h| h == "time" || h.contains("timestamp") || h == "date")
            .ok_or(DataError::MissingColumn("time"))?;

        let indicators = headers
            .iter()
            .enumerate()
            .filter_map(|(i, h)| IndicatorField::from_key(h).map(|field| (i, field)))
            .collect();

        Ok(Self {
            time,
            open: find("open")?,
            high: find("high")?,
            low: find("low")?,
            close: find("close")?,
            indicators,
        })
    }
}

fn parse_price(record: &csv::StringRecord, row: usize, col: usize, name: &str) -> Result<f64, DataError> {
    let raw = record.get(col).unwrap_or("").trim();
    raw.parse().map_err(|_| DataError::InvalidValue {
        row,
        column: name.to_string(),
        value: raw.to_string(),
    })
}

/// Load market data from any CSV reader.
///
/// Requires a header row with a time column (`time`, `date` or anything
/// containing `timestamp`) and `open`/`high`/`low`/`close`. Any column named
/// after a known indicator field is picked up; empty cells leave that field
/// absent for the row.
pub fn load_market_data_from_reader<R: Read>(reader: R) -> Result<MarketData, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(reader.headers()?)?;
    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let raw_time = record.get(columns.time).unwrap_or("");
        let time = parse_time(raw_time).ok_or_else(|| DataError::InvalidValue {
            row,
            column: "time".to_string(),
            value: raw_time.to_string(),
        })?;

        let candle = Candle::new(
            time,
            parse_price(&record, row, columns.open, "open")?,
            parse_price(&record, row, columns.high, "high")?,
            parse_price(&record, row, columns.low, "low")?,
            parse_price(&record, row, columns.close, "close")?,
        );

        let mut indicators = IndicatorRow::new(time);
        for &(col, field) in &columns.indicators {
            if record.get(col).map_or(true, |cell| cell.trim().is_empty()) {
                continue;
            }
            indicators.values.insert(field, parse_price(&record, row, col, field.key())?);
        }

        records.push((candle, indicators));
    }

    Ok(assemble(records))
}

/// Load market data from a CSV file.
pub fn load_market_data_from_csv<P: AsRef<Path>>(path: P) -> Result<MarketData, DataError> {
    let file = std::fs::File::open(path)?;
    load_market_data_from_reader(file)
}

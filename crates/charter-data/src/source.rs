//! Data source trait definition.

use charter_core::Candle;
use charter_indicators::{IndicatorFrame, IndicatorRow};

/// Raw candles plus the pre-computed indicator rows for the same time points.
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    pub candles: Vec<Candle>,
    pub indicators: IndicatorFrame,
}

impl MarketData {
    pub fn new(candles: Vec<Candle>, indicator_rows: Vec<IndicatorRow>) -> Self {
        Self {
            candles,
            indicators: IndicatorFrame::new(indicator_rows),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

/// Trait for types that can load market data.
///
/// This trait uses `anyhow::Result` for flexible error handling.
pub trait DataSource {
    fn load(&self) -> anyhow::Result<MarketData>;
}

/// Sort loaded records by time, report data problems, and split into
/// candles and indicator rows.
pub(crate) fn assemble(mut records: Vec<(Candle, IndicatorRow)>) -> MarketData {
    records.sort_by_key(|(candle, _)| candle.time);

    let (candles, rows): (Vec<Candle>, Vec<IndicatorRow>) = records.into_iter().unzip();
    crate::validation::report_candles(&candles);

    let data = MarketData::new(candles, rows);
    log::info!(
        "Loaded {} candles with indicator fields [{}]",
        data.candles.len(),
        data.indicators
            .available()
            .iter()
            .map(|f| f.key())
            .collect::<Vec<_>>()
            .join(", ")
    );
    data
}

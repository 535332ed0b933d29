//! Candle transforms: alternate chart representations of a raw candle sequence.

mod heikin_ashi;
mod renko;

use std::fmt;
use std::str::FromStr;

use charter_core::Candle;
use serde::{Deserialize, Serialize};

use crate::types::RenkoConfig;

pub use heikin_ashi::heikin_ashi;
pub use renko::{renko, renko_with, DEFAULT_BRICK_SIZE, MAX_BRICKS};

/// Chart representation selected for the main price panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartType {
    /// Raw candles, untransformed.
    #[default]
    Candlestick,
    HeikinAshi,
    Renko,
}

impl ChartType {
    /// Returns a short label for this chart type.
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Candlestick => "candlestick",
            ChartType::HeikinAshi => "heikin-ashi",
            ChartType::Renko => "renko",
        }
    }

    /// Returns all chart types in display order.
    pub fn all() -> &'static [ChartType] {
        &[ChartType::Candlestick, ChartType::HeikinAshi, ChartType::Renko]
    }

    /// True when the output's `time` values are real timestamps.
    pub fn has_real_time(&self) -> bool {
        !matches!(self, ChartType::Renko)
    }

    /// Apply this representation to `candles`.
    pub fn apply(&self, candles: &[Candle], renko_config: &RenkoConfig) -> Vec<Candle> {
        match self {
            ChartType::Candlestick => candles.to_vec(),
            ChartType::HeikinAshi => heikin_ashi(candles),
            ChartType::Renko => renko_with(candles, renko_config),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown chart type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChartTypeError(String);

impl fmt::Display for ParseChartTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown chart type: {}", self.0)
    }
}

impl std::error::Error for ParseChartTypeError {}

impl FromStr for ChartType {
    type Err = ParseChartTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "candlestick" | "candles" | "candle" => Ok(ChartType::Candlestick),
            "heikin-ashi" | "heikinashi" | "ha" => Ok(ChartType::HeikinAshi),
            "renko" => Ok(ChartType::Renko),
            _ => Err(ParseChartTypeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart_type() {
        assert_eq!("heikin_ashi".parse::<ChartType>(), Ok(ChartType::HeikinAshi));
        assert_eq!("Renko".parse::<ChartType>(), Ok(ChartType::Renko));
        assert_eq!("candles".parse::<ChartType>(), Ok(ChartType::Candlestick));
        assert!("line".parse::<ChartType>().is_err());
    }

    #[test]
    fn test_label_round_trips() {
        for chart_type in ChartType::all() {
            assert_eq!(chart_type.label().parse::<ChartType>(), Ok(*chart_type));
        }
    }

    #[test]
    fn test_candlestick_is_passthrough() {
        let candles = vec![Candle::new(1, 1.0, 2.0, 0.5, 1.5)];
        let out = ChartType::Candlestick.apply(&candles, &RenkoConfig::default());
        assert_eq!(out, candles);
    }

    #[test]
    fn test_renko_has_synthetic_time() {
        assert!(!ChartType::Renko.has_real_time());
        assert!(ChartType::HeikinAshi.has_real_time());
    }
}

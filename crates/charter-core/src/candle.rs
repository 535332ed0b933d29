//! Candle data structures for OHLC price data.

use serde::{Deserialize, Serialize};

/// One OHLC candle.
///
/// `time` is unix seconds for raw data. Derived sequences may carry synthetic
/// times (Renko bricks use a strictly increasing counter, not wall-clock time).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    /// Arithmetic mean of open, high, low and close.
    #[inline]
    pub fn ohlc4(&self) -> f64 {
        (self.open + self.high + self.low + self.close) / 4.0
    }

    /// Top of the candle body.
    #[inline]
    pub fn body_top(&self) -> f64 {
        self.open.max(self.close)
    }

    /// Bottom of the candle body.
    #[inline]
    pub fn body_bottom(&self) -> f64 {
        self.open.min(self.close)
    }

    /// True when close is at or above open.
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Trait for types that provide OHLC data.
pub trait OHLC {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;
}

impl OHLC for Candle {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }
}

//! Core types for the charter dashboard.
//!
//! This crate provides fundamental data structures shared by every other crate:
//! - `Candle` - OHLC candle data
//! - `SeriesPoint` / `HistogramPoint` - points pushed into a rendering widget

pub mod candle;
pub mod series;

pub use candle::{Candle, OHLC};
pub use series::{HistogramPoint, SeriesPoint};

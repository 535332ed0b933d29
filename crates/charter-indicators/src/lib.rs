//! Pre-computed indicator data and the panel families that display it.
//!
//! Indicator values (RSI, MACD, ATR, ...) are computed upstream; this crate
//! only describes which fields exist, which a dataset provides, and how each
//! panel family maps fields to series.

pub mod field;
pub mod frame;
pub mod panel;

pub use field::{AvailableFields, IndicatorField, ParseIndicatorFieldError};
pub use frame::{IndicatorFrame, IndicatorRow};
pub use panel::{PanelKind, ParsePanelKindError, SeriesSpec, SeriesStyle};

//! The seam to the external rendering widget.
//!
//! The widget is an opaque sink: panels add series, push point arrays into
//! them, and manage size and lifetime. Nothing here draws.

use charter_config::{ColorConfig, WidgetConfig};
use charter_core::{Candle, HistogramPoint, SeriesPoint};

use crate::error::WidgetError;

/// Handle to a series inside one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(pub u32);

/// The kind of series a widget draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Candlestick,
    Line,
    Histogram,
}

/// A DOM-like region a widget is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl Container {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }
}

/// Widget-wide configuration (dimensions come from the container).
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetOptions {
    pub locale: String,
    pub colors: ColorConfig,
}

impl WidgetOptions {
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self {
            locale: config.locale.clone(),
            colors: config.colors.clone(),
        }
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self::from_config(&WidgetConfig::default())
    }
}

/// Per-series display options.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesOptions {
    pub title: String,
    pub color: String,
}

impl SeriesOptions {
    pub fn new(title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            color: color.into(),
        }
    }
}

/// A horizontal line at a fixed price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLine {
    pub price: f64,
    pub color: String,
    pub title: String,
}

/// A rendering widget instance.
pub trait ChartWidget {
    fn add_candlestick_series(&mut self, options: &SeriesOptions) -> Result<SeriesId, WidgetError>;

    fn add_line_series(&mut self, options: &SeriesOptions) -> Result<SeriesId, WidgetError>;

    fn add_histogram_series(&mut self, options: &SeriesOptions) -> Result<SeriesId, WidgetError>;

    fn set_candle_data(&mut self, series: SeriesId, data: &[Candle]) -> Result<(), WidgetError>;

    fn set_line_data(&mut self, series: SeriesId, data: &[SeriesPoint]) -> Result<(), WidgetError>;

    fn set_histogram_data(
        &mut self,
        series: SeriesId,
        data: &[HistogramPoint],
    ) -> Result<(), WidgetError>;

    fn add_price_line(&mut self, series: SeriesId, line: &PriceLine) -> Result<(), WidgetError>;

    fn remove_series(&mut self, series: SeriesId) -> Result<(), WidgetError>;

    /// Fit the visible range to the loaded data.
    fn fit_content(&mut self);

    fn resize(&mut self, width: u32, height: u32);

    /// Release the widget and everything it holds. Must be safe to call once
    /// per widget; no other method is called afterwards.
    fn remove(&mut self);
}

/// Creates widgets attached to a container.
pub trait WidgetFactory {
    fn create(
        &self,
        container: &Container,
        options: &WidgetOptions,
    ) -> Result<Box<dyn ChartWidget>, WidgetError>;
}

//! Point types handed to a rendering widget.

use serde::{Deserialize, Serialize};

/// A single `(time, value)` sample of a line series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: i64,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// A histogram bar with an optional per-bar color override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramPoint {
    pub time: i64,
    pub value: f64,
    /// CSS-style color string; `None` uses the series default.
    pub color: Option<String>,
}

impl HistogramPoint {
    pub fn new(time: i64, value: f64) -> Self {
        Self {
            time,
            value,
            color: None,
        }
    }

    /// Set a per-bar color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl From<SeriesPoint> for HistogramPoint {
    fn from(point: SeriesPoint) -> Self {
        Self::new(point.time, point.value)
    }
}

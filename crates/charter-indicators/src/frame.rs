//! Per-time indicator rows as delivered by the data source.

use std::collections::BTreeMap;

use charter_core::{HistogramPoint, SeriesPoint};
use crate::field::{AvailableFields, IndicatorField};

/// Indicator values for one time point. Missing keys are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorRow {
    pub time: i64,
    pub values: BTreeMap<IndicatorField, f64>,
}

impl IndicatorRow {
    pub fn new(time: i64) -> Self {
        Self {
            time,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, field: IndicatorField, value: f64) -> Self {
        self.values.insert(field, value);
        self
    }

    pub fn get(&self, field: IndicatorField) -> Option<f64> {
        self.values.get(&field).copied()
    }

    pub fn fields(&self) -> AvailableFields {
        self.values.keys().copied().collect()
    }
}

/// An ordered sequence of indicator rows with its field schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorFrame {
    rows: Vec<IndicatorRow>,
    available: AvailableFields,
}

impl IndicatorFrame {
    /// Wrap `rows`. Availability is taken from the first row: a field the
    /// first row lacks is treated as not applicable for the whole dataset.
    pub fn new(rows: Vec<IndicatorRow>) -> Self {
        let available = rows.first().map(IndicatorRow::fields).unwrap_or_default();
        Self { rows, available }
    }

    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn available(&self) -> AvailableFields {
        self.available
    }

    /// Line points for `field`. Empty when the field is not available; rows
    /// that lack the value are skipped rather than emitted as gaps.
    pub fn line(&self, field: IndicatorField) -> Vec<SeriesPoint> {
        if !self.available.contains(field) {
            return Vec::new();
        }
        self.rows
            .iter()
            .filter_map(|row| row.get(field).map(|value| SeriesPoint::new(row.time, value)))
            .collect()
    }

    /// Histogram bars for `field`, same selection rules as [`Self::line`].
    pub fn histogram(&self, field: IndicatorField) -> Vec<HistogramPoint> {
        self.line(field).into_iter().map(HistogramPoint::from).collect()
    }
}

impl From<Vec<IndicatorRow>> for IndicatorFrame {
    fn from(rows: Vec<IndicatorRow>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_from_first_row() {
        let frame = IndicatorFrame::new(vec![
            IndicatorRow::new(1).with(IndicatorField::Rsi, 55.0),
            IndicatorRow::new(2)
                .with(IndicatorField::Rsi, 56.0)
                .with(IndicatorField::Atr, 1.2),
        ]);

        assert!(frame.available().contains(IndicatorField::Rsi));
        assert!(!frame.available().contains(IndicatorField::Atr));
        assert!(frame.line(IndicatorField::Atr).is_empty());
    }

    #[test]
    fn test_line_skips_missing_values() {
        let frame = IndicatorFrame::new(vec![
            IndicatorRow::new(1).with(IndicatorField::Obv, 10.0),
            IndicatorRow::new(2),
            IndicatorRow::new(3).with(IndicatorField::Obv, 12.0),
        ]);

        assert_eq!(
            frame.line(IndicatorField::Obv),
            vec![SeriesPoint::new(1, 10.0), SeriesPoint::new(3, 12.0)]
        );
    }

    #[test]
    fn test_empty_frame() {
        let frame = IndicatorFrame::default();
        assert!(frame.is_empty());
        assert!(frame.available().is_empty());
    }
}

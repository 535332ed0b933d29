//! Indicator panel families and the series each one draws.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::field::{AvailableFields, IndicatorField};

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    /// Bars; with `signed_colors` each bar is colored by the sign of its value.
    Histogram { signed_colors: bool },
}

/// One series within a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSpec {
    pub field: IndicatorField,
    pub style: SeriesStyle,
    /// Default color (CSS string).
    pub color: &'static str,
}

impl SeriesSpec {
    const fn line(field: IndicatorField, color: &'static str) -> Self {
        Self {
            field,
            style: SeriesStyle::Line,
            color,
        }
    }

    const fn histogram(field: IndicatorField, color: &'static str, signed_colors: bool) -> Self {
        Self {
            field,
            style: SeriesStyle::Histogram { signed_colors },
            color,
        }
    }
}

const VOLUME_SERIES: &[SeriesSpec] = &[
    SeriesSpec::histogram(IndicatorField::Volume, "#26a69a", false),
    SeriesSpec::line(IndicatorField::Obv, "#ff9800"),
];

const MACD_SERIES: &[SeriesSpec] = &[
    SeriesSpec::line(IndicatorField::Macd, "#2196f3"),
    SeriesSpec::line(IndicatorField::MacdSignal, "#ff9800"),
    SeriesSpec::histogram(IndicatorField::MacdHist, "#26a69a", true),
];

const OSCILLATOR_SERIES: &[SeriesSpec] = &[
    SeriesSpec::line(IndicatorField::Rsi, "#9c27b0"),
    SeriesSpec::line(IndicatorField::Stochastic, "#2196f3"),
    SeriesSpec::line(IndicatorField::WilliamsR, "#ff5252"),
];

const VOLATILITY_SERIES: &[SeriesSpec] = &[SeriesSpec::line(IndicatorField::Atr, "#ffeb3b")];

/// An indicator family rendered in its own sub-panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Volume,
    Macd,
    Oscillators,
    Volatility,
}

impl PanelKind {
    pub fn label(&self) -> &'static str {
        match self {
            PanelKind::Volume => "volume",
            PanelKind::Macd => "macd",
            PanelKind::Oscillators => "oscillators",
            PanelKind::Volatility => "volatility",
        }
    }

    pub fn all() -> &'static [PanelKind] {
        &[
            PanelKind::Volume,
            PanelKind::Macd,
            PanelKind::Oscillators,
            PanelKind::Volatility,
        ]
    }

    /// Every series this family can draw, in draw order.
    pub fn series(&self) -> &'static [SeriesSpec] {
        match self {
            PanelKind::Volume => VOLUME_SERIES,
            PanelKind::Macd => MACD_SERIES,
            PanelKind::Oscillators => OSCILLATOR_SERIES,
            PanelKind::Volatility => VOLATILITY_SERIES,
        }
    }

    /// The series whose field the dataset actually provides.
    pub fn applicable_series(
        &self,
        available: AvailableFields,
    ) -> impl Iterator<Item = &'static SeriesSpec> {
        self.series()
            .iter()
            .filter(move |spec| available.contains(spec.field))
    }

    /// True when at least one series of this family can be drawn.
    pub fn is_applicable(&self, available: AvailableFields) -> bool {
        self.applicable_series(available).next().is_some()
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown panel name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePanelKindError(String);

impl fmt::Display for ParsePanelKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown panel: {}", self.0)
    }
}

impl std::error::Error for ParsePanelKindError {}

impl FromStr for PanelKind {
    type Err = ParsePanelKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "volume" => Ok(PanelKind::Volume),
            "macd" => Ok(PanelKind::Macd),
            "oscillators" | "oscillator" => Ok(PanelKind::Oscillators),
            "volatility" | "atr" => Ok(PanelKind::Volatility),
            _ => Err(ParsePanelKindError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applicable_series_filters_absent_fields() {
        let available: AvailableFields =
            [IndicatorField::Macd, IndicatorField::MacdHist].into_iter().collect();

        let fields: Vec<IndicatorField> = PanelKind::Macd
            .applicable_series(available)
            .map(|spec| spec.field)
            .collect();

        assert_eq!(fields, vec![IndicatorField::Macd, IndicatorField::MacdHist]);
    }

    #[test]
    fn test_is_applicable() {
        let available: AvailableFields = [IndicatorField::Atr].into_iter().collect();

        assert!(PanelKind::Volatility.is_applicable(available));
        assert!(!PanelKind::Volume.is_applicable(available));
    }

    #[test]
    fn test_every_field_belongs_to_one_panel() {
        for field in IndicatorField::ALL {
            let owners = PanelKind::all()
                .iter()
                .filter(|kind| kind.series().iter().any(|spec| spec.field == field))
                .count();
            assert_eq!(owners, 1, "{field} should belong to exactly one panel");
        }
    }

    #[test]
    fn test_parse_panel_kind() {
        assert_eq!("MACD".parse::<PanelKind>(), Ok(PanelKind::Macd));
        assert_eq!("atr".parse::<PanelKind>(), Ok(PanelKind::Volatility));
        assert!("ichimoku".parse::<PanelKind>().is_err());
    }
}

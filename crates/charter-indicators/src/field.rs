//! Known pre-computed indicator fields and the per-dataset availability set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An indicator column supplied pre-computed by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndicatorField {
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "MACD")]
    Macd,
    #[serde(rename = "MACD_signal")]
    MacdSignal,
    #[serde(rename = "MACD_hist")]
    MacdHist,
    #[serde(rename = "Stochastic_Oscillator")]
    Stochastic,
    #[serde(rename = "Williams_%R")]
    WilliamsR,
    #[serde(rename = "OBV")]
    Obv,
    #[serde(rename = "Volume")]
    Volume,
    #[serde(rename = "ATR")]
    Atr,
}

impl IndicatorField {
    /// Every known field, in column order.
    pub const ALL: [IndicatorField; 9] = [
        IndicatorField::Rsi,
        IndicatorField::Macd,
        IndicatorField::MacdSignal,
        IndicatorField::MacdHist,
        IndicatorField::Stochastic,
        IndicatorField::WilliamsR,
        IndicatorField::Obv,
        IndicatorField::Volume,
        IndicatorField::Atr,
    ];

    /// The key this field carries in the data source.
    pub fn key(&self) -> &'static str {
        match self {
            IndicatorField::Rsi => "RSI",
            IndicatorField::Macd => "MACD",
            IndicatorField::MacdSignal => "MACD_signal",
            IndicatorField::MacdHist => "MACD_hist",
            IndicatorField::Stochastic => "Stochastic_Oscillator",
            IndicatorField::WilliamsR => "Williams_%R",
            IndicatorField::Obv => "OBV",
            IndicatorField::Volume => "Volume",
            IndicatorField::Atr => "ATR",
        }
    }

    /// Case-insensitive lookup by data source key.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key))
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for IndicatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when parsing an unknown indicator key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIndicatorFieldError(String);

impl fmt::Display for ParseIndicatorFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown indicator field: {}", self.0)
    }
}

impl std::error::Error for ParseIndicatorFieldError {}

impl FromStr for IndicatorField {
    type Err = ParseIndicatorFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| ParseIndicatorFieldError(s.to_string()))
    }
}

/// The set of indicator fields a dataset provides.
///
/// Computed once per dataset and consulted by every panel, instead of probing
/// individual rows for missing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AvailableFields(u16);

impl AvailableFields {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        IndicatorField::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, field: IndicatorField) {
        self.0 |= field.bit();
    }

    pub fn contains(&self, field: IndicatorField) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate present fields in column order.
    pub fn iter(&self) -> impl Iterator<Item = IndicatorField> + '_ {
        IndicatorField::ALL
            .into_iter()
            .filter(move |field| self.contains(*field))
    }
}

impl FromIterator<IndicatorField> for AvailableFields {
    fn from_iter<I: IntoIterator<Item = IndicatorField>>(iter: I) -> Self {
        let mut set = Self::empty();
        for field in iter {
            set.insert(field);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_is_case_insensitive() {
        assert_eq!(IndicatorField::from_key("volume"), Some(IndicatorField::Volume));
        assert_eq!(IndicatorField::from_key("williams_%r"), Some(IndicatorField::WilliamsR));
        assert_eq!(IndicatorField::from_key(" MACD_hist "), Some(IndicatorField::MacdHist));
        assert_eq!(IndicatorField::from_key("close"), None);
    }

    #[test]
    fn test_key_matches_serde_name() {
        for field in IndicatorField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.key()));
        }
    }

    #[test]
    fn test_available_fields_set() {
        let mut set = AvailableFields::empty();
        assert!(set.is_empty());

        set.insert(IndicatorField::Atr);
        set.insert(IndicatorField::Rsi);
        set.insert(IndicatorField::Rsi);

        assert_eq!(set.len(), 2);
        assert!(set.contains(IndicatorField::Atr));
        assert!(!set.contains(IndicatorField::Macd));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![IndicatorField::Rsi, IndicatorField::Atr]
        );
    }

    #[test]
    fn test_all_contains_every_field() {
        let all = AvailableFields::all();
        assert_eq!(all.len(), IndicatorField::ALL.len());
    }
}

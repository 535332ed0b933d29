//! Support/resistance level types.

use serde::{Deserialize, Serialize};

/// Whether a level was found at a local low or a local high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelKind {
    /// Local minimum of lows.
    Support,
    /// Local maximum of highs.
    Resistance,
}

impl LevelKind {
    pub fn label(&self) -> &'static str {
        match self {
            LevelKind::Support => "support",
            LevelKind::Resistance => "resistance",
        }
    }
}

/// A detected price level. Ephemeral, recomputed per render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: LevelKind,
}

impl Level {
    pub fn support(price: f64) -> Self {
        Self {
            price,
            kind: LevelKind::Support,
        }
    }

    pub fn resistance(price: f64) -> Self {
        Self {
            price,
            kind: LevelKind::Resistance,
        }
    }

    #[inline]
    pub fn is_support(&self) -> bool {
        self.kind == LevelKind::Support
    }

    #[inline]
    pub fn is_resistance(&self) -> bool {
        self.kind == LevelKind::Resistance
    }

    /// Returns true if `price` lies within `tolerance` of this level, relative
    /// to this level's price.
    ///
    /// A zero-priced level is never near anything.
    pub fn is_near(&self, price: f64, tolerance: f64) -> bool {
        if self.price == 0.0 {
            return false;
        }
        (price - self.price).abs() / self.price.abs() < tolerance
    }
}

//! Parameter bundles for the transforms and the level detector.

use serde::{Deserialize, Serialize};

use crate::levels::{DEFAULT_DEDUP_TOLERANCE, DEFAULT_SR_DEPTH};
use crate::transform::DEFAULT_BRICK_SIZE;

/// Renko parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenkoConfig {
    /// Price distance covered by one brick. Must be positive.
    pub brick_size: f64,
}

impl Default for RenkoConfig {
    fn default() -> Self {
        Self {
            brick_size: DEFAULT_BRICK_SIZE,
        }
    }
}

/// Support/resistance detector parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrConfig {
    /// Half-width of the centered window, in candles.
    pub depth: usize,
    /// Relative price band within which two levels are treated as the same.
    pub dedup_tolerance: f64,
}

impl Default for SrConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SR_DEPTH,
            dedup_tolerance: DEFAULT_DEDUP_TOLERANCE,
        }
    }
}

impl SrConfig {
    /// Default config with a custom depth.
    pub fn with_depth(depth: usize) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }
}

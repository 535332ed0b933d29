//! Support/resistance detection over a centered window.
//!
//! The window is symmetric around each candidate index, so detection needs
//! `depth` candles of lookahead and cannot run on a live edge.

use charter_core::Candle;

use crate::types::{Level, SrConfig};

/// Default window half-width in candles.
pub const DEFAULT_SR_DEPTH: usize = 14;

/// Default relative band (0.1%) within which levels are merged.
pub const DEFAULT_DEDUP_TOLERANCE: f64 = 0.001;

/// Find support and resistance levels with the default tolerance.
pub fn find_sr_levels(candles: &[Candle], depth: usize) -> Vec<Level> {
    find_sr_levels_with(candles, &SrConfig::with_depth(depth))
}

/// Find support and resistance levels.
///
/// For every index `i` in `[depth, len - depth)` the window is the `2 * depth`
/// candles `i - depth .. i + depth`. A candle whose high equals the window's
/// highest high is a resistance; one whose low equals the window's lowest low
/// is a support. Resistance is emitted before support for the same index, and
/// the result is then deduplicated with [`dedup_levels`].
pub fn find_sr_levels_with(candles: &[Candle], config: &SrConfig) -> Vec<Level> {
    let depth = config.depth;
    let too_short = depth
        .checked_mul(2)
        .map_or(true, |window| candles.len() <= window);
    if depth == 0 || too_short {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for i in depth..candles.len() - depth {
        let window = &candles[i - depth..i + depth];
        let max_high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let min_low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);

        let candle = &candles[i];
        if candle.high == max_high {
            candidates.push(Level::resistance(candle.high));
        }
        if candle.low == min_low {
            candidates.push(Level::support(candle.low));
        }
    }

    let found = candidates.len();
    let levels = dedup_levels(candidates, config.dedup_tolerance);
    log::debug!(
        "sr levels: {} candidates, {} after dedup (depth={}, candles={})",
        found,
        levels.len(),
        depth,
        candles.len()
    );
    levels
}

/// Drop levels that sit within `tolerance` of an already accepted level.
///
/// The band is relative to the candidate's price, so a zero-priced candidate
/// is always kept. Order is preserved and the first level seen wins,
/// regardless of kind.
pub fn dedup_levels(levels: impl IntoIterator<Item = Level>, tolerance: f64) -> Vec<Level> {
    let mut accepted: Vec<Level> = Vec::new();
    for candidate in levels {
        if !accepted.iter().any(|a| candidate.is_near(a.price, tolerance)) {
            accepted.push(candidate);
        }
    }
    accepted
}

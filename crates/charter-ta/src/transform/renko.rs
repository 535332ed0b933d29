//! Renko bricks.
//!
//! Bricks are emitted only for whole multiples of the brick size measured from
//! the last recorded brick close. Sub-brick movement carries forward implicitly.
//! Brick times are a synthetic, strictly increasing counter derived from the
//! previous source candle's time; they are not wall-clock timestamps.

use charter_core::Candle;

use crate::types::RenkoConfig;

/// Default brick size in price units.
pub const DEFAULT_BRICK_SIZE: f64 = 0.5;

/// Upper bound on bricks per call. A brick size far below the price scale
/// would otherwise allocate without limit.
pub const MAX_BRICKS: usize = 1_000_000;

#[derive(Debug, Clone, Copy)]
struct RenkoState {
    last_close: f64,
    last_time: i64,
    last_brick_time: Option<i64>,
}

impl RenkoState {
    fn seed(first: &Candle) -> Self {
        Self {
            last_close: first.close,
            last_time: first.time,
            last_brick_time: None,
        }
    }

    /// Advance over one source candle, pushing any completed bricks.
    ///
    /// Returns `false` without pushing anything when the candle would take the
    /// output past [`MAX_BRICKS`].
    fn step(&mut self, candle: &Candle, brick_size: f64, out: &mut Vec<Candle>) -> bool {
        let diff = candle.close - self.last_close;
        if !diff.is_finite() {
            log::debug!("renko: skipping candle at {} with non-finite close", candle.time);
            return true;
        }

        let count = (diff.abs() / brick_size).floor();
        if count > (MAX_BRICKS - out.len()) as f64 {
            return false;
        }
        let bricks = count as usize;
        let step = brick_size * diff.signum();

        for brick_index in 0..bricks {
            let open = self.last_close;
            self.last_close += step;
            let close = self.last_close;

            let time = self.next_brick_time(brick_index);
            out.push(Candle::new(time, open, open.max(close), open.min(close), close));
        }

        self.last_time = candle.time;
        true
    }

    /// `last_time + brick_index`, bumped past the previous brick on collision.
    fn next_brick_time(&mut self, brick_index: usize) -> i64 {
        let base = self
            .last_time
            .saturating_add(i64::try_from(brick_index).unwrap_or(i64::MAX));
        let time = match self.last_brick_time {
            Some(prev) if base <= prev => prev.saturating_add(1),
            _ => base,
        };
        self.last_brick_time = Some(time);
        time
    }
}

/// Convert raw candles into Renko bricks of `brick_size`.
///
/// A non-positive or non-finite brick size produces no bricks, as does a
/// brick size so small that the output would exceed [`MAX_BRICKS`].
pub fn renko(candles: &[Candle], brick_size: f64) -> Vec<Candle> {
    let Some(first) = candles.first() else {
        return Vec::new();
    };

    if !(brick_size.is_finite() && brick_size > 0.0) {
        log::warn!("renko: invalid brick size {brick_size}, emitting no bricks");
        return Vec::new();
    }

    let mut state = RenkoState::seed(first);
    let mut bricks = Vec::new();
    for candle in candles {
        if !state.step(candle, brick_size, &mut bricks) {
            log::warn!(
                "renko: brick size {brick_size} yields more than {MAX_BRICKS} bricks, emitting no bricks"
            );
            return Vec::new();
        }
    }
    bricks
}

/// [`renko`] driven by a [`RenkoConfig`].
pub fn renko_with(candles: &[Candle], config: &RenkoConfig) -> Vec<Candle> {
    renko(candles, config.brick_size)
}

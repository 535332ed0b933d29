//! Heikin-Ashi smoothing.
//!
//! Each output candle depends on the previous *output* candle, so the
//! transform is a strict left-to-right scan over the input.

use charter_core::Candle;

/// Carry state between Heikin-Ashi steps: the previous output's open/close.
#[derive(Debug, Clone, Copy)]
struct HeikinAshiState {
    prev_open: f64,
    prev_close: f64,
}

impl HeikinAshiState {
    /// The first candle is seeded with the raw candle itself.
    fn seed(first: &Candle) -> Self {
        Self {
            prev_open: first.open,
            prev_close: first.close,
        }
    }

    fn step(&mut self, candle: &Candle) -> Candle {
        let close = candle.ohlc4();
        let open = (self.prev_open + self.prev_close) / 2.0;
        let high = candle.high.max(open).max(close);
        let low = candle.low.min(open).min(close);

        self.prev_open = open;
        self.prev_close = close;

        Candle::new(candle.time, open, high, low, close)
    }
}

/// Convert raw candles into Heikin-Ashi candles.
///
/// The output has the same length and times as the input. Empty input gives
/// empty output.
pub fn heikin_ashi(candles: &[Candle]) -> Vec<Candle> {
    let Some(first) = candles.first() else {
        return Vec::new();
    };

    candles
        .iter()
        .scan(HeikinAshiState::seed(first), |state, candle| Some(state.step(candle)))
        .collect()
}

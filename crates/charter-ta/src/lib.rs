//! Charter Technical Analysis - chart transforms and level detection.
//!
//! Everything in this crate is a pure function over a borrowed candle slice:
//! inputs are never mutated and every call allocates a fresh output, so the
//! functions can run on every re-render.
//!
//! # Core Concepts
//!
//! - **Heikin-Ashi**: smoothed candles, each averaged against the previous output
//! - **Renko**: fixed-size price bricks with synthetic, strictly increasing times
//! - **Levels**: support/resistance prices from centered local extrema
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use charter_core::Candle;
//! use charter_ta::{find_sr_levels, heikin_ashi, renko, DEFAULT_BRICK_SIZE, DEFAULT_SR_DEPTH};
//!
//! let candles = vec![/* your candle data */];
//!
//! let smoothed = heikin_ashi(&candles);
//! let bricks = renko(&candles, DEFAULT_BRICK_SIZE);
//! for level in find_sr_levels(&candles, DEFAULT_SR_DEPTH) {
//!     println!("{} at {}", level.kind.label(), level.price);
//! }
//! ```

pub mod levels;
pub mod transform;
pub mod types;

pub use levels::{
    dedup_levels, find_sr_levels, find_sr_levels_with, DEFAULT_DEDUP_TOLERANCE,
    DEFAULT_SR_DEPTH,
};
pub use transform::{
    heikin_ashi, renko, renko_with, ChartType, ParseChartTypeError, DEFAULT_BRICK_SIZE, MAX_BRICKS,
};
pub use types::{Level, LevelKind, RenkoConfig, SrConfig};

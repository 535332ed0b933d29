//! Core types for chart transforms and level detection.

pub mod config;
pub mod level;

pub use config::{RenkoConfig, SrConfig};
pub use level::{Level, LevelKind};

//! Configuration management for charter.
//!
//! Loads configuration from TOML files with support for per-symbol transform
//! parameters (a sensible Renko brick size depends on the instrument's price
//! scale).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub transforms: TransformsConfig,
    pub dashboard: DashboardConfig,
    pub widget: WidgetConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./config.toml`
    /// 2. `~/.config/charter/config.toml`
    ///
    /// Returns default config if no file found.
    pub fn load_default() -> Self {
        if let Ok(config) = Self::load(Self::default_path()) {
            return config;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("charter").join("config.toml");
            if let Ok(config) = Self::load(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Get transform parameters for a symbol.
    /// Falls back to the defaults if the symbol is not configured.
    pub fn transforms_for_symbol(&self, symbol: &str) -> TransformParams {
        self.transforms
            .symbols
            .get(symbol)
            .map(|o| self.transforms.default.merge(o))
            .unwrap_or(self.transforms.default)
    }
}

/// General application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Symbol shown when none is given.
    pub default_symbol: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_symbol: "BTCUSDT".to_string(),
        }
    }
}

/// Transform configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformsConfig {
    /// Default transform parameters.
    pub default: TransformParams,
    /// Per-symbol overrides.
    #[serde(default)]
    pub symbols: HashMap<String, TransformOverride>,
}

impl Default for TransformsConfig {
    fn default() -> Self {
        let mut symbols = HashMap::new();

        // Brick sizes scaled to typical price levels
        symbols.insert("BTCUSDT".to_string(), TransformOverride {
            brick_size: Some(100.0),
            ..Default::default()
        });
        symbols.insert("ETHUSDT".to_string(), TransformOverride {
            brick_size: Some(10.0),
            ..Default::default()
        });

        Self {
            default: TransformParams::default(),
            symbols,
        }
    }
}

/// Transform parameters (full config with all fields).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    /// Renko brick size in price units.
    pub brick_size: f64,
    /// Support/resistance window half-width in candles.
    pub sr_depth: usize,
    /// Relative band within which levels are merged (0.001 = 0.1%).
    pub dedup_tolerance: f64,
}

/// Values mirror `charter_ta::{DEFAULT_BRICK_SIZE, DEFAULT_SR_DEPTH,
/// DEFAULT_DEDUP_TOLERANCE}`; keep them in step.
impl Default for TransformParams {
    fn default() -> Self {
        Self {
            brick_size: 0.5,
            sr_depth: 14,
            dedup_tolerance: 0.001,
        }
    }
}

impl TransformParams {
    /// Merge with an override, using override values where present.
    pub fn merge(&self, override_config: &TransformOverride) -> Self {
        Self {
            brick_size: override_config.brick_size.unwrap_or(self.brick_size),
            sr_depth: override_config.sr_depth.unwrap_or(self.sr_depth),
            dedup_tolerance: override_config.dedup_tolerance.unwrap_or(self.dedup_tolerance),
        }
    }
}

/// Transform override (all fields optional for partial overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOverride {
    pub brick_size: Option<f64>,
    pub sr_depth: Option<usize>,
    pub dedup_tolerance: Option<f64>,
}

/// Dashboard layer selection on startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Main chart type: "candlestick", "heikin-ashi" or "renko".
    pub chart_type: String,
    /// Overlay support/resistance levels on the price panel.
    pub show_levels: bool,
    /// Indicator panels to show: "volume", "macd", "oscillators", "volatility".
    pub panels: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_type: "candlestick".to_string(),
            show_levels: true,
            panels: vec!["volume".to_string(), "macd".to_string()],
        }
    }
}

/// Options handed to the rendering widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Locale for axis and price formatting.
    pub locale: String,
    /// Height of the main price panel in pixels.
    pub price_panel_height: u32,
    /// Height of each indicator panel in pixels.
    pub indicator_panel_height: u32,
    pub colors: ColorConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            price_panel_height: 400,
            indicator_panel_height: 150,
            colors: ColorConfig::default(),
        }
    }
}

/// Widget colors (CSS strings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    pub grid: String,
    pub up: String,
    pub down: String,
    pub support: String,
    pub resistance: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#131722".to_string(),
            text: "#d1d4dc".to_string(),
            grid: "#2a2e39".to_string(),
            up: "#26a69a".to_string(),
            down: "#ef5350".to_string(),
            support: "#4caf50".to_string(),
            resistance: "#f44336".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.default_symbol, "BTCUSDT");
        assert_eq!(config.transforms.default.sr_depth, 14);
        assert_eq!(config.transforms.default.brick_size, 0.5);
        assert_eq!(config.dashboard.chart_type, "candlestick");
    }

    #[test]
    fn test_symbol_override() {
        let config = Config::default();

        let btc = config.transforms_for_symbol("BTCUSDT");
        assert_eq!(btc.brick_size, 100.0);
        assert_eq!(btc.sr_depth, 14);

        // Unknown symbol should use default
        let other = config.transforms_for_symbol("DOGEUSDT");
        assert_eq!(other, TransformParams::default());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r##"
[general]
default_symbol = "ETHUSDT"

[transforms.default]
sr_depth = 10

[transforms.symbols.SOLUSDT]
brick_size = 0.25

[dashboard]
chart_type = "renko"
panels = ["oscillators"]

[widget.colors]
up = "#00ff00"
"##;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.general.default_symbol, "ETHUSDT");
        assert_eq!(config.transforms.default.sr_depth, 10);

        let sol = config.transforms_for_symbol("SOLUSDT");
        assert_eq!(sol.brick_size, 0.25);
        assert_eq!(sol.sr_depth, 10);

        assert_eq!(config.dashboard.chart_type, "renko");
        assert_eq!(config.dashboard.panels, vec!["oscillators".to_string()]);
        assert!(config.dashboard.show_levels);
        assert_eq!(config.widget.colors.up, "#00ff00");
        assert_eq!(config.widget.colors.down, "#ef5350");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.widget.locale = "de-DE".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.widget.locale, "de-DE");
        assert_eq!(loaded.transforms_for_symbol("ETHUSDT").brick_size, 10.0);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/charter/config.toml");
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}

//! The dashboard shell.
//!
//! Holds the user's layer selection, owns one [`PricePanel`] and one
//! [`IndicatorPanel`] per enabled family, and routes container resizes to
//! whichever panel owns the container.

use std::collections::{BTreeMap, BTreeSet};

use charter_config::{Config, WidgetConfig};
use charter_core::Candle;
use charter_indicators::{IndicatorFrame, PanelKind};
use charter_ta::{ChartType, Level, RenkoConfig, SrConfig};

use crate::error::WidgetError;
use crate::indicator_panel::{IndicatorPanel, RenderOutcome};
use crate::lifecycle::MountContext;
use crate::price_panel::{PricePanel, PriceView};
use crate::resize::{ResizeBus, Size};
use crate::widget::{Container, WidgetFactory, WidgetOptions};

/// Container id of the main price panel.
pub const PRICE_CONTAINER: &str = "price";

/// Container id of an indicator panel.
pub fn panel_container_id(kind: PanelKind) -> String {
    format!("panel-{}", kind.label())
}

/// User-selected layers.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub chart_type: ChartType,
    pub show_levels: bool,
    pub renko: RenkoConfig,
    pub sr: SrConfig,
    pub panels: BTreeSet<PanelKind>,
}

impl DashboardState {
    /// Build the startup selection for `symbol`.
    ///
    /// Unknown chart type or panel names are logged and skipped.
    pub fn from_config(config: &Config, symbol: &str) -> Self {
        let params = config.transforms_for_symbol(symbol);
        let dashboard = &config.dashboard;

        let chart_type = dashboard.chart_type.parse::<ChartType>().unwrap_or_else(|e| {
            log::warn!("{}, using {}", e, ChartType::default());
            ChartType::default()
        });

        let panels = dashboard
            .panels
            .iter()
            .filter_map(|name| match name.parse::<PanelKind>() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    log::warn!("{}, skipping", e);
                    None
                }
            })
            .collect();

        Self {
            chart_type,
            show_levels: dashboard.show_levels,
            renko: RenkoConfig {
                brick_size: params.brick_size,
            },
            sr: SrConfig {
                depth: params.sr_depth,
                dedup_tolerance: params.dedup_tolerance,
            },
            panels,
        }
    }

    pub fn price_view(&self) -> PriceView {
        PriceView {
            chart_type: self.chart_type,
            renko: self.renko,
            levels: self.show_levels.then_some(self.sr),
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        let config = Config::default();
        Self::from_config(&config, &config.general.default_symbol)
    }
}

/// Containers available to the dashboard. A missing entry means the panel has
/// nowhere to attach.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub price: Option<Container>,
    pub panels: BTreeMap<PanelKind, Container>,
}

impl Layout {
    /// Price panel on top, then one indicator panel per `panels` entry.
    pub fn stacked(
        width: u32,
        config: &WidgetConfig,
        panels: impl IntoIterator<Item = PanelKind>,
    ) -> Self {
        let panels = panels
            .into_iter()
            .map(|kind| {
                let container =
                    Container::new(panel_container_id(kind), width, config.indicator_panel_height);
                (kind, container)
            })
            .collect();

        Self {
            price: Some(Container::new(
                PRICE_CONTAINER,
                width,
                config.price_panel_height,
            )),
            panels,
        }
    }
}

/// Result of one dashboard render.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub price: RenderOutcome,
    /// Bars drawn on the price panel after the chart transform.
    pub bars: usize,
    pub levels: Vec<Level>,
    pub panels: BTreeMap<PanelKind, RenderOutcome>,
}

/// Composes the price panel and the enabled indicator panels.
pub struct Dashboard<F: WidgetFactory> {
    factory: F,
    bus: ResizeBus,
    options: WidgetOptions,
    state: DashboardState,
    price: PricePanel,
    panels: BTreeMap<PanelKind, IndicatorPanel>,
}

impl<F: WidgetFactory> Dashboard<F> {
    pub fn new(factory: F, options: WidgetOptions, state: DashboardState) -> Self {
        let panels = state
            .panels
            .iter()
            .map(|&kind| (kind, IndicatorPanel::new(kind)))
            .collect();

        Self {
            factory,
            bus: ResizeBus::new(),
            options,
            state,
            price: PricePanel::new(),
            panels,
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn bus(&self) -> &ResizeBus {
        &self.bus
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn price_panel(&self) -> &PricePanel {
        &self.price
    }

    pub fn panel(&self, kind: PanelKind) -> Option<&IndicatorPanel> {
        self.panels.get(&kind)
    }

    /// Takes effect on the next render.
    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.state.chart_type = chart_type;
    }

    pub fn set_show_levels(&mut self, show: bool) {
        self.state.show_levels = show;
    }

    /// Returns `false` if the panel was already enabled.
    pub fn enable_panel(&mut self, kind: PanelKind) -> bool {
        if !self.state.panels.insert(kind) {
            return false;
        }
        self.panels.insert(kind, IndicatorPanel::new(kind));
        true
    }

    /// Disable a panel, releasing its widget. Returns `false` if it was not
    /// enabled.
    pub fn disable_panel(&mut self, kind: PanelKind) -> bool {
        if !self.state.panels.remove(&kind) {
            return false;
        }
        if let Some(mut panel) = self.panels.remove(&kind) {
            panel.teardown();
        }
        true
    }

    /// Render every enabled layer into the containers `layout` provides.
    ///
    /// Stops at the first widget error. The failing panel has already
    /// released its widget; panels rendered before it keep theirs.
    pub fn render(
        &mut self,
        candles: &[Candle],
        frame: &IndicatorFrame,
        layout: &Layout,
    ) -> Result<DashboardReport, WidgetError> {
        let ctx = MountContext {
            factory: &self.factory,
            bus: &self.bus,
            options: &self.options,
        };

        let view = self.state.price_view();
        let price = self
            .price
            .render(ctx, layout.price.as_ref(), candles, &view)?;

        let mut panels = BTreeMap::new();
        for (kind, panel) in self.panels.iter_mut() {
            let outcome = panel.render(ctx, layout.panels.get(kind), frame)?;
            panels.insert(*kind, outcome);
        }

        log::info!(
            "Rendered {} candles as {} with {} panels",
            candles.len(),
            view.chart_type,
            panels.len()
        );

        Ok(DashboardReport {
            price,
            bars: self.price.bar_count(),
            levels: self.price.levels().to_vec(),
            panels,
        })
    }

    /// Deliver a container resize and apply it to the owning panel.
    ///
    /// Returns how many listeners received it.
    pub fn resize(&mut self, container_id: &str, size: Size) -> usize {
        let delivered = self.bus.notify(container_id, size);
        self.price.apply_pending_resize();
        for panel in self.panels.values_mut() {
            panel.apply_pending_resize();
        }
        delivered
    }

    /// Release every widget. Panels stay enabled and remount on the next
    /// render.
    pub fn teardown(&mut self) {
        self.price.teardown();
        for panel in self.panels.values_mut() {
            panel.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_config() {
        let mut config = Config::default();
        config.dashboard.chart_type = "heikin-ashi".to_string();
        config.dashboard.panels = vec![
            "macd".to_string(),
            "bogus".to_string(),
            "volume".to_string(),
        ];

        let state = DashboardState::from_config(&config, "ETHUSDT");
        assert_eq!(state.chart_type, ChartType::HeikinAshi);
        assert_eq!(state.renko.brick_size, 10.0);
        assert_eq!(state.sr.depth, 14);
        assert_eq!(
            state.panels.iter().copied().collect::<Vec<_>>(),
            vec![PanelKind::Volume, PanelKind::Macd]
        );
    }

    #[test]
    fn test_config_defaults_match_transform_defaults() {
        let params = charter_config::TransformParams::default();
        assert_eq!(params.brick_size, charter_ta::DEFAULT_BRICK_SIZE);
        assert_eq!(params.sr_depth, charter_ta::DEFAULT_SR_DEPTH);
        assert_eq!(params.dedup_tolerance, charter_ta::DEFAULT_DEDUP_TOLERANCE);
    }

    #[test]
    fn test_unknown_chart_type_falls_back() {
        let mut config = Config::default();
        config.dashboard.chart_type = "point-and-figure".to_string();
        let state = DashboardState::from_config(&config, "DOGEUSDT");
        assert_eq!(state.chart_type, ChartType::Candlestick);
        assert_eq!(state.renko.brick_size, 0.5);
    }

    #[test]
    fn test_hidden_levels() {
        let mut state = DashboardState::default();
        assert!(state.price_view().levels.is_some());
        state.show_levels = false;
        assert_eq!(state.price_view().levels, None);
    }

    #[test]
    fn test_stacked_layout() {
        let config = WidgetConfig::default();
        let layout = Layout::stacked(1024, &config, [PanelKind::Macd, PanelKind::Volume]);

        let price = layout.price.as_ref().unwrap();
        assert_eq!(price.id, PRICE_CONTAINER);
        assert_eq!(price.height, 400);
        assert_eq!(layout.panels[&PanelKind::Macd].id, "panel-macd");
        assert_eq!(layout.panels[&PanelKind::Volume].height, 150);
        assert!(!layout.panels.contains_key(&PanelKind::Oscillators));
    }
}

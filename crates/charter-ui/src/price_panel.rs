//! Main price panel adapter.
//!
//! Applies the selected chart representation and overlays support/resistance
//! levels as price lines.

use charter_core::Candle;
use charter_ta::{find_sr_levels_with, ChartType, Level, LevelKind, RenkoConfig, SrConfig};

use crate::error::WidgetError;
use crate::indicator_panel::RenderOutcome;
use crate::lifecycle::{MountContext, MountedWidget};
use crate::resize::Size;
use crate::widget::{Container, PriceLine, SeriesKind, SeriesOptions};

/// How the price panel presents candles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceView {
    pub chart_type: ChartType,
    pub renko: RenkoConfig,
    /// Level detection parameters; `None` hides the level layer.
    pub levels: Option<SrConfig>,
}

impl Default for PriceView {
    fn default() -> Self {
        Self {
            chart_type: ChartType::default(),
            renko: RenkoConfig::default(),
            levels: Some(SrConfig::default()),
        }
    }
}

/// Adapter for the main candle chart.
#[derive(Default)]
pub struct PricePanel {
    mounted: Option<MountedWidget>,
    chart_type: Option<ChartType>,
    levels: Vec<Level>,
    bars: usize,
}

impl PricePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Levels drawn by the last render.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Number of candles or bricks drawn by the last render.
    pub fn bar_count(&self) -> usize {
        self.bars
    }

    pub fn render(
        &mut self,
        ctx: MountContext<'_>,
        container: Option<&Container>,
        candles: &[Candle],
        view: &PriceView,
    ) -> Result<RenderOutcome, WidgetError> {
        let Some(container) = container else {
            self.teardown();
            return Ok(RenderOutcome::NoContainer);
        };
        if candles.is_empty() {
            self.teardown();
            return Ok(RenderOutcome::NotApplicable);
        }

        // A change of representation changes what the time axis means.
        let current = self.mounted.as_ref().is_some_and(|m| {
            m.container_id() == container.id && self.chart_type == Some(view.chart_type)
        });
        let recreated = !current;
        if recreated {
            self.teardown();
            self.mounted = Some(MountedWidget::mount(ctx, container)?);
            self.chart_type = Some(view.chart_type);
        }

        match self.populate(ctx, candles, view) {
            Ok(()) => Ok(RenderOutcome::Rendered {
                series: 1,
                recreated,
            }),
            Err(e) => {
                log::warn!("price panel: render failed, releasing widget: {}", e);
                self.teardown();
                Err(e)
            }
        }
    }

    pub fn apply_pending_resize(&mut self) -> Option<Size> {
        self.mounted.as_mut()?.apply_pending_resize()
    }

    pub fn teardown(&mut self) {
        if self.mounted.take().is_some() {
            log::debug!("price panel: torn down");
        }
        self.chart_type = None;
        self.levels.clear();
        self.bars = 0;
    }

    fn populate(
        &mut self,
        ctx: MountContext<'_>,
        candles: &[Candle],
        view: &PriceView,
    ) -> Result<(), WidgetError> {
        let Some(mounted) = self.mounted.as_mut() else {
            return Ok(());
        };
        let colors = &ctx.options.colors;

        mounted.clear_series()?;

        let bars = view.chart_type.apply(candles, &view.renko);
        let options = SeriesOptions::new(view.chart_type.label(), colors.up.as_str());
        let series = mounted.add_series(SeriesKind::Candlestick, &options)?;
        mounted.set_candle_data(series, &bars)?;

        let levels = match &view.levels {
            Some(config) => find_sr_levels_with(candles, config),
            None => Vec::new(),
        };
        for level in &levels {
            let color = match level.kind {
                LevelKind::Support => &colors.support,
                LevelKind::Resistance => &colors.resistance,
            };
            mounted.add_price_line(
                series,
                &PriceLine {
                    price: level.price,
                    color: color.clone(),
                    title: level.kind.label().to_string(),
                },
            )?;
        }

        mounted.fit_content();
        log::debug!(
            "price panel: {} {} bars, {} levels",
            bars.len(),
            view.chart_type,
            levels.len()
        );

        self.bars = bars.len();
        self.levels = levels;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessFactory;
    use crate::resize::ResizeBus;
    use crate::widget::WidgetOptions;

    fn rising(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64;
                Candle::new(i as i64 * 60, base, base + 1.5, base - 0.5, base + 1.0)
            })
            .collect()
    }

    #[test]
    fn test_renko_view() {
        let factory = HeadlessFactory::new();
        let bus = ResizeBus::new();
        let options = WidgetOptions::default();
        let ctx = MountContext { factory: &factory, bus: &bus, options: &options };
        let container = Container::new("price", 800, 400);

        let view = PriceView {
            chart_type: ChartType::Renko,
            renko: RenkoConfig { brick_size: 1.0 },
            levels: None,
        };
        let mut panel = PricePanel::new();
        panel.render(ctx, Some(&container), &rising(5), &view).unwrap();

        // closes 101..105: four one-point bricks from the first close
        assert_eq!(panel.bar_count(), 4);
        let widget = factory.live_widget("price").unwrap();
        assert_eq!(widget.series_by_title("renko").unwrap().points, 4);
        assert!(panel.levels().is_empty());
    }

    #[test]
    fn test_chart_type_change_recreates_widget() {
        let factory = HeadlessFactory::new();
        let bus = ResizeBus::new();
        let options = WidgetOptions::default();
        let ctx = MountContext { factory: &factory, bus: &bus, options: &options };
        let container = Container::new("price", 800, 400);
        let candles = rising(10);

        let mut panel = PricePanel::new();
        let mut view = PriceView::default();
        panel.render(ctx, Some(&container), &candles, &view).unwrap();
        let again = panel.render(ctx, Some(&container), &candles, &view).unwrap();
        assert_eq!(again, RenderOutcome::Rendered { series: 1, recreated: false });

        view.chart_type = ChartType::HeikinAshi;
        let changed = panel.render(ctx, Some(&container), &candles, &view).unwrap();
        assert_eq!(changed, RenderOutcome::Rendered { series: 1, recreated: true });

        assert_eq!(factory.created_count(), 2);
        assert_eq!(factory.live_widgets().len(), 1);
        assert_eq!(bus.listener_count(), 1);
    }
}

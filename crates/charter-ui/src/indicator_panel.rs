//! Indicator sub-panel adapter.
//!
//! One panel per [`PanelKind`]. Each render clears and repopulates the
//! widget's series from the dataset; a change in the dataset's available
//! fields replaces the widget entirely.

use charter_config::ColorConfig;
use charter_core::HistogramPoint;
use charter_indicators::{AvailableFields, IndicatorFrame, PanelKind, SeriesSpec, SeriesStyle};

use crate::error::WidgetError;
use crate::lifecycle::{MountContext, MountedWidget};
use crate::resize::Size;
use crate::widget::{Container, SeriesKind, SeriesOptions};

/// What a panel render did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The widget holds `series` series; `recreated` when a new widget was made.
    Rendered { series: usize, recreated: bool },
    /// No container to attach to; nothing is mounted.
    NoContainer,
    /// The data has nothing this panel can show; nothing is mounted.
    NotApplicable,
}

/// Adapter for one indicator family.
pub struct IndicatorPanel {
    kind: PanelKind,
    mounted: Option<MountedWidget>,
    shape: Option<AvailableFields>,
}

impl IndicatorPanel {
    pub fn new(kind: PanelKind) -> Self {
        Self {
            kind,
            mounted: None,
            shape: None,
        }
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Push `frame` into the panel's widget, creating it if needed.
    pub fn render(
        &mut self,
        ctx: MountContext<'_>,
        container: Option<&Container>,
        frame: &IndicatorFrame,
    ) -> Result<RenderOutcome, WidgetError> {
        let Some(container) = container else {
            self.teardown();
            return Ok(RenderOutcome::NoContainer);
        };

        let available = frame.available();
        if frame.is_empty() || !self.kind.is_applicable(available) {
            self.teardown();
            return Ok(RenderOutcome::NotApplicable);
        }

        let recreated = self.ensure_mounted(ctx, container, available)?;
        match self.populate(frame, available, &ctx.options.colors) {
            Ok(series) => Ok(RenderOutcome::Rendered { series, recreated }),
            Err(e) => {
                log::warn!("{} panel: render failed, releasing widget: {}", self.kind, e);
                self.teardown();
                Err(e)
            }
        }
    }

    /// Forward any pending container resize to the widget.
    pub fn apply_pending_resize(&mut self) -> Option<Size> {
        self.mounted.as_mut()?.apply_pending_resize()
    }

    /// Release the widget and its resize subscription.
    pub fn teardown(&mut self) {
        if self.mounted.take().is_some() {
            log::debug!("{} panel: torn down", self.kind);
        }
        self.shape = None;
    }

    fn ensure_mounted(
        &mut self,
        ctx: MountContext<'_>,
        container: &Container,
        available: AvailableFields,
    ) -> Result<bool, WidgetError> {
        let current = self
            .mounted
            .as_ref()
            .is_some_and(|m| m.container_id() == container.id && self.shape == Some(available));
        if current {
            return Ok(false);
        }

        self.teardown();
        self.mounted = Some(MountedWidget::mount(ctx, container)?);
        self.shape = Some(available);
        Ok(true)
    }

    fn populate(
        &mut self,
        frame: &IndicatorFrame,
        available: AvailableFields,
        colors: &ColorConfig,
    ) -> Result<usize, WidgetError> {
        let kind = self.kind;
        let Some(mounted) = self.mounted.as_mut() else {
            return Ok(0);
        };

        mounted.clear_series()?;

        let mut count = 0;
        for spec in kind.applicable_series(available) {
            let options = SeriesOptions::new(spec.field.key(), spec.color);
            match spec.style {
                SeriesStyle::Line => {
                    let id = mounted.add_series(SeriesKind::Line, &options)?;
                    mounted.set_line_data(id, &frame.line(spec.field))?;
                }
                SeriesStyle::Histogram { signed_colors } => {
                    let id = mounted.add_series(SeriesKind::Histogram, &options)?;
                    let bars = histogram_bars(frame, spec, signed_colors, colors);
                    mounted.set_histogram_data(id, &bars)?;
                }
            }
            count += 1;
        }

        mounted.fit_content();
        Ok(count)
    }
}

fn histogram_bars(
    frame: &IndicatorFrame,
    spec: &SeriesSpec,
    signed_colors: bool,
    colors: &ColorConfig,
) -> Vec<HistogramPoint> {
    let bars = frame.histogram(spec.field);
    if !signed_colors {
        return bars;
    }
    bars.into_iter()
        .map(|bar| {
            let color = if bar.value >= 0.0 { &colors.up } else { &colors.down };
            bar.with_color(color.as_str())
        })
        .collect()
}

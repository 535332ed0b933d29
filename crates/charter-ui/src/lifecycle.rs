//! Scoped ownership of a rendering widget.
//!
//! A [`MountedWidget`] is acquired when a panel has both a container and data,
//! and is released in `Drop`: the widget is removed and the resize
//! subscription deregistered, whichever path tears the panel down.

use charter_core::{Candle, HistogramPoint, SeriesPoint};

use crate::error::WidgetError;
use crate::resize::{ResizeBus, ResizeSubscription, Size};
use crate::widget::{
    ChartWidget, Container, PriceLine, SeriesId, SeriesKind, SeriesOptions, WidgetFactory,
    WidgetOptions,
};

/// Everything a panel needs to create a widget.
#[derive(Clone, Copy)]
pub struct MountContext<'a> {
    pub factory: &'a dyn WidgetFactory,
    pub bus: &'a ResizeBus,
    pub options: &'a WidgetOptions,
}

/// A widget exclusively owned by one panel, attached to one container.
pub struct MountedWidget {
    widget: Box<dyn ChartWidget>,
    container_id: String,
    series: Vec<SeriesId>,
    resize: ResizeSubscription,
}

impl MountedWidget {
    /// Create a widget in `container` and subscribe to its resizes.
    ///
    /// On failure nothing is registered.
    pub fn mount(ctx: MountContext<'_>, container: &Container) -> Result<Self, WidgetError> {
        let widget = ctx.factory.create(container, ctx.options)?;
        let resize = ctx.bus.subscribe(&container.id);
        log::debug!(
            "Mounted widget in {} ({}x{})",
            container.id,
            container.width,
            container.height
        );

        Ok(Self {
            widget,
            container_id: container.id.clone(),
            series: Vec::new(),
            resize,
        })
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Series currently attached, in creation order.
    pub fn series(&self) -> &[SeriesId] {
        &self.series
    }

    /// Remove every series this handle added.
    pub fn clear_series(&mut self) -> Result<(), WidgetError> {
        for id in std::mem::take(&mut self.series) {
            self.widget.remove_series(id)?;
        }
        Ok(())
    }

    pub fn add_series(
        &mut self,
        kind: SeriesKind,
        options: &SeriesOptions,
    ) -> Result<SeriesId, WidgetError> {
        let id = match kind {
            SeriesKind::Candlestick => self.widget.add_candlestick_series(options)?,
            SeriesKind::Line => self.widget.add_line_series(options)?,
            SeriesKind::Histogram => self.widget.add_histogram_series(options)?,
        };
        self.series.push(id);
        Ok(id)
    }

    pub fn set_candle_data(&mut self, id: SeriesId, data: &[Candle]) -> Result<(), WidgetError> {
        self.widget.set_candle_data(id, data)
    }

    pub fn set_line_data(&mut self, id: SeriesId, data: &[SeriesPoint]) -> Result<(), WidgetError> {
        self.widget.set_line_data(id, data)
    }

    pub fn set_histogram_data(
        &mut self,
        id: SeriesId,
        data: &[HistogramPoint],
    ) -> Result<(), WidgetError> {
        self.widget.set_histogram_data(id, data)
    }

    pub fn add_price_line(&mut self, id: SeriesId, line: &PriceLine) -> Result<(), WidgetError> {
        self.widget.add_price_line(id, line)
    }

    pub fn fit_content(&mut self) {
        self.widget.fit_content();
    }

    /// Forward a pending container resize to the widget.
    ///
    /// Returns the size applied, if there was one.
    pub fn apply_pending_resize(&mut self) -> Option<Size> {
        let size = self.resize.take_pending()?;
        self.widget.resize(size.width, size.height);
        Some(size)
    }
}

impl Drop for MountedWidget {
    fn drop(&mut self) {
        self.widget.remove();
        log::debug!("Released widget in {}", self.container_id);
    }
}

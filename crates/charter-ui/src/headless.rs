//! A widget that draws nothing and records what it was asked to draw.
//!
//! Used by the command-line runner to summarize a render, and by tests to
//! observe panel behavior after the panel has taken ownership of the widget.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use charter_core::{Candle, HistogramPoint, SeriesPoint};

use crate::error::WidgetError;
use crate::widget::{
    ChartWidget, Container, PriceLine, SeriesId, SeriesKind, SeriesOptions, WidgetFactory,
    WidgetOptions,
};

/// Recorded state of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRecord {
    pub kind: SeriesKind,
    pub options: SeriesOptions,
    pub points: usize,
    /// `(first, last)` time of the current data, if any.
    pub time_range: Option<(i64, i64)>,
    pub price_lines: Vec<PriceLine>,
}

/// Recorded state of one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetRecord {
    pub container: String,
    pub width: u32,
    pub height: u32,
    pub locale: String,
    pub series: BTreeMap<SeriesId, SeriesRecord>,
    pub fit_count: usize,
    pub removed: bool,
}

impl WidgetRecord {
    /// Series titles in creation order.
    pub fn series_titles(&self) -> Vec<String> {
        self.series.values().map(|s| s.options.title.clone()).collect()
    }

    pub fn series_by_title(&self, title: &str) -> Option<&SeriesRecord> {
        self.series.values().find(|s| s.options.title == title)
    }
}

/// Headless [`ChartWidget`].
pub struct HeadlessWidget {
    record: Rc<RefCell<WidgetRecord>>,
    next_series: u32,
}

impl HeadlessWidget {
    fn with_series<T>(
        &mut self,
        id: SeriesId,
        f: impl FnOnce(&mut SeriesRecord) -> T,
    ) -> Result<T, WidgetError> {
        let mut record = self.record.borrow_mut();
        if record.removed {
            return Err(WidgetError::Removed);
        }
        record
            .series
            .get_mut(&id)
            .map(f)
            .ok_or(WidgetError::UnknownSeries(id))
    }

    fn add(&mut self, kind: SeriesKind, options: &SeriesOptions) -> Result<SeriesId, WidgetError> {
        let mut record = self.record.borrow_mut();
        if record.removed {
            return Err(WidgetError::Removed);
        }
        let id = SeriesId(self.next_series);
        self.next_series += 1;
        record.series.insert(
            id,
            SeriesRecord {
                kind,
                options: options.clone(),
                points: 0,
                time_range: None,
                price_lines: Vec::new(),
            },
        );
        Ok(id)
    }

    fn set<T>(&mut self, id: SeriesId, data: &[T], time: impl Fn(&T) -> i64) -> Result<(), WidgetError> {
        let time_range = match (data.first(), data.last()) {
            (Some(first), Some(last)) => Some((time(first), time(last))),
            _ => None,
        };
        self.with_series(id, |series| {
            series.points = data.len();
            series.time_range = time_range;
        })
    }
}

impl ChartWidget for HeadlessWidget {
    fn add_candlestick_series(&mut self, options: &SeriesOptions) -> Result<SeriesId, WidgetError> {
        self.add(SeriesKind::Candlestick, options)
    }

    fn add_line_series(&mut self, options: &SeriesOptions) -> Result<SeriesId, WidgetError> {
        self.add(SeriesKind::Line, options)
    }

    fn add_histogram_series(&mut self, options: &SeriesOptions) -> Result<SeriesId, WidgetError> {
        self.add(SeriesKind::Histogram, options)
    }

    fn set_candle_data(&mut self, series: SeriesId, data: &[Candle]) -> Result<(), WidgetError> {
        self.set(series, data, |c: &Candle| c.time)
    }

    fn set_line_data(&mut self, series: SeriesId, data: &[SeriesPoint]) -> Result<(), WidgetError> {
        self.set(series, data, |p: &SeriesPoint| p.time)
    }

    fn set_histogram_data(
        &mut self,
        series: SeriesId,
        data: &[HistogramPoint],
    ) -> Result<(), WidgetError> {
        self.set(series, data, |p: &HistogramPoint| p.time)
    }

    fn add_price_line(&mut self, series: SeriesId, line: &PriceLine) -> Result<(), WidgetError> {
        self.with_series(series, |s| s.price_lines.push(line.clone()))
    }

    fn remove_series(&mut self, series: SeriesId) -> Result<(), WidgetError> {
        let mut record = self.record.borrow_mut();
        if record.removed {
            return Err(WidgetError::Removed);
        }
        record
            .series
            .remove(&series)
            .map(|_| ())
            .ok_or(WidgetError::UnknownSeries(series))
    }

    fn fit_content(&mut self) {
        self.record.borrow_mut().fit_count += 1;
    }

    fn resize(&mut self, width: u32, height: u32) {
        let mut record = self.record.borrow_mut();
        record.width = width;
        record.height = height;
    }

    fn remove(&mut self) {
        let mut record = self.record.borrow_mut();
        record.series.clear();
        record.removed = true;
    }
}

/// Creates [`HeadlessWidget`]s and keeps a record of every one it made.
#[derive(Default)]
pub struct HeadlessFactory {
    records: RefCell<Vec<Rc<RefCell<WidgetRecord>>>>,
    fail_next: Cell<bool>,
}

impl HeadlessFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create` call fail.
    pub fn fail_next_create(&self) {
        self.fail_next.set(true);
    }

    /// Snapshot of every widget ever created, in creation order.
    pub fn widgets(&self) -> Vec<WidgetRecord> {
        self.records.borrow().iter().map(|r| r.borrow().clone()).collect()
    }

    /// Snapshot of widgets that have not been removed.
    pub fn live_widgets(&self) -> Vec<WidgetRecord> {
        self.widgets().into_iter().filter(|w| !w.removed).collect()
    }

    /// The live widget attached to `container`, if any.
    pub fn live_widget(&self, container: &str) -> Option<WidgetRecord> {
        self.live_widgets().into_iter().find(|w| w.container == container)
    }

    pub fn created_count(&self) -> usize {
        self.records.borrow().len()
    }
}

impl WidgetFactory for HeadlessFactory {
    fn create(
        &self,
        container: &Container,
        options: &WidgetOptions,
    ) -> Result<Box<dyn ChartWidget>, WidgetError> {
        if self.fail_next.replace(false) {
            return Err(WidgetError::Construction {
                container: container.id.clone(),
                reason: "injected failure".to_string(),
            });
        }

        let record = Rc::new(RefCell::new(WidgetRecord {
            container: container.id.clone(),
            width: container.width,
            height: container.height,
            locale: options.locale.clone(),
            series: BTreeMap::new(),
            fit_count: 0,
            removed: false,
        }));
        self.records.borrow_mut().push(Rc::clone(&record));

        Ok(Box::new(HeadlessWidget {
            record,
            next_series: 0,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_series_and_data() {
        let factory = HeadlessFactory::new();
        let mut widget = factory
            .create(&Container::new("main", 800, 400), &WidgetOptions::default())
            .unwrap();

        let id = widget.add_line_series(&SeriesOptions::new("RSI", "#fff")).unwrap();
        widget
            .set_line_data(id, &[SeriesPoint::new(1, 50.0), SeriesPoint::new(2, 55.0)])
            .unwrap();
        widget.fit_content();

        let record = factory.live_widget("main").unwrap();
        let series = record.series_by_title("RSI").unwrap();
        assert_eq!(series.points, 2);
        assert_eq!(series.time_range, Some((1, 2)));
        assert_eq!(record.fit_count, 1);
    }

    #[test]
    fn test_remove_releases_everything() {
        let factory = HeadlessFactory::new();
        let mut widget = factory
            .create(&Container::new("main", 800, 400), &WidgetOptions::default())
            .unwrap();
        let id = widget.add_line_series(&SeriesOptions::new("ATR", "#fff")).unwrap();

        widget.remove();

        assert!(factory.live_widgets().is_empty());
        assert_eq!(widget.set_line_data(id, &[]), Err(WidgetError::Removed));
    }

    #[test]
    fn test_unknown_series() {
        let factory = HeadlessFactory::new();
        let mut widget = factory
            .create(&Container::new("main", 1, 1), &WidgetOptions::default())
            .unwrap();
        assert_eq!(
            widget.remove_series(SeriesId(9)),
            Err(WidgetError::UnknownSeries(SeriesId(9)))
        );
    }

    #[test]
    fn test_injected_failure() {
        let factory = HeadlessFactory::new();
        factory.fail_next_create();

        let result = factory.create(&Container::new("main", 1, 1), &WidgetOptions::default());
        assert!(matches!(result, Err(WidgetError::Construction { .. })));
        assert_eq!(factory.created_count(), 0);

        assert!(factory
            .create(&Container::new("main", 1, 1), &WidgetOptions::default())
            .is_ok());
    }
}

//! Chart panel adapters for the charter dashboard.
//!
//! Panels translate transformed candles, detected levels and indicator
//! columns into calls on an external rendering widget (see [`ChartWidget`]).
//! Each panel owns at most one widget at a time and releases it on every
//! teardown path.
//!
//! - [`PricePanel`] - main chart with the selected [`ChartType`] and level lines
//! - [`IndicatorPanel`] - one per indicator family
//! - [`Dashboard`] - composes the panels and routes resizes
//! - [`HeadlessFactory`] - a widget backend that only records calls
//!
//! [`ChartType`]: charter_ta::ChartType

pub mod dashboard;
pub mod error;
pub mod headless;
pub mod indicator_panel;
pub mod lifecycle;
pub mod price_panel;
pub mod resize;
pub mod widget;

pub use dashboard::{
    panel_container_id, Dashboard, DashboardReport, DashboardState, Layout, PRICE_CONTAINER,
};
pub use error::WidgetError;
pub use headless::{HeadlessFactory, HeadlessWidget, SeriesRecord, WidgetRecord};
pub use indicator_panel::{IndicatorPanel, RenderOutcome};
pub use lifecycle::{MountContext, MountedWidget};
pub use price_panel::{PricePanel, PriceView};
pub use resize::{ResizeBus, ResizeSubscription, Size};
pub use widget::{
    ChartWidget, Container, PriceLine, SeriesId, SeriesKind, SeriesOptions, WidgetFactory,
    WidgetOptions,
};

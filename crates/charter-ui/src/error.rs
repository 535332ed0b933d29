//! Widget errors.

use thiserror::Error;

use crate::widget::SeriesId;

/// Errors reported by a rendering widget or a panel driving one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("Failed to create widget in container {container}: {reason}")]
    Construction { container: String, reason: String },
    #[error("Unknown series {0:?}")]
    UnknownSeries(SeriesId),
    #[error("Widget has already been removed")]
    Removed,
    #[error("Widget backend error: {0}")]
    Backend(String),
}

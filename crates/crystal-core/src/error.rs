//! Widget error types

/// Errors surfaced by a widget's lifecycle transitions.
///
/// Degenerate input (zero-size containers, missing pointer samples) is not an
/// error: it is absorbed by clamped defaults and never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    #[error("widget is already attached")]
    AlreadyAttached,
    #[error("render surface unavailable: {0}")]
    SurfaceUnavailable(String),
}

//! Renderer error types

use crystal_core::WidgetError;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface edge {edge}px exceeds device limit of {max}px")]
    SurfaceTooLarge { edge: u32, max: u32 },
    #[error("graphics device unavailable: {0}")]
    Device(String),
}

impl From<RenderError> for WidgetError {
    fn from(err: RenderError) -> Self {
        WidgetError::SurfaceUnavailable(err.to_string())
    }
}

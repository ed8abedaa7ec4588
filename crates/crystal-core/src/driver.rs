//! Render driver seam.
//!
//! A driver turns the current scene state into pixels on a square surface.
//! It is stateless with respect to animation: every frame is drawn purely
//! from the [`Frame`] it is handed.

use crate::camera::Camera;
use crate::error::WidgetError;
use crate::input::Viewport;
use crate::resources::ResourceRegistry;
use crate::scene::Scene;

/// Everything needed to draw one frame.
pub struct Frame<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    pub viewport: Viewport,
    pub resources: &'a ResourceRegistry,
}

/// Backend that owns a render surface.
pub trait RenderDriver {
    /// Create the render surface for `viewport` and attach it to the host.
    fn mount(&mut self, viewport: Viewport) -> Result<(), WidgetError>;

    /// Resize the surface. Called in the same step that updates the
    /// camera aspect.
    fn resize(&mut self, viewport: Viewport);

    /// Draw one frame. Must be a no-op on an empty viewport.
    fn render_frame(&mut self, frame: &Frame<'_>);

    /// Remove the surface from the host.
    fn unmount(&mut self);

    /// Drop every GPU resource created for entries of `resources`.
    fn release(&mut self, resources: &ResourceRegistry);
}

/// Driver that draws nothing and records what it was asked to do.
///
/// Useful for tests and for hosts without a GPU.
#[derive(Debug, Default)]
pub struct HeadlessDriver {
    mounted: bool,
    viewport: Option<Viewport>,
    frames: u64,
    skipped_frames: u64,
    releases: usize,
    fail_mount: bool,
    /// Object count and viewport of the most recent drawn frame.
    last_frame: Option<(usize, Viewport)>,
}

impl HeadlessDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A driver whose surface can never be acquired.
    pub fn unavailable() -> Self {
        Self {
            fail_mount: true,
            ..Self::default()
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn skipped_frames(&self) -> u64 {
        self.skipped_frames
    }

    pub fn releases(&self) -> usize {
        self.releases
    }

    pub fn last_frame(&self) -> Option<(usize, Viewport)> {
        self.last_frame
    }
}

impl RenderDriver for HeadlessDriver {
    fn mount(&mut self, viewport: Viewport) -> Result<(), WidgetError> {
        if self.fail_mount {
            return Err(WidgetError::SurfaceUnavailable(
                "headless surface disabled".to_string(),
            ));
        }
        self.mounted = true;
        self.viewport = Some(viewport);
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn render_frame(&mut self, frame: &Frame<'_>) {
        if !self.mounted || frame.viewport.is_empty() {
            self.skipped_frames += 1;
            return;
        }
        self.frames += 1;
        self.last_frame = Some((frame.scene.len(), frame.viewport));
    }

    fn unmount(&mut self) {
        self.mounted = false;
        self.viewport = None;
    }

    fn release(&mut self, _resources: &ResourceRegistry) {
        self.releases += 1;
    }
}

//! Host input events and their conversion into scene-space signals.
//!
//! The render surface is always square: its edge is `max(width, height)` of
//! the mount container (times a per-widget scale), anchored at the
//! container's top-left corner. Pointer coordinates are normalized against
//! that square, so aspect-ratio math stays trivial.

use glam::Vec2;

use crate::camera::Camera;

/// Host-side mount container, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ContainerRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Container of the given size at the origin.
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Square surface edge for this container, in whole pixels.
    pub fn surface_edge(&self, scale: f32) -> u32 {
        let edge = self.width.max(self.height).max(0.0) * scale;
        if edge.is_finite() { edge.round() as u32 } else { 0 }
    }
}

/// Render target dimensions. Width and height are both `edge` host pixels;
/// the backing surface has `pixel_ratio` device pixels per host pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub edge: u32,
    pub aspect: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn square(edge: u32) -> Self {
        Self {
            edge,
            aspect: 1.0,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Edge of the backing surface in device pixels.
    pub fn physical_edge(&self) -> u32 {
        let edge = self.edge as f32 * self.pixel_ratio;
        if edge.is_finite() && edge > 0.0 {
            edge.round() as u32
        } else {
            0
        }
    }

    /// True if there is nothing to draw into.
    pub fn is_empty(&self) -> bool {
        self.edge == 0
    }
}

/// Kind of host event a widget can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    PointerMove,
    PointerDown,
    PointerUp,
    Wheel,
    Resize,
}

/// Raw event delivered by the host, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    PointerMove { x: f32, y: f32 },
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    Wheel { delta_y: f32 },
    Resize(ContainerRect),
}

impl HostEvent {
    pub fn listener_kind(&self) -> ListenerKind {
        match self {
            HostEvent::PointerMove { .. } => ListenerKind::PointerMove,
            HostEvent::PointerDown { .. } => ListenerKind::PointerDown,
            HostEvent::PointerUp { .. } => ListenerKind::PointerUp,
            HostEvent::Wheel { .. } => ListenerKind::Wheel,
            HostEvent::Resize(_) => ListenerKind::Resize,
        }
    }
}

/// Latest pointer signal, read by the kernel each tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    /// Normalized pointer in `[-1, 1]²` (y up), `None` until the first sample.
    pub pointer: Option<Vec2>,
}

impl InputState {
    /// Pointer position, defaulting to the surface centre before any sample.
    pub fn pointer_or_center(&self) -> Vec2 {
        self.pointer.unwrap_or(Vec2::ZERO)
    }
}

/// Converts host events into [`InputState`], camera targets and viewport size.
#[derive(Debug, Clone)]
pub struct InputSampler {
    container: ContainerRect,
    scale: f32,
    viewport: Viewport,
    drag_anchor: Option<Vec2>,
}

impl InputSampler {
    pub fn new(container: ContainerRect, scale: f32, viewport: Viewport) -> Self {
        Self {
            container,
            scale,
            viewport,
            drag_anchor: None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn container(&self) -> ContainerRect {
        self.container
    }

    /// Map host pixels to the normalized square, y up.
    ///
    /// Returns `None` while the surface has no extent.
    pub fn normalize(&self, x: f32, y: f32) -> Option<Vec2> {
        if self.viewport.is_empty() {
            return None;
        }
        let edge = self.viewport.edge as f32;
        Some(Vec2::new(
            (x - self.container.left) / edge * 2.0 - 1.0,
            -((y - self.container.top) / edge) * 2.0 + 1.0,
        ))
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        let edge = self.viewport.edge as f32;
        let local = Vec2::new(x - self.container.left, y - self.container.top);
        local.x >= 0.0 && local.y >= 0.0 && local.x <= edge && local.y <= edge
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32, state: &mut InputState, camera: &mut Camera) {
        let Some(pointer) = self.normalize(x, y) else {
            tracing::trace!("Pointer sample ignored on empty surface");
            return;
        };
        state.pointer = Some(pointer);

        if let Some(anchor) = self.drag_anchor
            && let Some(orbit) = camera.orbit.as_mut()
        {
            orbit.drag(x - anchor.x, y - anchor.y, self.viewport.edge as f32);
            self.drag_anchor = Some(Vec2::new(x, y));
        }
    }

    /// Start an orbit drag if the press lands on the surface.
    pub fn on_pointer_down(&mut self, x: f32, y: f32, camera: &mut Camera) {
        if self.viewport.is_empty() || !self.contains(x, y) {
            return;
        }
        if let Some(orbit) = camera.orbit.as_mut() {
            orbit.set_dragging(true);
            self.drag_anchor = Some(Vec2::new(x, y));
        }
    }

    pub fn on_pointer_up(&mut self, camera: &mut Camera) {
        self.drag_anchor = None;
        if let Some(orbit) = camera.orbit.as_mut() {
            orbit.set_dragging(false);
        }
    }

    /// Nudge the camera's target depth; the kernel eases toward it.
    pub fn on_scroll(&mut self, delta_y: f32, camera: &mut Camera) {
        if let Some(depth) = camera.depth.as_mut() {
            depth.nudge(delta_y);
        }
    }

    /// Recompute the square surface and apply the projection aspect in the
    /// same step, so size and aspect can never disagree.
    pub fn on_resize(&mut self, container: ContainerRect, camera: &mut Camera) -> Viewport {
        self.container = container;
        self.viewport = Viewport::square(container.surface_edge(self.scale))
            .with_pixel_ratio(self.viewport.pixel_ratio);
        camera.set_aspect(self.viewport.aspect);
        self.viewport
    }
}

//! egui input to host events.

use crystal_core::{ContainerRect, HostEvent};

/// Browser wheel delta units per point of egui scroll.
const WHEEL_SCALE: f32 = 2.0;

/// Pointer and wheel state of one egui frame, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub position: Option<egui::Pos2>,
    pub moved: bool,
    pub pressed: bool,
    pub released: bool,
    /// egui convention: positive when scrolling up.
    pub scroll_y: f32,
}

impl PointerSample {
    pub fn from_input(input: &egui::InputState) -> Self {
        Self {
            position: input.pointer.latest_pos(),
            moved: input.pointer.is_moving(),
            pressed: input.pointer.primary_pressed(),
            released: input.pointer.primary_released(),
            scroll_y: input.raw_scroll_delta.y,
        }
    }
}

pub fn container_rect(rect: egui::Rect) -> ContainerRect {
    ContainerRect::new(rect.min.x, rect.min.y, rect.width(), rect.height())
}

/// Window-level events for one widget panel.
///
/// Pointer events are global, like window listeners in a page. The wheel is
/// only delivered while the pointer is over the panel so the surrounding UI
/// keeps scrolling normally.
pub fn host_events(sample: &PointerSample, panel: egui::Rect) -> Vec<HostEvent> {
    let mut events = Vec::new();
    let Some(pos) = sample.position else {
        return events;
    };

    if sample.pressed {
        events.push(HostEvent::PointerDown { x: pos.x, y: pos.y });
    }
    if sample.moved {
        events.push(HostEvent::PointerMove { x: pos.x, y: pos.y });
    }
    if sample.released {
        events.push(HostEvent::PointerUp { x: pos.x, y: pos.y });
    }
    if sample.scroll_y != 0.0 && panel.contains(pos) {
        events.push(HostEvent::Wheel {
            delta_y: -sample.scroll_y * WHEEL_SCALE,
        });
    }
    events
}

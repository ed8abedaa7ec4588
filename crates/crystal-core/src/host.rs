//! Host collaborator seam.
//!
//! The host owns the page/window: it measures the mount container, delivers
//! global input events to subscribed widgets and calls back once per display
//! refresh for each outstanding frame request.

use std::collections::BTreeMap;

use crate::input::{ContainerRect, ListenerKind};

/// Token for a registered event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Token for a pending display-refresh callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequest(pub u64);

/// Services a widget needs from its host.
pub trait Host {
    /// Current mount container geometry.
    fn container(&self) -> ContainerRect;

    /// Device pixels per host pixel of the display showing the container.
    fn pixel_ratio(&self) -> f32 {
        1.0
    }

    /// Start delivering events of `kind` to the widget.
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    /// Stop delivering events for a listener. Unknown ids are ignored.
    fn remove_listener(&mut self, id: ListenerId);

    /// Ask for one callback before the next repaint.
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a pending frame request. Unknown requests are ignored.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// In-memory host that records subscriptions and frame requests.
///
/// Hosts with their own event loop wrap one of these per widget and poll
/// [`LocalHost::take_frame`] on every repaint.
#[derive(Debug, Default)]
pub struct LocalHost {
    container: ContainerRect,
    pixel_ratio: Option<f32>,
    listeners: BTreeMap<ListenerId, ListenerKind>,
    pending_frame: Option<FrameRequest>,
    next_id: u64,
}

impl LocalHost {
    pub fn new(container: ContainerRect) -> Self {
        Self {
            container,
            ..Self::default()
        }
    }

    pub fn set_container(&mut self, container: ContainerRect) {
        self.container = container;
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        self.pixel_ratio = Some(pixel_ratio);
    }

    /// True if any live listener is subscribed to `kind`.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending_frame
    }

    /// Consume the pending frame request, if any, for dispatch.
    pub fn take_frame(&mut self) -> Option<FrameRequest> {
        self.pending_frame.take()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for LocalHost {
    fn container(&self) -> ContainerRect {
        self.container
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio.unwrap_or(1.0)
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next());
        self.pending_frame = Some(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending_frame == Some(request) {
            self.pending_frame = None;
        }
    }
}

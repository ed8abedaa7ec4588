//! Widget lifecycle: `Unattached -> Attached -> Unattached`.
//!
//! [`Widget`] is the only type a host talks to. `attach` builds a fresh
//! scene, subscribes to host events and requests the first frame; `detach`
//! undoes exactly what `attach` did, in this order: cancel the pending frame,
//! remove listeners, unmount the surface, release resources.
//!
//! A frame callback only ticks if it carries the request the widget is
//! currently waiting for, so once `detach` returns no tick can run, even if
//! the host delivers a callback it had already queued.

use std::mem;

use crate::builder::{self, RandomSource, WidgetKind};
use crate::config::SceneConfig;
use crate::driver::{Frame, RenderDriver};
use crate::error::WidgetError;
use crate::host::{FrameRequest, Host, ListenerId};
use crate::input::{HostEvent, InputSampler, ListenerKind, Viewport};
use crate::kernel::AnimationKernel;
use crate::resources::ResourceRegistry;

/// Public view of the lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unattached,
    Attached,
}

/// Everything created by one `attach`.
struct Attachment {
    kernel: AnimationKernel,
    sampler: InputSampler,
    resources: ResourceRegistry,
    listeners: Vec<(ListenerId, ListenerKind)>,
    pending_frame: Option<FrameRequest>,
}

impl Attachment {
    fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.iter().any(|(_, k)| *k == kind)
    }
}

/// One embedded 3D widget bound to a render driver.
pub struct Widget<D: RenderDriver> {
    kind: WidgetKind,
    config: SceneConfig,
    random: RandomSource,
    driver: D,
    attachment: Option<Box<Attachment>>,
}

impl<D: RenderDriver> Widget<D> {
    pub fn new(kind: WidgetKind, config: SceneConfig, driver: D) -> Self {
        Self {
            kind,
            config,
            random: RandomSource::Entropy,
            driver,
            attachment: None,
        }
    }

    /// Use `random` for every subsequent scene build.
    pub fn with_random(mut self, random: RandomSource) -> Self {
        self.random = random;
        self
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn state(&self) -> LifecycleState {
        if self.attachment.is_some() {
            LifecycleState::Attached
        } else {
            LifecycleState::Unattached
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// The running kernel, if attached.
    pub fn kernel(&self) -> Option<&AnimationKernel> {
        self.attachment.as_ref().map(|a| &a.kernel)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.attachment.as_ref().map(|a| a.sampler.viewport())
    }

    /// Replace the configuration used by the next `attach`.
    pub fn set_config(&mut self, config: SceneConfig) {
        self.config = config;
    }

    /// Build the scene, mount the surface, subscribe and start the loop.
    ///
    /// Rejected with [`WidgetError::AlreadyAttached`] (and no side effects)
    /// while attached. A surface that cannot be acquired leaves the widget
    /// unattached with nothing registered.
    pub fn attach(&mut self, host: &mut impl Host) -> Result<(), WidgetError> {
        if self.attachment.is_some() {
            tracing::warn!("{} attach rejected: already attached", self.kind.name());
            return Err(WidgetError::AlreadyAttached);
        }

        let container = host.container();
        let surface = self.kind.surface_config(&self.config);
        let mut rng = self.random.rng();
        let built = builder::build(self.kind, &self.config, container, &mut rng);
        let viewport = built
            .viewport
            .with_pixel_ratio(surface.pixel_ratio(host.pixel_ratio()));

        if let Err(e) = self.driver.mount(viewport) {
            tracing::warn!("{} left unrendered: {}", self.kind.name(), e);
            return Err(e);
        }

        let listeners = self
            .kind
            .listeners()
            .iter()
            .map(|&kind| (host.add_listener(kind), kind))
            .collect();
        let pending_frame = Some(host.request_frame());

        let sampler = InputSampler::new(container, surface.scale, viewport);

        tracing::info!(
            "{} attached ({}px surface at {}x, {} objects)",
            self.kind.name(),
            viewport.edge,
            viewport.pixel_ratio,
            built.scene.len()
        );

        self.attachment = Some(Box::new(Attachment {
            kernel: AnimationKernel::new(built.scene, built.rules),
            sampler,
            resources: built.resources,
            listeners,
            pending_frame,
        }));
        Ok(())
    }

    /// Stop the loop and release everything `attach` created.
    ///
    /// Idempotent: detaching an unattached widget does nothing.
    pub fn detach(&mut self, host: &mut impl Host) {
        let Some(mut attachment) = self.attachment.take() else {
            return;
        };

        if let Some(request) = attachment.pending_frame.take() {
            host.cancel_frame(request);
        }

        for (id, _) in mem::take(&mut attachment.listeners) {
            host.remove_listener(id);
        }

        self.driver.unmount();

        self.driver.release(&attachment.resources);
        let report = attachment.resources.release_all();

        tracing::info!(
            "{} detached ({} geometries, {} materials released after {} ticks)",
            self.kind.name(),
            report.geometries,
            report.materials,
            attachment.kernel.ticks()
        );
    }

    /// Route a host event to the input sampler.
    ///
    /// Events arriving while unattached, or of a kind this widget did not
    /// subscribe to, are ignored.
    pub fn handle_event(&mut self, event: &HostEvent) {
        let Some(attachment) = self.attachment.as_deref_mut() else {
            return;
        };
        if !attachment.is_listening(event.listener_kind()) {
            return;
        }

        let (input, camera) = attachment.kernel.input_targets();
        let sampler = &mut attachment.sampler;
        match *event {
            HostEvent::PointerMove { x, y } => sampler.on_pointer_move(x, y, input, camera),
            HostEvent::PointerDown { x, y } => sampler.on_pointer_down(x, y, camera),
            HostEvent::PointerUp { .. } => sampler.on_pointer_up(camera),
            HostEvent::Wheel { delta_y } => sampler.on_scroll(delta_y, camera),
            HostEvent::Resize(container) => {
                let viewport = sampler.on_resize(container, camera);
                self.driver.resize(viewport);
            }
        }
    }

    /// Display-refresh callback: tick, draw, and request the next frame.
    ///
    /// Returns true if a frame was produced.
    pub fn on_frame(&mut self, host: &mut impl Host, request: FrameRequest) -> bool {
        let Some(attachment) = self.attachment.as_deref_mut() else {
            return false;
        };
        if attachment.pending_frame != Some(request) {
            tracing::trace!("Ignoring stale frame request {:?}", request);
            return false;
        }

        attachment.kernel.tick();

        let frame = Frame {
            scene: attachment.kernel.scene(),
            camera: attachment.kernel.camera(),
            viewport: attachment.sampler.viewport(),
            resources: &attachment.resources,
        };
        self.driver.render_frame(&frame);

        attachment.pending_frame = Some(host.request_frame());
        true
    }
}

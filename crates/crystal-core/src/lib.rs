//! Crystal Scenes Core
//!
//! Renderer-independent core of the embedded 3D widgets:
//! - Builder: scene graph construction for each widget kind
//! - Input: host events to normalized pointer, depth target and viewport
//! - Kernel: per-frame animation of objects, lights and camera
//! - Lifecycle: attach/detach state machine driving the frame loop
//!
//! Drawing goes through the [`driver::RenderDriver`] trait and everything a
//! widget needs from its embedding page or window goes through [`host::Host`].

pub mod builder;
pub mod camera;
pub mod config;
pub mod driver;
pub mod error;
pub mod host;
pub mod input;
pub mod kernel;
pub mod lifecycle;
pub mod light;
pub mod resources;
pub mod scene;
pub mod transform;

pub use builder::{BuiltScene, RandomSource, WidgetKind};
pub use camera::{Camera, DepthControl, OrbitController};
pub use config::SceneConfig;
pub use driver::{Frame, HeadlessDriver, RenderDriver};
pub use error::WidgetError;
pub use host::{FrameRequest, Host, ListenerId, LocalHost};
pub use input::{ContainerRect, HostEvent, InputSampler, InputState, ListenerKind, Viewport};
pub use kernel::{AnimationKernel, MotionRules};
pub use lifecycle::{LifecycleState, Widget};
pub use light::{LightKind, LightSource};
pub use resources::{GeometryHandle, MaterialHandle, ResourceRegistry};
pub use scene::{Behavior, ObjectId, Scene, SceneObject, SceneShape};
pub use transform::Transform;

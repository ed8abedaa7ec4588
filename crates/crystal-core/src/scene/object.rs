//! Scene object definition.

use glam::Vec3;

use crate::resources::{GeometryHandle, MaterialHandle};
use crate::transform::Transform;

/// Index of an object in its scene's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u32);

impl ObjectId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A renderable object.
///
/// Geometry and material are handles into the widget's resource registry;
/// the object only owns its transform.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: &'static str,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
    pub transform: Transform,
    pub visible: bool,
}

impl SceneObject {
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}

/// Per-object motion payload, stored next to the object in the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Never moves.
    Static,
    /// Drawn toward the pointer projection while within the influence radius,
    /// relaxes back to `original_position` otherwise. Spins about all three
    /// axes by `rotation_speed` each tick.
    Attract {
        original_position: Vec3,
        speed: f32,
        rotation_speed: f32,
    },
    /// Tilts toward the pointer, bobs vertically around `base_y`.
    Tilt { base_y: f32 },
    /// Constant per-tick rotation.
    Spin { rate: Vec3 },
}

impl Behavior {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Behavior::Static => "static",
            Behavior::Attract { .. } => "attract",
            Behavior::Tilt { .. } => "tilt",
            Behavior::Spin { .. } => "spin",
        }
    }
}

//! Scene graph for one widget instance.
//!
//! Objects live in an arena indexed by [`ObjectId`], with their behavior
//! payloads in a parallel vector at the same index. The builder populates
//! the scene once; afterwards only the animation kernel mutates transforms.

mod object;

pub use object::*;

use std::collections::BTreeMap;

use crate::camera::Camera;
use crate::light::{LightKind, LightSource};

/// Objects, lights and the camera of a widget.
pub struct Scene {
    objects: Vec<SceneObject>,
    behaviors: Vec<Behavior>,
    lights: Vec<LightSource>,
    pub camera: Camera,
}

/// Structural summary of a scene (counts and kinds, no values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneShape {
    pub object_count: usize,
    pub behaviors: BTreeMap<&'static str, usize>,
    pub lights: Vec<&'static str>,
}

impl Scene {
    /// Creates an empty scene around `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: Vec::new(),
            behaviors: Vec::new(),
            lights: Vec::new(),
            camera,
        }
    }

    /// Adds an object with its behavior payload.
    pub fn add_object(&mut self, mut object: SceneObject, behavior: Behavior) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        object.id = id;
        self.objects.push(object);
        self.behaviors.push(behavior);
        id
    }

    pub fn add_light(&mut self, light: LightSource) {
        self.lights.push(light);
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.index())
    }

    pub fn behavior(&self, id: ObjectId) -> Option<&Behavior> {
        self.behaviors.get(id.index())
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Objects paired with their behaviors, for the kernel's update pass.
    pub fn animated_mut(&mut self) -> impl Iterator<Item = (&mut SceneObject, &Behavior)> {
        self.objects.iter_mut().zip(self.behaviors.iter())
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut [LightSource] {
        &mut self.lights
    }

    /// Returns the number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn shape(&self) -> SceneShape {
        let mut behaviors = BTreeMap::new();
        for behavior in &self.behaviors {
            *behaviors.entry(behavior.kind_name()).or_insert(0) += 1;
        }

        let lights = self
            .lights
            .iter()
            .map(|light| match light.kind {
                LightKind::Ambient => "ambient",
                LightKind::Point { .. } => "point",
                LightKind::Directional => "directional",
            })
            .collect();

        SceneShape {
            object_count: self.objects.len(),
            behaviors,
            lights,
        }
    }
}

//! Per-frame animation.
//!
//! [`AnimationKernel`] owns every piece of mutable widget state and advances
//! it by exactly one step per [`AnimationKernel::tick`]. It never schedules
//! itself; the lifecycle manager calls it once per display refresh.

use glam::Vec3;

use crate::camera::{Camera, approach};
use crate::input::InputState;
use crate::scene::{Behavior, Scene};

/// Influence of the pointer on an object `distance` away: 1 at zero distance,
/// decaying linearly to 0 at `radius` and staying 0 beyond it.
pub fn influence(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / radius).clamp(0.0, 1.0)
}

/// Simulation clock advanced by a fixed step per tick, independent of wall
/// time, so motion speed is per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAccumulator {
    elapsed: f64,
    step: f64,
}

impl TimeAccumulator {
    pub fn new(step: f32) -> Self {
        Self {
            elapsed: 0.0,
            step: f64::from(step.max(0.0)),
        }
    }

    pub fn advance(&mut self) -> f32 {
        self.elapsed += self.step;
        self.elapsed as f32
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }
}

/// Widget-wide motion constants shared by every object's behavior.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionRules {
    /// Simulation time added per tick.
    pub time_step: f32,
    /// Scene units covered by the normalized pointer range `[-1, 1]`.
    pub pointer_reach: f32,
    pub influence_radius: f32,
    pub attract_rate: f32,
    pub return_rate: f32,
    pub tilt_gain: f32,
    pub tilt_easing: f32,
    pub spin: f32,
    pub float_amplitude: f32,
    pub float_speed: f32,
}

/// All animated state of one widget instance.
pub struct AnimationKernel {
    scene: Scene,
    input: InputState,
    clock: TimeAccumulator,
    rules: MotionRules,
    ticks: u64,
}

impl AnimationKernel {
    pub fn new(scene: Scene, rules: MotionRules) -> Self {
        Self {
            scene,
            input: InputState::default(),
            clock: TimeAccumulator::new(rules.time_step),
            rules,
            ticks: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.scene.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Input state and camera, for the input sampler to write into.
    pub fn input_targets(&mut self) -> (&mut InputState, &mut Camera) {
        (&mut self.input, &mut self.scene.camera)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Scene-space point the pointer maps to, on the z = 0 plane.
    pub fn pointer_projection(&self) -> Vec3 {
        let pointer = self.input.pointer_or_center();
        Vec3::new(
            pointer.x * self.rules.pointer_reach,
            pointer.y * self.rules.pointer_reach,
            0.0,
        )
    }

    /// Advance the simulation by one frame.
    pub fn tick(&mut self) {
        let time = self.clock.advance();
        self.ticks += 1;

        let camera = &mut self.scene.camera;
        if let Some(depth) = camera.depth.as_mut() {
            camera.position.z = depth.ease();
        }
        if let Some(orbit) = camera.orbit.as_mut() {
            camera.position = camera.target + orbit.update();
        }

        for light in self.scene.lights_mut() {
            if light.is_moving() {
                light.update(time);
            }
        }

        let projection = self.pointer_projection();
        let pointer = self.input.pointer_or_center();
        let rules = self.rules;

        for (object, behavior) in self.scene.animated_mut() {
            let transform = &mut object.transform;
            match *behavior {
                Behavior::Static => {}
                Behavior::Attract {
                    original_position,
                    speed,
                    rotation_speed,
                } => {
                    let weight =
                        influence(transform.position.distance(projection), rules.influence_radius);
                    transform.position = if weight > 0.0 {
                        let k = (weight * rules.attract_rate * speed).clamp(0.0, 1.0);
                        transform.position.lerp(projection, k)
                    } else {
                        transform.position.lerp(original_position, rules.return_rate.clamp(0.0, 1.0))
                    };
                    transform.rotation += Vec3::splat(rotation_speed);
                }
                Behavior::Tilt { base_y } => {
                    let target_x = pointer.y * rules.tilt_gain;
                    let target_y = pointer.x * rules.tilt_gain;
                    transform.rotation.x = approach(transform.rotation.x, target_x, rules.tilt_easing);
                    transform.rotation.y = approach(transform.rotation.y, target_y, rules.tilt_easing);
                    transform.position.y =
                        base_y + (time * rules.float_speed).sin() * rules.float_amplitude;
                    transform.rotation.z += rules.spin;
                }
                Behavior::Spin { rate } => {
                    transform.rotation += rate;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CameraConfig, DepthConfig};
    use crate::light::{LightSource, OrbitPlane};
    use crate::resources::{GeometryKind, MaterialParams, ResourceRegistry};
    use crate::scene::{ObjectId, SceneObject};
    use crate::transform::Transform;
    use approx::assert_relative_eq;
    use glam::Vec2;

    fn attract_scene(position: Vec3) -> (Scene, MotionRules) {
        let mut registry = ResourceRegistry::new();
        let mut scene = Scene::new(
            Camera::new(&CameraConfig::default(), Vec3::new(0.0, 0.0, 30.0))
                .with_depth(DepthConfig::default()),
        );
        scene.add_object(
            SceneObject {
                id: ObjectId(0),
                name: "crystal",
                geometry: registry.intern_geometry(GeometryKind::Octahedron { radius: 0.1 }),
                material: registry.intern_material(MaterialParams::crystal([1.0; 3])),
                transform: Transform::from_position(position),
                visible: true,
            },
            Behavior::Attract {
                original_position: position,
                speed: 1.0,
                rotation_speed: 0.01,
            },
        );
        let rules = MotionRules {
            time_step: 0.005,
            pointer_reach: 25.0,
            influence_radius: 10.0,
            attract_rate: 0.03,
            return_rate: 0.02,
            ..MotionRules::default()
        };
        (scene, rules)
    }

    #[test]
    fn test_influence_profile() {
        assert_relative_eq!(influence(0.0, 10.0), 1.0);
        assert_relative_eq!(influence(5.0, 10.0), 0.5);
        assert_relative_eq!(influence(10.0, 10.0), 0.0);
        assert_relative_eq!(influence(25.0, 10.0), 0.0);
        assert_relative_eq!(influence(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_clock_uses_fixed_step() {
        let mut clock = TimeAccumulator::new(0.005);
        for _ in 0..200 {
            clock.advance();
        }
        assert_relative_eq!(clock.elapsed(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_object_near_pointer_is_attracted() {
        let (scene, rules) = attract_scene(Vec3::new(3.0, 0.0, 0.0));
        let mut kernel = AnimationKernel::new(scene, rules);

        kernel.tick();
        let x = kernel.scene().objects()[0].position().x;
        // influence 0.7, rate 0.03 -> moved 2.1% of the way.
        assert_relative_eq!(x, 3.0 - 3.0 * 0.7 * 0.03, epsilon = 1e-5);
    }

    #[test]
    fn test_object_far_from_pointer_returns_home() {
        let home = Vec3::new(20.0, 0.0, 0.0);
        let (mut scene, rules) = attract_scene(home);
        // Displace without touching the stored original position.
        if let Some((object, _)) = scene.animated_mut().next() {
            object.transform.position = Vec3::new(22.0, 0.0, 0.0);
        }
        let mut kernel = AnimationKernel::new(scene, rules);

        kernel.tick();
        let x = kernel.scene().objects()[0].position().x;
        assert_relative_eq!(x, 22.0 - 2.0 * 0.02, epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_accumulates() {
        let (scene, rules) = attract_scene(Vec3::new(30.0, 0.0, 0.0));
        let mut kernel = AnimationKernel::new(scene, rules);
        for _ in 0..10 {
            kernel.tick();
        }
        let rotation = kernel.scene().objects()[0].transform.rotation;
        assert_relative_eq!(rotation.x, 0.1, epsilon = 1e-5);
        assert_relative_eq!(rotation.y, 0.1, epsilon = 1e-5);
        assert_relative_eq!(rotation.z, 0.1, epsilon = 1e-5);
    }

    #[test]
    fn test_depth_eases_toward_target() {
        let (scene, rules) = attract_scene(Vec3::ZERO);
        let mut kernel = AnimationKernel::new(scene, rules);
        {
            let (_, camera) = kernel.input_targets();
            if let Some(depth) = camera.depth.as_mut() {
                depth.nudge(1000.0);
            }
        }

        let mut previous = kernel.camera().position.z;
        for _ in 0..50 {
            kernel.tick();
            let z = kernel.camera().position.z;
            assert!(z > previous && z < 40.0);
            previous = z;
        }
    }

    #[test]
    fn test_lights_follow_orbit() {
        let (mut scene, rules) = attract_scene(Vec3::ZERO);
        scene.add_light(
            LightSource::point([1.0; 3], 2.0, 50.0, Vec3::new(0.0, 0.0, 10.0))
                .orbiting(OrbitPlane::XY, 15.0, 0.0),
        );
        let mut kernel = AnimationKernel::new(scene, rules);
        kernel.tick();

        let light = &kernel.scene().lights()[0];
        assert_relative_eq!(light.position.x, (0.005_f32).cos() * 15.0, epsilon = 1e-4);
        assert_relative_eq!(light.position.y, (0.005_f32).sin() * 15.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pointer_projection_scales_with_reach() {
        let (scene, rules) = attract_scene(Vec3::ZERO);
        let mut kernel = AnimationKernel::new(scene, rules);
        assert_eq!(kernel.pointer_projection(), Vec3::ZERO);

        kernel.input_targets().0.pointer = Some(Vec2::new(0.5, -1.0));
        assert_eq!(kernel.pointer_projection(), Vec3::new(12.5, -25.0, 0.0));
    }
}

//! Floating crystal: one large crystal that tilts toward the pointer.

use std::f32::consts::PI;

use glam::Vec3;

use crate::camera::Camera;
use crate::config::{FloatingConfig, rgb};
use crate::kernel::MotionRules;
use crate::light::{LightSource, OrbitPlane};
use crate::resources::{GeometryKind, MaterialParams, ResourceRegistry};
use crate::scene::{Behavior, ObjectId, Scene, SceneObject};
use crate::transform::Transform;

pub(super) fn build(config: &FloatingConfig, resources: &mut ResourceRegistry) -> (Scene, MotionRules) {
    let camera = Camera::new(&config.camera, Vec3::new(0.0, 0.0, config.camera_distance));
    let mut scene = Scene::new(camera);

    let geometry = resources.intern_geometry(GeometryKind::Octahedron {
        radius: config.crystal_radius,
    });
    let material = resources.intern_material(MaterialParams::crystal(rgb(config.color)));
    let transform = Transform::IDENTITY;

    scene.add_object(
        SceneObject {
            id: ObjectId(0),
            name: "crystal",
            geometry,
            material,
            transform,
            visible: true,
        },
        Behavior::Tilt {
            base_y: transform.position.y,
        },
    );

    scene.add_light(LightSource::ambient([1.0; 3], 0.5));
    scene.add_light(
        LightSource::point(rgb(0xff7777), 1.0, 20.0, Vec3::new(0.0, config.light_height, 0.0))
            .orbiting(OrbitPlane::XZ, config.light_orbit_radius, 0.0),
    );
    scene.add_light(
        LightSource::point(rgb(0x7777ff), 1.0, 20.0, Vec3::new(0.0, -config.light_height, 0.0))
            .orbiting(OrbitPlane::XZ, config.light_orbit_radius, PI),
    );

    let rules = MotionRules {
        time_step: config.time_step,
        tilt_gain: config.tilt_gain,
        tilt_easing: config.tilt_easing,
        spin: config.spin,
        float_amplitude: config.float_amplitude,
        float_speed: config.float_speed,
        ..MotionRules::default()
    };

    (scene, rules)
}

//! Globe: planet with cloud and atmosphere shells, a profile disc and a
//! glow ring, seen through a damped auto-rotating orbit camera.

use glam::Vec3;

use crate::camera::Camera;
use crate::config::{GlobeConfig, rgb};
use crate::kernel::MotionRules;
use crate::light::LightSource;
use crate::resources::{BlendMode, GeometryKind, MaterialParams, ResourceRegistry, Side};
use crate::scene::{Behavior, ObjectId, Scene, SceneObject};
use crate::transform::Transform;

const DISC_SEGMENTS: u32 = 32;

pub(super) fn build(config: &GlobeConfig, resources: &mut ResourceRegistry) -> (Scene, MotionRules) {
    let camera = Camera::new(&config.camera, Vec3::new(0.0, 0.0, config.camera_distance))
        .with_orbit(config.orbit);
    let mut scene = Scene::new(camera);

    let tilted = Transform::IDENTITY.with_rotation(Vec3::new(config.tilt, 0.0, 0.0));
    let sphere = |radius| GeometryKind::Sphere {
        radius,
        segments: config.sphere_segments,
    };

    let shells = [
        (
            "globe",
            config.globe_radius,
            MaterialParams {
                roughness: 0.8,
                ..MaterialParams::with_color(rgb(config.globe_color))
            },
            Behavior::Static,
        ),
        (
            "clouds",
            config.clouds_radius,
            MaterialParams::glow([1.0; 3], 0.4),
            Behavior::Spin {
                rate: Vec3::new(0.0, config.cloud_spin, 0.0),
            },
        ),
        (
            "atmosphere",
            config.atmosphere_radius,
            MaterialParams::glow(rgb(config.atmosphere_color), 0.15).with_side(Side::Back),
            Behavior::Static,
        ),
    ];

    for (name, radius, params, behavior) in shells {
        scene.add_object(
            SceneObject {
                id: ObjectId(0),
                name,
                geometry: resources.intern_geometry(sphere(radius)),
                material: resources.intern_material(params),
                transform: tilted,
                visible: true,
            },
            behavior,
        );
    }

    scene.add_object(
        SceneObject {
            id: ObjectId(0),
            name: "profile",
            geometry: resources.intern_geometry(GeometryKind::Circle {
                radius: config.profile_radius,
                segments: DISC_SEGMENTS,
            }),
            material: resources.intern_material(MaterialParams {
                unlit: true,
                ..MaterialParams::with_color([0.85, 0.85, 0.9]).with_side(Side::Double)
            }),
            transform: Transform::from_position(Vec3::new(0.0, 0.0, 0.1)),
            visible: true,
        },
        Behavior::Static,
    );

    scene.add_object(
        SceneObject {
            id: ObjectId(0),
            name: "ring",
            geometry: resources.intern_geometry(GeometryKind::Ring {
                inner: config.ring_inner,
                outer: config.ring_outer,
                segments: DISC_SEGMENTS,
            }),
            material: resources.intern_material(MaterialParams {
                unlit: true,
                ..MaterialParams::with_color(rgb(config.ring_color))
                    .with_side(Side::Double)
                    .with_blend(BlendMode::Alpha, 0.5)
            }),
            transform: Transform::IDENTITY,
            visible: true,
        },
        Behavior::Static,
    );

    scene.add_light(LightSource::ambient([1.0; 3], 0.4));
    scene.add_light(LightSource::directional([1.0; 3], 1.8, Vec3::new(5.0, 3.0, 5.0)));
    scene.add_light(LightSource::directional(
        rgb(0x0077ff),
        0.75,
        Vec3::new(-5.0, -3.0, -5.0),
    ));

    // The globe has no simulation clock; only the camera and clouds move.
    (scene, MotionRules::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::AnimationKernel;
    use approx::assert_relative_eq;

    fn small_config() -> GlobeConfig {
        GlobeConfig {
            sphere_segments: 16,
            ..GlobeConfig::default()
        }
    }

    #[test]
    fn test_globe_scene() {
        let mut resources = ResourceRegistry::new();
        let (scene, _) = build(&small_config(), &mut resources);

        let names: Vec<&str> = scene.objects().iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["globe", "clouds", "atmosphere", "profile", "ring"]);
        assert_eq!(resources.geometry_count(), 5);
        assert!(scene.camera.orbit.is_some());
        assert!(scene.camera.depth.is_none());
    }

    #[test]
    fn test_clouds_spin_and_camera_orbits() {
        let mut resources = ResourceRegistry::new();
        let (scene, rules) = build(&small_config(), &mut resources);
        let mut kernel = AnimationKernel::new(scene, rules);

        for _ in 0..100 {
            kernel.tick();
        }

        let clouds = &kernel.scene().objects()[1];
        assert_relative_eq!(clouds.transform.rotation.y, 100.0 * 0.0005, epsilon = 1e-5);
        assert_relative_eq!(clouds.transform.rotation.x, 0.5);
        let globe = &kernel.scene().objects()[0];
        assert_relative_eq!(globe.transform.rotation.y, 0.0);

        let camera = kernel.camera();
        assert!(camera.position.x.abs() > 0.0);
        assert_relative_eq!(camera.position.length(), 6.0, epsilon = 1e-3);
    }
}

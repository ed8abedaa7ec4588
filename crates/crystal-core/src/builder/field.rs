//! Crystal field: a cube of small crystals that swarm toward the pointer.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::camera::Camera;
use crate::config::{FieldConfig, rgb};
use crate::kernel::MotionRules;
use crate::light::{LightSource, OrbitPlane};
use crate::resources::{GeometryKind, MaterialParams, ResourceRegistry};
use crate::scene::{Behavior, ObjectId, Scene, SceneObject};
use crate::transform::Transform;

const LIGHT_COLORS: [u32; 3] = [0xff7777, 0x7777ff, 0x77ff77];

/// Uniform sample in `[min, max)`; degenerate ranges return `min`.
fn uniform(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + rng.gen_range(0.0..1.0f32) * (max - min)
}

pub(super) fn build(
    config: &FieldConfig,
    resources: &mut ResourceRegistry,
    rng: &mut impl Rng,
) -> (Scene, MotionRules) {
    let camera = Camera::new(&config.camera, Vec3::new(0.0, 0.0, config.depth.initial))
        .with_depth(config.depth);
    let mut scene = Scene::new(camera);

    let geometries = [
        resources.intern_geometry(GeometryKind::Tetrahedron {
            radius: config.crystal_radius,
        }),
        resources.intern_geometry(GeometryKind::Octahedron {
            radius: config.crystal_radius,
        }),
        resources.intern_geometry(GeometryKind::Icosahedron {
            radius: config.crystal_radius,
        }),
    ];

    let palette: Vec<[f32; 3]> = if config.palette.is_empty() {
        vec![[1.0; 3]]
    } else {
        config.palette.iter().map(|&hex| rgb(hex)).collect()
    };

    let half = config.spread / 2.0;
    for _ in 0..config.crystal_count {
        let geometry = geometries[rng.gen_range(0..geometries.len())];
        let color = palette[rng.gen_range(0..palette.len())];
        let material = resources.intern_material(MaterialParams::crystal(color));

        let position = Vec3::new(
            uniform(rng, -half, half),
            uniform(rng, -half, half),
            uniform(rng, -half, half),
        );
        let rotation = Vec3::new(
            uniform(rng, 0.0, PI),
            uniform(rng, 0.0, PI),
            uniform(rng, 0.0, PI),
        );
        let speed = uniform(rng, config.speed_min, config.speed_max);
        let rotation_speed = uniform(rng, -config.rotation_speed_max, config.rotation_speed_max);

        scene.add_object(
            SceneObject {
                id: ObjectId(0),
                name: "crystal",
                geometry,
                material,
                transform: Transform::from_position(position).with_rotation(rotation),
                visible: true,
            },
            Behavior::Attract {
                original_position: position,
                speed,
                rotation_speed,
            },
        );
    }

    scene.add_light(LightSource::ambient([1.0; 3], 0.5));
    for (i, &hex) in LIGHT_COLORS.iter().enumerate() {
        let phase = i as f32 * TAU / LIGHT_COLORS.len() as f32;
        scene.add_light(
            LightSource::point(
                rgb(hex),
                2.0,
                50.0,
                Vec3::new(0.0, 0.0, config.light_height),
            )
            .orbiting(OrbitPlane::XY, config.light_orbit_radius, phase),
        );
    }

    let rules = MotionRules {
        time_step: config.time_step,
        pointer_reach: half,
        influence_radius: config.influence_radius,
        attract_rate: config.attract_rate,
        return_rate: config.return_rate,
        ..MotionRules::default()
    };

    (scene, rules)
}

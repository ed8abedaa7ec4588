//! Scene graph construction for each widget kind.
//!
//! Building is deterministic in shape and stochastic in content: object and
//! light counts depend only on configuration, while positions, rotations,
//! speeds, geometry and colour choices come from the supplied random source.

mod field;
mod floating;
mod globe;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{SceneConfig, SurfaceConfig};
use crate::input::{ContainerRect, ListenerKind, Viewport};
use crate::kernel::MotionRules;
use crate::resources::ResourceRegistry;
use crate::scene::Scene;

/// Source of randomness for scene construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomSource {
    /// Fresh OS entropy on every build.
    #[default]
    Entropy,
    /// Reproducible builds; every build with the same seed is identical.
    Seeded(u64),
}

impl RandomSource {
    pub fn rng(&self) -> StdRng {
        match *self {
            RandomSource::Entropy => StdRng::from_entropy(),
            RandomSource::Seeded(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

/// The three widget flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    CrystalField,
    FloatingCrystal,
    Globe,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 3] = [
        WidgetKind::CrystalField,
        WidgetKind::FloatingCrystal,
        WidgetKind::Globe,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::CrystalField => "Crystal Field",
            WidgetKind::FloatingCrystal => "Floating Crystal",
            WidgetKind::Globe => "Globe",
        }
    }

    /// Host events this widget subscribes to while attached.
    pub fn listeners(&self) -> &'static [ListenerKind] {
        match self {
            WidgetKind::CrystalField => &[
                ListenerKind::PointerMove,
                ListenerKind::Wheel,
                ListenerKind::Resize,
            ],
            WidgetKind::FloatingCrystal => &[ListenerKind::PointerMove, ListenerKind::Resize],
            WidgetKind::Globe => &[
                ListenerKind::PointerDown,
                ListenerKind::PointerMove,
                ListenerKind::PointerUp,
                ListenerKind::Resize,
            ],
        }
    }

    pub fn surface_config(&self, config: &SceneConfig) -> SurfaceConfig {
        match self {
            WidgetKind::CrystalField => config.field.surface,
            WidgetKind::FloatingCrystal => config.floating.surface,
            WidgetKind::Globe => config.globe.surface,
        }
    }
}

/// Output of a build: everything a kernel needs to start animating.
pub struct BuiltScene {
    pub scene: Scene,
    pub resources: ResourceRegistry,
    pub rules: MotionRules,
    pub viewport: Viewport,
}

/// Square surface for `container`, falling back to the configured minimum
/// edge when the container has no extent yet.
pub fn initial_viewport(container: ContainerRect, surface: &SurfaceConfig) -> Viewport {
    let edge = container.surface_edge(surface.scale);
    if edge == 0 {
        tracing::trace!("Container has no extent, using {}px surface", surface.min_edge);
        Viewport::square(surface.min_edge.max(1))
    } else {
        Viewport::square(edge)
    }
}

/// Build the scene for `kind` inside `container`.
pub fn build(
    kind: WidgetKind,
    config: &SceneConfig,
    container: ContainerRect,
    rng: &mut StdRng,
) -> BuiltScene {
    let viewport = initial_viewport(container, &kind.surface_config(config));
    let mut resources = ResourceRegistry::new();

    let (mut scene, rules) = match kind {
        WidgetKind::CrystalField => field::build(&config.field, &mut resources, rng),
        WidgetKind::FloatingCrystal => floating::build(&config.floating, &mut resources),
        WidgetKind::Globe => globe::build(&config.globe, &mut resources),
    };
    scene.camera.set_aspect(viewport.aspect);

    tracing::debug!(
        "Built {} scene: {} objects, {} lights, {} geometries, {} materials",
        kind.name(),
        scene.len(),
        scene.lights().len(),
        resources.geometry_count(),
        resources.material_count()
    );

    BuiltScene {
        scene,
        resources,
        rules,
        viewport,
    }
}

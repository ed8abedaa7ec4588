//! Tunable widget parameters
//!
//! Every constant that shapes a widget's scene or motion lives here so hosts
//! can override it (the frontend persists these as RON). Defaults reproduce
//! the stock look of each widget.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Clamp a per-tick blend factor into the open interval `(0, 1)`.
fn blend_factor(k: f32) -> f32 {
    if k.is_finite() {
        k.clamp(1e-4, 1.0 - 1e-4)
    } else {
        1e-4
    }
}

/// Order a `(min, max)` pair; non-finite bounds fall back to `fallback`.
fn ordered(min: f32, max: f32, fallback: (f32, f32)) -> (f32, f32) {
    if !min.is_finite() || !max.is_finite() {
        return fallback;
    }
    (min.min(max), min.max(max))
}

/// Convert a `0xRRGGBB` colour to linear-ish RGB floats in `0.0..=1.0`.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Perspective camera settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 1000.0,
        }
    }
}

/// Scroll-driven camera depth.
///
/// `min`/`max` bound the target depth; `easing` is the per-tick blend factor
/// of the actual depth toward the target and must lie in `(0, 1)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DepthConfig {
    pub initial: f32,
    pub min: f32,
    pub max: f32,
    pub wheel_gain: f32,
    pub easing: f32,
}

impl DepthConfig {
    /// Copy with ordered bounds and an easing factor inside `(0, 1)`.
    ///
    /// Values read from a user file can be anything that parses; this keeps
    /// clamping well-defined and the eased depth from overshooting.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let (min, max) = ordered(self.min, self.max, (defaults.min, defaults.max));
        Self {
            initial: if self.initial.is_finite() {
                self.initial
            } else {
                defaults.initial
            },
            min,
            max,
            wheel_gain: if self.wheel_gain.is_finite() {
                self.wheel_gain
            } else {
                defaults.wheel_gain
            },
            easing: blend_factor(self.easing),
        }
    }
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            initial: 30.0,
            min: 15.0,
            max: 45.0,
            wheel_gain: 0.01,
            easing: 0.1,
        }
    }
}

/// Render surface sizing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Edge used when the container measures zero at build time.
    pub min_edge: u32,
    /// Multiplier applied to `max(width, height)` of the container.
    pub scale: f32,
    /// Upper bound on device pixels per host pixel; `None` follows the display.
    pub max_pixel_ratio: Option<f32>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            min_edge: 300,
            scale: 1.0,
            max_pixel_ratio: Some(2.0),
        }
    }
}

impl SurfaceConfig {
    /// Pixel ratio to render at on a display with `device_ratio`.
    pub fn pixel_ratio(&self, device_ratio: f32) -> f32 {
        let device_ratio = if device_ratio.is_finite() && device_ratio > 0.0 {
            device_ratio
        } else {
            1.0
        };
        match self.max_pixel_ratio {
            Some(cap) if cap.is_finite() && cap > 0.0 => device_ratio.min(cap),
            _ => device_ratio,
        }
    }
}

/// Crystal field: many small crystals drifting toward the pointer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub crystal_count: usize,
    pub spread: f32,
    pub crystal_radius: f32,
    pub palette: Vec<u32>,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Rotation speeds are drawn from `[-max, max)`.
    pub rotation_speed_max: f32,
    pub influence_radius: f32,
    pub attract_rate: f32,
    pub return_rate: f32,
    pub time_step: f32,
    pub light_orbit_radius: f32,
    pub light_height: f32,
    pub depth: DepthConfig,
    pub camera: CameraConfig,
    pub surface: SurfaceConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            crystal_count: 1000,
            spread: 50.0,
            crystal_radius: 0.1,
            palette: vec![0x88ccff, 0xff88cc, 0xccff88, 0xffcc88, 0x88ffcc],
            speed_min: 0.5,
            speed_max: 1.0,
            rotation_speed_max: 0.01,
            influence_radius: 10.0,
            attract_rate: 0.03,
            return_rate: 0.02,
            time_step: 0.005,
            light_orbit_radius: 15.0,
            light_height: 10.0,
            depth: DepthConfig::default(),
            camera: CameraConfig {
                far_plane: 10000.0,
                ..CameraConfig::default()
            },
            surface: SurfaceConfig::default(),
        }
    }
}

/// Single crystal that tilts toward the pointer and bobs in place
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FloatingConfig {
    pub crystal_radius: f32,
    pub color: u32,
    pub tilt_gain: f32,
    pub tilt_easing: f32,
    pub spin: f32,
    pub float_amplitude: f32,
    pub float_speed: f32,
    pub time_step: f32,
    pub light_orbit_radius: f32,
    pub light_height: f32,
    pub camera_distance: f32,
    pub camera: CameraConfig,
    pub surface: SurfaceConfig,
}

impl Default for FloatingConfig {
    fn default() -> Self {
        Self {
            crystal_radius: 2.0,
            color: 0x88ccff,
            tilt_gain: 0.5,
            tilt_easing: 0.1,
            spin: 0.005,
            float_amplitude: 0.2,
            float_speed: 0.02,
            time_step: 0.01,
            light_orbit_radius: 5.0,
            light_height: 5.0,
            camera_distance: 6.0,
            camera: CameraConfig::default(),
            surface: SurfaceConfig::default(),
        }
    }
}

/// Damped orbit controller settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    pub damping: f32,
    pub rotate_speed: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub min_polar: f32,
    pub max_polar: f32,
}

impl OrbitConfig {
    /// Copy with an ordered polar range inside `[0, π]` and damping inside `(0, 1)`.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let (min_polar, max_polar) = ordered(
            self.min_polar,
            self.max_polar,
            (defaults.min_polar, defaults.max_polar),
        );
        let finite_or = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };
        Self {
            damping: blend_factor(self.damping),
            rotate_speed: finite_or(self.rotate_speed, defaults.rotate_speed),
            auto_rotate: self.auto_rotate,
            auto_rotate_speed: finite_or(self.auto_rotate_speed, defaults.auto_rotate_speed),
            min_polar: min_polar.clamp(0.0, PI),
            max_polar: max_polar.clamp(0.0, PI),
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            damping: 0.05,
            rotate_speed: 0.5,
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            min_polar: PI / 4.0,
            max_polar: 3.0 * PI / 4.0,
        }
    }
}

/// Globe with cloud and atmosphere shells under an orbiting camera
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    pub globe_radius: f32,
    pub clouds_radius: f32,
    pub atmosphere_radius: f32,
    pub sphere_segments: u32,
    pub tilt: f32,
    pub cloud_spin: f32,
    pub globe_color: u32,
    pub atmosphere_color: u32,
    pub profile_radius: f32,
    pub ring_inner: f32,
    pub ring_outer: f32,
    pub ring_color: u32,
    pub camera_distance: f32,
    pub orbit: OrbitConfig,
    pub camera: CameraConfig,
    pub surface: SurfaceConfig,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            globe_radius: 2.5,
            clouds_radius: 2.53,
            atmosphere_radius: 2.65,
            sphere_segments: 128,
            tilt: 0.5,
            cloud_spin: 0.0005,
            globe_color: 0x2a5d8f,
            atmosphere_color: 0x0077ff,
            profile_radius: 2.0,
            ring_inner: 2.1,
            ring_outer: 2.3,
            ring_color: 0x88ccff,
            camera_distance: 6.0,
            orbit: OrbitConfig::default(),
            camera: CameraConfig::default(),
            surface: SurfaceConfig {
                scale: 1.2,
                max_pixel_ratio: None,
                ..SurfaceConfig::default()
            },
        }
    }
}

/// Configuration for all widget kinds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SceneConfig {
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub floating: FloatingConfig,
    #[serde(default)]
    pub globe: GlobeConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x000000), [0.0, 0.0, 0.0]);
        let c = rgb(0x88ccff);
        assert!((c[0] - 136.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_sanitized_depth_orders_bounds() {
        let depth = DepthConfig {
            min: 45.0,
            max: 15.0,
            easing: 1.5,
            ..DepthConfig::default()
        }
        .sanitized();
        assert_eq!((depth.min, depth.max), (15.0, 45.0));
        assert!(depth.easing > 0.0 && depth.easing < 1.0);

        let depth = DepthConfig {
            easing: -2.0,
            min: f32::NAN,
            ..DepthConfig::default()
        }
        .sanitized();
        assert!(depth.easing > 0.0);
        assert_eq!((depth.min, depth.max), (15.0, 45.0));
    }

    #[test]
    fn test_sanitized_orbit_orders_polar_range() {
        let orbit = OrbitConfig {
            min_polar: 2.0,
            max_polar: 1.0,
            damping: 0.0,
            ..OrbitConfig::default()
        }
        .sanitized();
        assert_eq!((orbit.min_polar, orbit.max_polar), (1.0, 2.0));
        assert!(orbit.damping > 0.0 && orbit.damping < 1.0);

        let orbit = OrbitConfig {
            max_polar: 10.0,
            ..OrbitConfig::default()
        }
        .sanitized();
        assert_eq!(orbit.max_polar, PI);
    }

    #[test]
    fn test_partial_widget_config_keeps_other_defaults() {
        let field: FieldConfig = ron::from_str("(crystal_count: 12)").expect("parse field config");
        assert_eq!(field.crystal_count, 12);
        assert_eq!(field.spread, FieldConfig::default().spread);
        assert_eq!(field.depth, DepthConfig::default());
    }

    #[test]
    fn test_pixel_ratio_cap() {
        let capped = SurfaceConfig::default();
        assert_eq!(capped.pixel_ratio(3.0), 2.0);
        assert_eq!(capped.pixel_ratio(1.25), 1.25);
        assert_eq!(capped.pixel_ratio(0.0), 1.0);

        let globe = GlobeConfig::default().surface;
        assert_eq!(globe.pixel_ratio(3.0), 3.0);
    }

    #[test]
    fn test_depth_defaults_are_ordered() {
        let depth = DepthConfig::default();
        assert!(depth.min < depth.initial && depth.initial < depth.max);
        assert!(depth.easing > 0.0 && depth.easing < 1.0);
    }
}

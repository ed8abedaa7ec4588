//! Uniform buffer layouts shared with `crystal.wgsl`.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crystal_core::{Camera, LightKind, LightSource};

use crate::constants::{MAX_LIGHTS, light_kind};

/// Camera uniform (80 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Eye position, w unused.
    pub eye: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0, 0.0, 1.0, 1.0],
        }
    }
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            eye: camera.position.extend(1.0).to_array(),
        }
    }
}

/// One light as seen by the shader (48 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct GpuLight {
    /// xyz = position (direction source for directional lights), w = kind.
    pub position_kind: [f32; 4],
    /// RGB and intensity.
    pub color_intensity: [f32; 4],
    /// x = range (0 = no falloff), yzw unused.
    pub params: [f32; 4],
}

impl GpuLight {
    pub fn from_light(light: &LightSource) -> Self {
        let (kind, range) = match light.kind {
            LightKind::Ambient => (light_kind::AMBIENT, 0.0),
            LightKind::Point { range } => (light_kind::POINT, range),
            LightKind::Directional => (light_kind::DIRECTIONAL, 0.0),
        };
        let [r, g, b] = light.color;
        Self {
            position_kind: light.position.extend(kind).to_array(),
            color_intensity: [r, g, b, light.intensity],
            params: [range, 0.0, 0.0, 0.0],
        }
    }
}

/// All lights of a frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightsUniform {
    pub lights: [GpuLight; MAX_LIGHTS],
    /// x = number of valid entries in `lights`.
    pub count: [u32; 4],
}

impl Default for LightsUniform {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl LightsUniform {
    pub fn from_lights(lights: &[LightSource]) -> Self {
        if lights.len() > MAX_LIGHTS {
            tracing::warn!("{} lights in scene, only {} rendered", lights.len(), MAX_LIGHTS);
        }
        let mut uniform = Self::default();
        for (slot, light) in uniform.lights.iter_mut().zip(lights) {
            *slot = GpuLight::from_light(light);
        }
        uniform.count[0] = lights.len().min(MAX_LIGHTS) as u32;
        uniform
    }
}

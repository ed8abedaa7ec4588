//! Renderer constants

/// Depth buffer format for every surface.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// MSAA sample count for widget surfaces (1 disables MSAA).
pub const SAMPLE_COUNT: u32 = 4;

/// Upper bound on lights uploaded per frame; extra lights are dropped.
pub const MAX_LIGHTS: usize = 8;

/// Surfaces are cleared to transparent so the host background shows through.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::TRANSPARENT;

/// Instance buffers start at this capacity and double as needed.
pub const INITIAL_INSTANCE_CAPACITY: usize = 64;

/// Light kinds as encoded in the light uniform.
pub mod light_kind {
    pub const AMBIENT: f32 = 0.0;
    pub const POINT: f32 = 1.0;
    pub const DIRECTIONAL: f32 = 2.0;
}

//! Surface material parameters.

/// How a surface is composited over what is already drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    #[default]
    Opaque,
    /// Standard alpha blending, rendered after opaque surfaces.
    Alpha,
    /// Colour is added to the target; used for glow shells.
    Additive,
}

impl BlendMode {
    /// Returns the sort order for this mode (lower = drawn first).
    pub fn sort_order(&self) -> i32 {
        match self {
            BlendMode::Opaque => 0,
            BlendMode::Alpha => 100,
            BlendMode::Additive => 200,
        }
    }
}

/// Which faces of a surface are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Physically-inspired material description.
///
/// Transmission, clearcoat and iridescence are approximations the renderer
/// folds into its lighting model; they are kept separate so hosts can tune
/// them without touching shaders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    pub color: [f32; 3],
    pub opacity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub transmission: f32,
    pub clearcoat: f32,
    pub iridescence: f32,
    /// Emissive materials ignore lighting entirely.
    pub unlit: bool,
    pub blend: BlendMode,
    pub side: Side,
    pub depth_write: bool,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            metalness: 0.0,
            roughness: 1.0,
            transmission: 0.0,
            clearcoat: 0.0,
            iridescence: 0.0,
            unlit: false,
            blend: BlendMode::Opaque,
            side: Side::Front,
            depth_write: true,
        }
    }
}

impl MaterialParams {
    pub fn with_color(color: [f32; 3]) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Glassy crystal look shared by the crystal widgets.
    pub fn crystal(color: [f32; 3]) -> Self {
        Self {
            color,
            metalness: 0.1,
            roughness: 0.1,
            transmission: 0.9,
            clearcoat: 1.0,
            iridescence: 0.3,
            ..Self::default()
        }
    }

    /// Semi-transparent shell that brightens whatever is behind it.
    pub fn glow(color: [f32; 3], opacity: f32) -> Self {
        Self {
            color,
            opacity,
            blend: BlendMode::Additive,
            depth_write: false,
            ..Self::default()
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode, opacity: f32) -> Self {
        self.blend = blend;
        self.opacity = opacity;
        self
    }

    /// RGBA colour as sent to the GPU.
    pub fn rgba(&self) -> [f32; 4] {
        [self.color[0], self.color[1], self.color[2], self.opacity]
    }
}

//! Crystal Scenes Renderer
//!
//! WGPU-based render driver for the crystal widgets.
//!
//! # Architecture
//!
//! - [`driver::WgpuDriver`] - [`crystal_core::RenderDriver`] drawing into an offscreen square texture
//! - [`batch`] - groups visible objects into instanced draws
//! - [`pipeline::PipelineCache`] - one pipeline per blend mode, side and depth-write combination
//! - [`mesh::MeshCache`] - GPU meshes keyed by geometry handle

pub mod batch;
pub mod constants;
pub mod driver;
pub mod error;
pub mod mesh;
pub mod pipeline;
pub mod target;
pub mod uniforms;
pub mod vertex;

pub use driver::WgpuDriver;
pub use error::RenderError;

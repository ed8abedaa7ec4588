//! Render pipelines, one per [`PipelineKey`].

use std::collections::HashMap;

use crystal_core::resources::{BlendMode, Side};

use crate::batch::PipelineKey;
use crate::constants::{DEPTH_FORMAT, SAMPLE_COUNT};
use crate::vertex::{MeshVertex, ObjectInstance};

/// Multisample state matching the surface attachments.
pub fn multisample_state() -> wgpu::MultisampleState {
    wgpu::MultisampleState {
        count: SAMPLE_COUNT,
        ..Default::default()
    }
}

/// Colour blend state for a blend mode.
pub fn blend_state(blend: BlendMode) -> Option<wgpu::BlendState> {
    match blend {
        BlendMode::Opaque => Some(wgpu::BlendState::REPLACE),
        BlendMode::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
        BlendMode::Additive => Some(wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::Zero,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        }),
    }
}

/// Faces culled for a side.
pub fn cull_mode(side: Side) -> Option<wgpu::Face> {
    match side {
        Side::Front => Some(wgpu::Face::Back),
        Side::Back => Some(wgpu::Face::Front),
        Side::Double => None,
    }
}

/// Bind group layout for camera (binding 0) and lights (binding 1).
pub fn create_frame_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let uniform = |binding, visibility| wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Frame Bind Group Layout"),
        entries: &[
            uniform(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
            uniform(1, wgpu::ShaderStages::FRAGMENT),
        ],
    })
}

/// Lazily built pipelines sharing one shader and layout.
pub struct PipelineCache {
    shader: wgpu::ShaderModule,
    layout: wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl PipelineCache {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Crystal Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/crystal.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Crystal Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        Self {
            shader,
            layout,
            format,
            pipelines: HashMap::new(),
        }
    }

    pub fn get_or_create(&mut self, device: &wgpu::Device, key: PipelineKey) -> &wgpu::RenderPipeline {
        let Self {
            shader,
            layout,
            format,
            pipelines,
        } = self;
        pipelines.entry(key).or_insert_with(|| {
            tracing::debug!("Creating pipeline for {:?}", key);
            Self::create(device, &*shader, &*layout, *format, key)
        })
    }

    pub fn get(&self, key: &PipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(key)
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    fn create(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        format: wgpu::TextureFormat,
        key: PipelineKey,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Crystal Pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::layout(), ObjectInstance::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: blend_state(key.blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: cull_mode(key.side),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: key.depth_write,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: multisample_state(),
            multiview: None,
            cache: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cull_modes() {
        assert_eq!(cull_mode(Side::Front), Some(wgpu::Face::Back));
        assert_eq!(cull_mode(Side::Back), Some(wgpu::Face::Front));
        assert_eq!(cull_mode(Side::Double), None);
    }

    #[test]
    fn test_additive_keeps_destination() {
        let blend = blend_state(BlendMode::Additive).expect("additive blend");
        assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(blend_state(BlendMode::Opaque), Some(wgpu::BlendState::REPLACE));
    }

    #[test]
    fn test_pipelines_sample_like_surface() {
        let state = multisample_state();
        assert_eq!(state.count, SAMPLE_COUNT);
        assert_eq!(state.count, 4);
        assert_eq!(state.mask, !0);
        assert!(!state.alpha_to_coverage_enabled);
    }
}

//! wgpu-backed render driver.
//!
//! Draws a widget into an offscreen square texture that the host composites
//! into its own UI. The host reads the texture through [`WgpuDriver::target_view`]
//! and re-registers it whenever [`WgpuDriver::generation`] changes.

use std::sync::Arc;

use wgpu::util::DeviceExt;

use crystal_core::{Frame, RenderDriver, ResourceRegistry, Viewport, WidgetError};

use crate::batch::collect_batches;
use crate::constants::INITIAL_INSTANCE_CAPACITY;
use crate::error::RenderError;
use crate::mesh::{InstanceBuffer, MeshCache};
use crate::pipeline::{PipelineCache, create_frame_bind_group_layout};
use crate::target::RenderTarget;
use crate::uniforms::{CameraUniform, LightsUniform};
use crate::vertex::ObjectInstance;

pub struct WgpuDriver {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    format: wgpu::TextureFormat,
    camera_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pipelines: PipelineCache,
    meshes: MeshCache,
    instances: InstanceBuffer,
    instance_data: Vec<ObjectInstance>,
    target: Option<RenderTarget>,
    mounted: bool,
    generation: u64,
    frames: u64,
}

impl WgpuDriver {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>, format: wgpu::TextureFormat) -> Self {
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::cast_slice(&[LightsUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = create_frame_bind_group_layout(&device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        });

        let pipelines = PipelineCache::new(&device, format, &layout);
        let instances = InstanceBuffer::new(
            &device,
            INITIAL_INSTANCE_CAPACITY,
            std::mem::size_of::<ObjectInstance>(),
        );

        Self {
            device,
            queue,
            format,
            camera_buffer,
            lights_buffer,
            bind_group,
            pipelines,
            meshes: MeshCache::new(),
            instances,
            instance_data: Vec::new(),
            target: None,
            mounted: false,
            generation: 0,
            frames: 0,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Resolved colour texture of the surface, if there is one to show.
    pub fn target_view(&self) -> Option<&wgpu::TextureView> {
        self.target.as_ref().map(|t| t.view())
    }

    /// Surface edge in physical pixels, 0 when there is no surface.
    pub fn edge(&self) -> u32 {
        self.target.as_ref().map_or(0, |t| t.edge())
    }

    /// Bumped every time the surface texture is replaced or removed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn max_edge(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    fn replace_target(&mut self, edge: u32) {
        self.target = (edge > 0).then(|| RenderTarget::new(&self.device, self.format, edge));
        self.generation += 1;
    }
}

impl RenderDriver for WgpuDriver {
    fn mount(&mut self, viewport: Viewport) -> Result<(), WidgetError> {
        let edge = viewport.physical_edge();
        let max = self.max_edge();
        if edge > max {
            return Err(RenderError::SurfaceTooLarge { edge, max }.into());
        }

        self.replace_target(edge);
        self.mounted = true;
        tracing::debug!(
            "Mounted {}px surface at pixel ratio {}",
            edge,
            viewport.pixel_ratio
        );
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        let physical = viewport.physical_edge();
        if !self.mounted || physical == self.edge() {
            return;
        }

        let max = self.max_edge();
        let edge = if physical > max {
            tracing::warn!(
                "Surface edge {}px exceeds device limit, clamping to {}px",
                physical,
                max
            );
            max
        } else {
            physical
        };

        self.replace_target(edge);
        tracing::debug!("Resized surface to {}px", edge);
    }

    fn render_frame(&mut self, frame: &Frame<'_>) {
        if !self.mounted || frame.viewport.is_empty() {
            return;
        }
        let Some(target) = self.target.as_ref() else {
            return;
        };

        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::from_camera(frame.camera)]),
        );
        self.queue.write_buffer(
            &self.lights_buffer,
            0,
            bytemuck::cast_slice(&[LightsUniform::from_lights(frame.scene.lights())]),
        );

        let batches = collect_batches(frame, &mut self.instance_data);
        self.instances
            .write(&self.device, &self.queue, &self.instance_data);

        for batch in &batches {
            if let Some(entry) = frame.resources.geometry(batch.geometry) {
                self.meshes
                    .get_or_upload(&self.device, batch.geometry, entry);
            }
            self.pipelines.get_or_create(&self.device, batch.key);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Widget Render Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Widget Render Pass"),
                color_attachments: &[Some(target.color_attachment())],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: target.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(1, self.instances.buffer().slice(..));

            for batch in &batches {
                let (Some(pipeline), Some(mesh)) =
                    (self.pipelines.get(&batch.key), self.meshes.get(batch.geometry))
                else {
                    continue;
                };
                pass.set_pipeline(pipeline);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, batch.instances.clone());
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.frames += 1;
    }

    fn unmount(&mut self) {
        if self.target.is_some() {
            self.target = None;
            self.generation += 1;
        }
        self.mounted = false;
        tracing::debug!("Unmounted surface after {} frames", self.frames);
    }

    fn release(&mut self, resources: &ResourceRegistry) {
        let meshes = self.meshes.clear();
        self.instance_data.clear();
        tracing::debug!(
            "Released {} GPU meshes for {} geometries",
            meshes,
            resources.geometry_count()
        );
    }
}

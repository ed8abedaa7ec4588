//! GPU mesh cache.

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crystal_core::resources::{GeometryEntry, GeometryHandle};

use crate::vertex::MeshVertex;

/// GPU mesh data.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, entry: &GeometryEntry) -> Self {
        let label = entry.kind.name();
        let vertices = MeshVertex::from_mesh(&entry.mesh);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&entry.mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: entry.mesh.indices.len() as u32,
        }
    }
}

/// Meshes uploaded for the geometries of one widget, keyed by handle.
///
/// Uploads happen lazily the first time a geometry is drawn.
#[derive(Default)]
pub struct MeshCache {
    meshes: HashMap<GeometryHandle, GpuMesh>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_upload(
        &mut self,
        device: &wgpu::Device,
        handle: GeometryHandle,
        entry: &GeometryEntry,
    ) -> &GpuMesh {
        self.meshes.entry(handle).or_insert_with(|| {
            tracing::trace!("Uploading {} mesh", entry.kind.name());
            GpuMesh::upload(device, entry)
        })
    }

    pub fn get(&self, handle: GeometryHandle) -> Option<&GpuMesh> {
        self.meshes.get(&handle)
    }

    /// Drop every mesh, returning how many were released.
    pub fn clear(&mut self) -> usize {
        let count = self.meshes.len();
        self.meshes.clear();
        count
    }
}

/// Growable per-instance vertex buffer.
pub struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
}

impl InstanceBuffer {
    pub fn new(device: &wgpu::Device, capacity: usize, stride: usize) -> Self {
        Self {
            buffer: Self::allocate(device, capacity, stride),
            capacity,
        }
    }

    fn allocate(device: &wgpu::Device, capacity: usize, stride: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (capacity.max(1) * stride) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Write `data`, reallocating to the next power of two if it does not fit.
    pub fn write<T: bytemuck::Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        if data.len() > self.capacity {
            self.capacity = grown_capacity(self.capacity, data.len());
            self.buffer = Self::allocate(device, self.capacity, std::mem::size_of::<T>());
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

fn grown_capacity(current: usize, needed: usize) -> usize {
    needed.next_power_of_two().max(current)
}

//! Vertex and instance layouts.

use bytemuck::{Pod, Zeroable};

use crystal_core::resources::MeshData;

/// Mesh vertex with position and normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Interleave a CPU mesh into vertex data.
    pub fn from_mesh(mesh: &MeshData) -> Vec<MeshVertex> {
        mesh.positions
            .iter()
            .zip(&mesh.normals)
            .map(|(&position, &normal)| MeshVertex { position, normal })
            .collect()
    }
}

/// Per-object instance data: model matrix, colour and material terms.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectInstance {
    pub model: [[f32; 4]; 4],
    /// RGB and opacity.
    pub color: [f32; 4],
    /// x = metalness, y = roughness, z = clearcoat, w = iridescence.
    pub surface: [f32; 4],
    /// x = transmission, y = unlit (0 or 1), zw unused.
    pub extra: [f32; 4],
}

impl ObjectInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ObjectInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crystal_core::resources::GeometryKind;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 24);
        assert_eq!(std::mem::size_of::<ObjectInstance>(), 112);
    }

    #[test]
    fn test_from_mesh_keeps_vertex_count() {
        let mesh = GeometryKind::Octahedron { radius: 1.0 }.mesh();
        let vertices = MeshVertex::from_mesh(&mesh);
        assert_eq!(vertices.len(), mesh.vertex_count());
    }
}

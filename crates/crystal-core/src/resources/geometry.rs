//! Procedural geometry definitions and their triangle meshes.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Geometry family, including every parameter that affects the mesh.
///
/// Two equal kinds always produce the same mesh, which is what lets the
/// registry intern them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryKind {
    Tetrahedron { radius: f32 },
    Octahedron { radius: f32 },
    Icosahedron { radius: f32 },
    Sphere { radius: f32, segments: u32 },
    Circle { radius: f32, segments: u32 },
    Ring { inner: f32, outer: f32, segments: u32 },
}

impl GeometryKind {
    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Tetrahedron { .. } => "Tetrahedron",
            GeometryKind::Octahedron { .. } => "Octahedron",
            GeometryKind::Icosahedron { .. } => "Icosahedron",
            GeometryKind::Sphere { .. } => "Sphere",
            GeometryKind::Circle { .. } => "Circle",
            GeometryKind::Ring { .. } => "Ring",
        }
    }

    /// Build the triangle mesh for this kind.
    pub fn mesh(&self) -> MeshData {
        match *self {
            GeometryKind::Tetrahedron { radius } => {
                polyhedron(&TETRAHEDRON_VERTICES, &TETRAHEDRON_INDICES, radius)
            }
            GeometryKind::Octahedron { radius } => {
                polyhedron(&OCTAHEDRON_VERTICES, &OCTAHEDRON_INDICES, radius)
            }
            GeometryKind::Icosahedron { radius } => {
                polyhedron(&icosahedron_vertices(), &ICOSAHEDRON_INDICES, radius)
            }
            GeometryKind::Sphere { radius, segments } => {
                sphere(radius, segments.max(3), segments.max(2))
            }
            GeometryKind::Circle { radius, segments } => circle(radius, segments.max(3)),
            GeometryKind::Ring {
                inner,
                outer,
                segments,
            } => ring(inner, outer, segments.max(3)),
        }
    }
}

/// CPU-side triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Largest distance of any vertex from the local origin.
    pub fn bounding_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| Vec3::from(*p).length())
            .fold(0.0, f32::max)
    }
}

const TETRAHEDRON_VERTICES: [[f32; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
];

const TETRAHEDRON_INDICES: [u32; 12] = [2, 1, 0, 0, 3, 2, 1, 3, 0, 2, 3, 1];

const OCTAHEDRON_VERTICES: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

const OCTAHEDRON_INDICES: [u32; 24] = [
    0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, 1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
];

const ICOSAHEDRON_INDICES: [u32; 60] = [
    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1,
    8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
];

fn icosahedron_vertices() -> [[f32; 3]; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
}

/// Flat-shaded polyhedron: vertices projected onto the sphere of `radius`,
/// every face gets its own three vertices so edges stay crisp.
fn polyhedron(vertices: &[[f32; 3]], indices: &[u32], radius: f32) -> MeshData {
    let mut mesh = MeshData::default();

    for face in indices.chunks_exact(3) {
        let mut corners = [Vec3::ZERO; 3];
        for (corner, &index) in corners.iter_mut().zip(face) {
            *corner = Vec3::from(vertices[index as usize]).normalize() * radius;
        }

        let mut normal = (corners[1] - corners[0])
            .cross(corners[2] - corners[0])
            .normalize_or_zero();
        let centroid = (corners[0] + corners[1] + corners[2]) / 3.0;
        // Keep faces wound outward.
        if normal.dot(centroid) < 0.0 {
            corners.swap(1, 2);
            normal = -normal;
        }

        for corner in corners {
            mesh.indices.push(mesh.positions.len() as u32);
            mesh.positions.push(corner.to_array());
            mesh.normals.push(normal.to_array());
        }
    }

    mesh
}

/// UV sphere with smooth normals.
fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let normal = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.positions.push((normal * radius).to_array());
            mesh.normals.push(normal.normalize_or_zero().to_array());
        }
    }

    let row = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    mesh
}

/// Disc in the XY plane facing +Z.
fn circle(radius: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    mesh.positions.push([0.0, 0.0, 0.0]);
    mesh.normals.push([0.0, 0.0, 1.0]);

    for s in 0..=segments {
        let angle = s as f32 / segments as f32 * TAU;
        mesh.positions
            .push([radius * angle.cos(), radius * angle.sin(), 0.0]);
        mesh.normals.push([0.0, 0.0, 1.0]);
    }

    for i in 1..=segments {
        mesh.indices.extend_from_slice(&[i, i + 1, 0]);
    }

    mesh
}

/// Flat annulus in the XY plane facing +Z.
fn ring(inner: f32, outer: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for radius in [inner, outer] {
        for i in 0..=segments {
            let angle = i as f32 / segments as f32 * TAU;
            mesh.positions
                .push([radius * angle.cos(), radius * angle.sin(), 0.0]);
            mesh.normals.push([0.0, 0.0, 1.0]);
        }
    }

    for i in 0..segments {
        let a = i;
        let b = i + segments + 1;
        let c = i + segments + 2;
        let d = i + 1;
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polyhedron_face_counts() {
        assert_eq!(GeometryKind::Tetrahedron { radius: 1.0 }.mesh().triangle_count(), 4);
        assert_eq!(GeometryKind::Octahedron { radius: 1.0 }.mesh().triangle_count(), 8);
        assert_eq!(GeometryKind::Icosahedron { radius: 1.0 }.mesh().triangle_count(), 20);
    }

    #[test]
    fn test_polyhedron_vertices_on_sphere() {
        let mesh = GeometryKind::Icosahedron { radius: 0.1 }.mesh();
        for p in &mesh.positions {
            assert_relative_eq!(Vec3::from(*p).length(), 0.1, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_polyhedron_normals_point_outward() {
        let mesh = GeometryKind::Tetrahedron { radius: 2.0 }.mesh();
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!(Vec3::from(*p).dot(Vec3::from(*n)) > 0.0);
        }
    }

    #[test]
    fn test_sphere_radius_and_indices() {
        let mesh = GeometryKind::Sphere {
            radius: 2.5,
            segments: 16,
        }
        .mesh();
        assert_relative_eq!(mesh.bounding_radius(), 2.5, epsilon = 1e-5);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
        // Poles contribute a single triangle per segment.
        assert_eq!(mesh.triangle_count(), 16 * 16 * 2 - 2 * 16);
    }

    #[test]
    fn test_ring_spans_radii() {
        let mesh = GeometryKind::Ring {
            inner: 2.1,
            outer: 2.3,
            segments: 32,
        }
        .mesh();
        assert_eq!(mesh.triangle_count(), 64);
        assert_relative_eq!(mesh.bounding_radius(), 2.3, epsilon = 1e-5);
    }

    #[test]
    fn test_circle_fan() {
        let mesh = GeometryKind::Circle {
            radius: 2.0,
            segments: 32,
        }
        .mesh();
        assert_eq!(mesh.triangle_count(), 32);
        assert_eq!(mesh.positions[0], [0.0, 0.0, 0.0]);
    }
}

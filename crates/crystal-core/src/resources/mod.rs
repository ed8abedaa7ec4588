//! Geometry and material resources for one widget instance.
//!
//! Objects refer to resources through lightweight handles; the registry owns
//! the definitions. Interning means objects of the same visual family share
//! one entry, and since objects never release entries individually, dropping
//! one object can never invalidate another object's geometry or material.
//! Everything is released together when the owning widget detaches.

mod geometry;
mod material;

pub use geometry::*;
pub use material::*;

/// Handle to an interned geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(u32);

/// Handle to an interned material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(u32);

/// Interned geometry with its generated mesh.
pub struct GeometryEntry {
    pub kind: GeometryKind,
    pub mesh: MeshData,
}

/// Counts returned by [`ResourceRegistry::release_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReleaseReport {
    pub geometries: usize,
    pub materials: usize,
}

/// Owner of all geometry and material definitions of a widget.
#[derive(Default)]
pub struct ResourceRegistry {
    geometries: Vec<GeometryEntry>,
    materials: Vec<MaterialParams>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `kind`, generating its mesh on first use.
    pub fn intern_geometry(&mut self, kind: GeometryKind) -> GeometryHandle {
        if let Some(index) = self.geometries.iter().position(|g| g.kind == kind) {
            return GeometryHandle(index as u32);
        }

        let mesh = kind.mesh();
        tracing::trace!(
            "Generated {} mesh ({} vertices)",
            kind.name(),
            mesh.vertex_count()
        );
        self.geometries.push(GeometryEntry { kind, mesh });
        GeometryHandle((self.geometries.len() - 1) as u32)
    }

    /// Returns the handle for `params`, adding it on first use.
    pub fn intern_material(&mut self, params: MaterialParams) -> MaterialHandle {
        if let Some(index) = self.materials.iter().position(|m| *m == params) {
            return MaterialHandle(index as u32);
        }
        self.materials.push(params);
        MaterialHandle((self.materials.len() - 1) as u32)
    }

    pub fn geometry(&self, handle: GeometryHandle) -> Option<&GeometryEntry> {
        self.geometries.get(handle.0 as usize)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&MaterialParams> {
        self.materials.get(handle.0 as usize)
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty() && self.materials.is_empty()
    }

    /// Drops every definition. Handles issued before this call are dead.
    pub fn release_all(&mut self) -> ReleaseReport {
        let report = ReleaseReport {
            geometries: self.geometries.len(),
            materials: self.materials.len(),
        };
        self.geometries.clear();
        self.materials.clear();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_interning() {
        let mut registry = ResourceRegistry::new();
        let a = registry.intern_geometry(GeometryKind::Octahedron { radius: 0.1 });
        let b = registry.intern_geometry(GeometryKind::Tetrahedron { radius: 0.1 });
        let c = registry.intern_geometry(GeometryKind::Octahedron { radius: 0.1 });

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(registry.geometry_count(), 2);
    }

    #[test]
    fn test_material_interning() {
        let mut registry = ResourceRegistry::new();
        let a = registry.intern_material(MaterialParams::crystal([1.0, 0.0, 0.0]));
        let b = registry.intern_material(MaterialParams::crystal([1.0, 0.0, 0.0]));
        let c = registry.intern_material(MaterialParams::crystal([0.0, 1.0, 0.0]));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(registry.material_count(), 2);
    }

    #[test]
    fn test_release_all() {
        let mut registry = ResourceRegistry::new();
        let handle = registry.intern_geometry(GeometryKind::Icosahedron { radius: 1.0 });
        registry.intern_material(MaterialParams::default());

        let report = registry.release_all();
        assert_eq!(
            report,
            ReleaseReport {
                geometries: 1,
                materials: 1
            }
        );
        assert!(registry.is_empty());
        assert!(registry.geometry(handle).is_none());
        assert_eq!(registry.release_all(), ReleaseReport::default());
    }
}

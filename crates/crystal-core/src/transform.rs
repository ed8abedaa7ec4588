//! Object transform

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Mutable placement of a scene object.
///
/// Rotation is stored as XYZ Euler angles in radians and is never wrapped;
/// angles past 2π are equivalent and harmless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// World matrix (scale, then rotation, then translation).
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.to_quat(), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Transform::IDENTITY.to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn test_translation_survives_rotation() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Vec3::new(0.3, 1.2, -0.7));
        let origin = t.to_mat4().transform_point3(Vec3::ZERO);
        assert_relative_eq!(origin.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(origin.y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(origin.z, 3.0, epsilon = 1e-6);
    }
}

//! Scene lights and their closed-form motion.

use glam::Vec3;

/// Kind of light emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light from all directions.
    Ambient,
    /// Omni light at `position` fading to zero at `range` (0 = no falloff).
    Point { range: f32 },
    /// Parallel rays arriving from `position` toward the origin.
    Directional,
}

/// Plane a light orbits in, centred on the world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitPlane {
    /// `x = cos(t + φ)·r`, `y = sin(t + φ)·r`, z unchanged.
    XY,
    /// `x = sin(t + φ)·r`, `z = cos(t + φ)·r`, y unchanged.
    XZ,
}

/// Motion pattern of a light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightMotion {
    Fixed,
    Orbit {
        plane: OrbitPlane,
        radius: f32,
        phase: f32,
    },
}

impl LightMotion {
    /// Position at simulation time `time`, keeping the off-plane coordinate
    /// of `current`.
    pub fn position_at(&self, time: f32, current: Vec3) -> Vec3 {
        match *self {
            LightMotion::Fixed => current,
            LightMotion::Orbit {
                plane: OrbitPlane::XY,
                radius,
                phase,
            } => {
                let angle = time + phase;
                Vec3::new(angle.cos() * radius, angle.sin() * radius, current.z)
            }
            LightMotion::Orbit {
                plane: OrbitPlane::XZ,
                radius,
                phase,
            } => {
                let angle = time + phase;
                Vec3::new(angle.sin() * radius, current.y, angle.cos() * radius)
            }
        }
    }
}

/// A light in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSource {
    pub kind: LightKind,
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub motion: LightMotion,
}

impl LightSource {
    pub fn ambient(color: [f32; 3], intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            position: Vec3::ZERO,
            color,
            intensity,
            motion: LightMotion::Fixed,
        }
    }

    pub fn point(color: [f32; 3], intensity: f32, range: f32, position: Vec3) -> Self {
        Self {
            kind: LightKind::Point { range },
            position,
            color,
            intensity,
            motion: LightMotion::Fixed,
        }
    }

    pub fn directional(color: [f32; 3], intensity: f32, position: Vec3) -> Self {
        Self {
            kind: LightKind::Directional,
            position,
            color,
            intensity,
            motion: LightMotion::Fixed,
        }
    }

    /// Attach an orbit and snap the light onto it at time zero.
    pub fn orbiting(mut self, plane: OrbitPlane, radius: f32, phase: f32) -> Self {
        self.motion = LightMotion::Orbit {
            plane,
            radius,
            phase,
        };
        self.position = self.motion.position_at(0.0, self.position);
        self
    }

    pub fn is_moving(&self) -> bool {
        !matches!(self.motion, LightMotion::Fixed)
    }

    /// Advance the light to simulation time `time`.
    pub fn update(&mut self, time: f32) {
        self.position = self.motion.position_at(time, self.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_xy_orbit_keeps_height() {
        let mut light = LightSource::point([1.0; 3], 2.0, 50.0, Vec3::new(0.0, 0.0, 10.0))
            .orbiting(OrbitPlane::XY, 15.0, 2.0 * PI / 3.0);
        light.update(1.25);

        assert_relative_eq!(light.position.z, 10.0);
        assert_relative_eq!(light.position.truncate().length(), 15.0, epsilon = 1e-4);
    }

    #[test]
    fn test_xz_orbit_phase() {
        let light = LightSource::point([1.0; 3], 1.0, 20.0, Vec3::new(0.0, -5.0, 0.0))
            .orbiting(OrbitPlane::XZ, 5.0, PI);

        assert_relative_eq!(light.position.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(light.position.y, -5.0);
        assert_relative_eq!(light.position.z, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_fixed_light_does_not_move() {
        let mut light = LightSource::directional([1.0; 3], 1.8, Vec3::new(5.0, 3.0, 5.0));
        light.update(42.0);
        assert_eq!(light.position, Vec3::new(5.0, 3.0, 5.0));
        assert!(!light.is_moving());
    }
}

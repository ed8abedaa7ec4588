//! Perspective camera with eased depth and a damped orbit controller.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use crate::config::{CameraConfig, DepthConfig, OrbitConfig};

/// Exponential approach: `current + (target - current) * k`.
///
/// For `k` in `(0, 1)` the result lies strictly between `current` and
/// `target` (unless they are equal) and never overshoots.
pub fn approach(current: f32, target: f32, k: f32) -> f32 {
    current + (target - current) * k
}

/// Scroll-controlled camera depth.
///
/// Scroll only moves `target` (always clamped to `[min, max]`); the kernel
/// eases `actual` toward it each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthControl {
    actual: f32,
    target: f32,
    config: DepthConfig,
}

impl DepthControl {
    pub fn new(config: DepthConfig) -> Self {
        let config = config.sanitized();
        let initial = config.initial.clamp(config.min, config.max);
        Self {
            actual: initial,
            target: initial,
            config,
        }
    }

    pub fn actual(&self) -> f32 {
        self.actual
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Shift the target by `delta * wheel_gain`, clamped to the bounds.
    pub fn nudge(&mut self, delta: f32) {
        self.target =
            (self.target + delta * self.config.wheel_gain).clamp(self.config.min, self.config.max);
    }

    /// One easing step of the actual depth toward the target.
    pub fn ease(&mut self) -> f32 {
        self.actual = approach(self.actual, self.target, self.config.easing);
        self.actual
    }
}

/// Damped orbit around a fixed target.
///
/// Angular input (auto-rotation and drags) accumulates into a spherical
/// delta; each update applies a `damping` fraction of it and decays the rest,
/// so direction changes are always smoothed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitController {
    /// Azimuth around +Y, zero looking down -Z from +Z.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    radius: f32,
    delta_theta: f32,
    delta_phi: f32,
    dragging: bool,
    config: OrbitConfig,
}

impl OrbitController {
    /// Create a controller for a camera at `offset` from the target.
    pub fn new(offset: Vec3, config: OrbitConfig) -> Self {
        let config = config.sanitized();
        let radius = offset.length().max(f32::EPSILON);
        Self {
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            radius,
            delta_theta: 0.0,
            delta_phi: 0.0,
            dragging: false,
            config,
        }
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Apply a pointer drag of `(dx, dy)` pixels on a surface `edge` pixels high.
    pub fn drag(&mut self, dx: f32, dy: f32, edge: f32) {
        if edge <= 0.0 {
            return;
        }
        self.rotate_left(TAU * dx / edge * self.config.rotate_speed);
        self.rotate_up(TAU * dy / edge * self.config.rotate_speed);
    }

    /// Per-tick auto-rotation angle (one revolution per minute at speed 1
    /// and 60 ticks per second).
    pub fn auto_rotation_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.config.auto_rotate_speed
    }

    /// Advance one tick and return the camera offset from the target.
    pub fn update(&mut self) -> Vec3 {
        if self.config.auto_rotate && !self.dragging {
            self.rotate_left(self.auto_rotation_angle());
        }

        let damping = self.config.damping;
        self.theta += self.delta_theta * damping;
        self.phi += self.delta_phi * damping;
        self.phi = self
            .phi
            .clamp(self.config.min_polar, self.config.max_polar)
            .clamp(1e-6, std::f32::consts::PI - 1e-6);

        self.delta_theta *= 1.0 - damping;
        self.delta_phi *= 1.0 - damping;

        self.offset()
    }

    /// Offset of the camera from the target for the current angles.
    pub fn offset(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Perspective camera. Exactly one per widget instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    pub depth: Option<DepthControl>,
    pub orbit: Option<OrbitController>,
}

impl Camera {
    pub fn new(config: &CameraConfig, position: Vec3) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: config.fov_degrees.to_radians(),
            aspect: 1.0,
            near: config.near_plane,
            far: config.far_plane,
            depth: None,
            orbit: None,
        }
    }

    /// Let scroll input drive the camera's z through eased depth control.
    pub fn with_depth(mut self, config: DepthConfig) -> Self {
        let depth = DepthControl::new(config);
        self.position.z = depth.actual();
        self.depth = Some(depth);
        self
    }

    /// Put the camera on a damped orbit around its target.
    pub fn with_orbit(mut self, config: OrbitConfig) -> Self {
        self.orbit = Some(OrbitController::new(self.position - self.target, config));
        self
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_approach_never_overshoots() {
        let mut x = 30.0;
        for _ in 0..200 {
            let next = approach(x, 45.0, 0.1);
            assert!(next > x && next < 45.0);
            x = next;
        }
    }

    #[test]
    fn test_depth_nudge_clamps() {
        let mut depth = DepthControl::new(DepthConfig::default());
        depth.nudge(100.0);
        assert_relative_eq!(depth.target(), 31.0);

        depth.nudge(100_000.0);
        assert_relative_eq!(depth.target(), 45.0);

        depth.nudge(-100_000.0);
        assert_relative_eq!(depth.target(), 15.0);
    }

    #[test]
    fn test_depth_initial_is_clamped() {
        let depth = DepthControl::new(DepthConfig {
            initial: 100.0,
            ..DepthConfig::default()
        });
        assert_relative_eq!(depth.actual(), 45.0);
    }

    #[test]
    fn test_depth_with_inverted_bounds_never_overshoots() {
        let mut depth = DepthControl::new(DepthConfig {
            min: 45.0,
            max: 15.0,
            easing: 1.5,
            ..DepthConfig::default()
        });
        depth.nudge(1000.0);
        assert_relative_eq!(depth.target(), 40.0);

        let mut previous = depth.actual();
        for _ in 0..100 {
            let actual = depth.ease();
            assert!(actual >= previous && actual <= depth.target());
            previous = actual;
        }
    }

    #[test]
    fn test_orbit_with_inverted_polar_range_updates() {
        let mut orbit = OrbitController::new(
            Vec3::new(0.0, 0.0, 6.0),
            OrbitConfig {
                min_polar: 2.0,
                max_polar: 1.0,
                ..OrbitConfig::default()
            },
        );
        orbit.drag(0.0, 5_000.0, 400.0);
        for _ in 0..50 {
            orbit.update();
        }
        assert!(orbit.phi() >= 1.0 - 1e-6 && orbit.phi() <= 2.0 + 1e-6);
    }

    #[test]
    fn test_orbit_initial_angles() {
        let orbit = OrbitController::new(Vec3::new(0.0, 0.0, 6.0), OrbitConfig::default());
        assert_relative_eq!(orbit.theta(), 0.0);
        assert_relative_eq!(orbit.phi(), PI / 2.0, epsilon = 1e-6);
        assert_relative_eq!(orbit.offset().z, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_orbit_auto_rotates_and_keeps_radius() {
        let mut orbit = OrbitController::new(Vec3::new(0.0, 0.0, 6.0), OrbitConfig::default());
        let mut previous = orbit.theta();
        for _ in 0..100 {
            let offset = orbit.update();
            assert_relative_eq!(offset.length(), 6.0, epsilon = 1e-4);
            assert!(orbit.theta() < previous);
            previous = orbit.theta();
        }
    }

    #[test]
    fn test_orbit_drag_is_damped_and_polar_clamped() {
        let config = OrbitConfig {
            auto_rotate: false,
            ..OrbitConfig::default()
        };
        let mut orbit = OrbitController::new(Vec3::new(0.0, 0.0, 6.0), config);
        orbit.drag(0.0, 10_000.0, 400.0);

        let first = orbit.update();
        assert!(first.y > 0.0);
        for _ in 0..500 {
            orbit.update();
        }
        assert!(orbit.phi() >= config.min_polar - 1e-6);
        assert!(orbit.phi() <= config.max_polar + 1e-6);
    }

    #[test]
    fn test_aspect_rejects_degenerate_values() {
        let mut camera = Camera::new(&CameraConfig::default(), Vec3::new(0.0, 0.0, 6.0));
        camera.set_aspect(0.0);
        camera.set_aspect(f32::NAN);
        assert_relative_eq!(camera.aspect(), 1.0);
    }
}

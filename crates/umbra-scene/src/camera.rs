//! Orbit camera.

use umbra_math::{Mat4, Vec3};
use umbra_types::constants::EPSILON;

/// Relative camera controls consumed by the scene's input handlers.
pub trait Camera {
    /// Orbits by `dx` degrees of yaw and `dy` degrees of pitch.
    fn rotate(&mut self, dx: f32, dy: f32);

    /// Moves along the camera's right, up and backward axes.
    fn translate(&mut self, dx: f32, dy: f32, dz: f32);

    fn view_matrix(&self) -> Mat4;

    fn eye(&self) -> Vec3;
}

/// Yaw/pitch orbit around a target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    target: Vec3,
    up: Vec3,
    distance: f32,
    /// Radians around `up`, zero looking down -Z.
    yaw: f32,
    /// Radians above the horizon.
    pitch: f32,
}

/// Keeps the view direction away from `up`.
const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

impl OrbitCamera {
    /// Places the camera at `eye` looking at `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(EPSILON);
        let dir = offset / distance;
        Self {
            target,
            up: up.normalize_or_zero(),
            distance,
            yaw: dir.x.atan2(dir.z),
            pitch: dir.y.clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH),
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Unit vector from the target to the eye.
    fn offset_dir(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp)
    }
}

impl Camera for OrbitCamera {
    fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(-MAX_PITCH, MAX_PITCH);
    }

    fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        let back = self.offset_dir();
        let right = self.up.cross(back).normalize_or_zero();
        let up = back.cross(right);
        self.target += right * dx + up * dy + back * dz;
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, self.up)
    }

    fn eye(&self) -> Vec3 {
        self.target + self.offset_dir() * self.distance
    }
}

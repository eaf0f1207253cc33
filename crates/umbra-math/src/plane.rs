//! Plane frames for receivers and planar reflection.
//!
//! A receiving plane is a quad in the local XZ plane facing local -Y,
//! placed in the world by an affine transform `P`. Mirroring geometry
//! through that plane is `P · S(1, -1, 1) · P⁻¹`.

use glam::{Mat4, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// The world placement of a planar receiver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneFrame {
    transform: Mat4,
    inverse: Mat4,
}

impl PlaneFrame {
    /// Creates a frame from an affine world transform.
    pub fn new(transform: Mat4) -> Self {
        let mut inverse = transform.inverse();
        // Affine inverse: keep the projective row clean.
        inverse.x_axis.w = 0.0;
        inverse.y_axis.w = 0.0;
        inverse.z_axis.w = 0.0;
        inverse.w_axis.w = 1.0;
        Self { transform, inverse }
    }

    /// Frame built as `T(translation) · S(scale) · R_z(alpha)`.
    pub fn tilted(translation: Vec3, scale: f32, alpha: f32) -> Self {
        let t = Mat4::from_translation(translation);
        let s = Mat4::from_scale(Vec3::splat(scale));
        let r = Mat4::from_rotation_z(alpha);
        Self::new(t * s * r)
    }

    /// Frame built as `R(angle about axis) · T(translation)`.
    pub fn rotated_then_translated(axis: Vec3, angle: f32, translation: Vec3) -> Self {
        let r = Mat4::from_quat(Quat::from_axis_angle(axis.normalize(), angle));
        Self::new(r * Mat4::from_translation(translation))
    }

    /// Local-to-world transform.
    #[inline]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// World-to-local transform.
    #[inline]
    pub fn inverse(&self) -> Mat4 {
        self.inverse
    }

    /// Transform that mirrors world geometry through this plane.
    pub fn reflection(&self) -> Mat4 {
        self.transform * Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0)) * self.inverse
    }

    /// Maps a point in plane coordinates to world space.
    pub fn point(&self, local: Vec3) -> Vec3 {
        (self.transform * local.extend(1.0)).truncate()
    }

    /// Maps a direction in plane coordinates to world space (no translation).
    pub fn direction(&self, local: Vec3) -> Vec3 {
        (self.transform * Vec4::new(local.x, local.y, local.z, 0.0)).truncate()
    }
}

impl Default for PlaneFrame {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

//! Rendering constants and scene defaults.

/// Default shadow-volume extrusion factor `k` in `w = v + (v - L) * k`.
pub const DEFAULT_EXTRUSION_FACTOR: f32 = 2.0;

/// Ambient intensity used during the ambient pass.
pub const AMBIENT_PASS_AMBIENT: [f32; 3] = [0.1, 0.1, 0.1];

/// Diffuse intensity used during the lit pass.
pub const LIT_PASS_DIFFUSE: [f32; 3] = [0.9, 0.9, 0.9];

/// Specular intensity used during the lit pass.
pub const LIT_PASS_SPECULAR: [f32; 3] = [0.3, 0.3, 0.3];

/// Color of the translucent receiver overlay drawn over the reflection.
pub const RECEIVER_OVERLAY_COLOR: [f32; 4] = [0.7, 0.7, 0.7, 0.85];

/// Backdrop color during the ambient pass.
pub const WALL_AMBIENT_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

/// Backdrop color during the lit pass.
pub const WALL_LIT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Tilt of the ground plane around Z, in degrees.
pub const DEFAULT_PLANE_ALPHA_DEG: f32 = 65.0;

/// Mouse sensitivity applied to camera rotation.
pub const MOUSE_SENSITIVITY: f32 = 0.2;

/// Key step applied to camera translation.
pub const KEY_STEP: f32 = 0.25;

/// Rate at which the animation phase advances per second.
pub const ANIMATION_RATE: f32 = 0.3;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-6;

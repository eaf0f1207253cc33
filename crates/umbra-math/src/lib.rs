//! # umbra-math
//!
//! Linear algebra primitives for umbra.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Mat4`, etc.)
//! - [`PlaneFrame`], a receiving-plane basis with its planar reflection

pub mod plane;

// Re-export glam types as the canonical math types for umbra.
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
pub use plane::PlaneFrame;

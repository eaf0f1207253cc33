//! The graphics-state surface the renderer drives.
//!
//! `GraphicsContext` is an immediate-mode, fixed-function style API:
//! state setters, a transform stack, a state stack and two kinds of draw.
//! Implementations decide what a draw means. The only one shipped is the
//! headless [`RecordingContext`](crate::recording::RecordingContext).

use umbra_math::Mat4;

use crate::state::{
    BlendFunc, ClearFlags, CompareFunc, CullMode, FrontFace, LightSetup, StencilOp,
};

/// Geometry submitted by a single draw.
#[derive(Debug, Clone, Copy)]
pub struct Geometry<'a> {
    /// Debug label identifying what is being drawn.
    pub label: &'a str,
    /// Flat `[x, y, z, ...]` vertex positions.
    pub positions: &'a [f32],
    /// Flat per-vertex normals, same layout as `positions`.
    pub normals: Option<&'a [f32]>,
    /// Triangle list indices. `None` draws `positions` as a triangle soup.
    pub indices: Option<&'a [u32]>,
}

impl<'a> Geometry<'a> {
    /// Indexed triangle list with normals.
    pub fn indexed(label: &'a str, positions: &'a [f32], normals: &'a [f32], indices: &'a [u32]) -> Self {
        Self {
            label,
            positions,
            normals: Some(normals),
            indices: Some(indices),
        }
    }

    /// Unindexed triangle soup without normals.
    pub fn soup(label: &'a str, positions: &'a [f32]) -> Self {
        Self {
            label,
            positions,
            normals: None,
            indices: None,
        }
    }

    /// Number of triangles this draw rasterizes.
    pub fn triangle_count(&self) -> usize {
        match self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 9,
        }
    }
}

/// Graphics pipeline driven by the shadow renderer.
///
/// Calls are applied in order. Popping an empty stack is a precondition
/// violation.
pub trait GraphicsContext {
    fn clear(&mut self, flags: ClearFlags);

    fn set_depth_test(&mut self, enabled: bool);
    fn set_depth_write(&mut self, enabled: bool);
    fn set_depth_func(&mut self, func: CompareFunc);

    fn set_stencil_test(&mut self, enabled: bool);
    fn set_stencil_func(&mut self, func: CompareFunc, reference: u32, mask: u32);
    /// Ops for stencil fail, depth fail and depth pass.
    fn set_stencil_op(&mut self, stencil_fail: StencilOp, depth_fail: StencilOp, depth_pass: StencilOp);
    fn set_stencil_write_mask(&mut self, mask: u32);

    fn set_color_write(&mut self, enabled: bool);
    fn set_cull_mode(&mut self, mode: CullMode);
    fn set_front_face(&mut self, face: FrontFace);
    /// `None` disables blending.
    fn set_blend(&mut self, blend: Option<BlendFunc>);
    /// `None` disables lighting.
    fn set_lighting(&mut self, light: Option<LightSetup>);
    fn set_color(&mut self, rgba: [f32; 4]);

    fn set_camera(&mut self, view: Mat4, projection: Mat4);

    /// Multiplies `m` onto the current model transform after saving it.
    fn push_transform(&mut self, m: Mat4);
    fn pop_transform(&mut self);

    /// Saves the whole pipeline state.
    fn push_state(&mut self);
    fn pop_state(&mut self);

    fn draw(&mut self, geometry: Geometry<'_>);
}

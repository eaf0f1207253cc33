//! Fixed-function pipeline state.
//!
//! Plain value types describing depth, stencil, culling, blending and
//! lighting. A [`PipelineState`] snapshot is attached to every draw the
//! [`RecordingContext`](crate::recording::RecordingContext) records.

use serde::{Deserialize, Serialize};
use umbra_math::Vec3;

/// Comparison used by the depth and stencil tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// Stencil buffer update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    /// Add one, saturating at the maximum value.
    IncrementClamp,
    /// Subtract one, saturating at zero.
    DecrementClamp,
    Invert,
}

/// Which faces are discarded. `None` disables culling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullMode {
    None,
    Front,
    Back,
}

/// Winding that counts as front-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrontFace {
    Ccw,
    Cw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

/// Source and destination blend factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlendFunc {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl BlendFunc {
    /// Standard transparency.
    pub const ALPHA: Self = Self {
        src: BlendFactor::SrcAlpha,
        dst: BlendFactor::OneMinusSrcAlpha,
    };

    /// Light accumulation.
    pub const ADDITIVE: Self = Self {
        src: BlendFactor::One,
        dst: BlendFactor::One,
    };

    /// Used to visualize raw shadow volumes.
    pub const TRANSLUCENT_VOLUME: Self = Self {
        src: BlendFactor::OneMinusSrcAlpha,
        dst: BlendFactor::One,
    };
}

/// Stencil comparison: passes when `(reference & mask) func (stored & mask)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StencilFunc {
    pub func: CompareFunc,
    pub reference: u32,
    pub mask: u32,
}

/// Stencil updates for (stencil fail, depth fail, depth pass).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StencilOps {
    pub stencil_fail: StencilOp,
    pub depth_fail: StencilOp,
    pub depth_pass: StencilOp,
}

impl StencilOps {
    pub const KEEP: Self = Self::on_pass(StencilOp::Keep);

    /// Keep on both failures, `op` when both tests pass.
    pub const fn on_pass(op: StencilOp) -> Self {
        Self {
            stencil_fail: StencilOp::Keep,
            depth_fail: StencilOp::Keep,
            depth_pass: op,
        }
    }
}

/// A single point light with per-term intensities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSetup {
    pub position: Vec3,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

/// Buffers cleared by a clear command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClearFlags {
    pub color: bool,
    pub depth: bool,
    pub stencil: bool,
}

impl ClearFlags {
    pub const DEPTH_STENCIL: Self = Self {
        color: false,
        depth: true,
        stencil: true,
    };

    pub const STENCIL: Self = Self {
        color: false,
        depth: false,
        stencil: true,
    };
}

/// Complete snapshot of the pipeline state.
///
/// Defaults follow the usual fixed-function defaults: depth and stencil
/// tests off, depth writes on, culling off, counter-clockwise front faces,
/// no blending, no lighting, opaque white.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    pub depth_test: bool,
    pub depth_write: bool,
    pub depth_func: CompareFunc,
    pub stencil_test: bool,
    pub stencil_func: StencilFunc,
    pub stencil_ops: StencilOps,
    pub stencil_write_mask: u32,
    pub color_write: bool,
    pub cull: CullMode,
    pub front_face: FrontFace,
    pub blend: Option<BlendFunc>,
    pub lighting: Option<LightSetup>,
    pub color: [f32; 4],
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            depth_test: false,
            depth_write: true,
            depth_func: CompareFunc::Less,
            stencil_test: false,
            stencil_func: StencilFunc {
                func: CompareFunc::Always,
                reference: 0,
                mask: !0,
            },
            stencil_ops: StencilOps::KEEP,
            stencil_write_mask: !0,
            color_write: true,
            cull: CullMode::None,
            front_face: FrontFace::Ccw,
            blend: None,
            lighting: None,
            color: [1.0; 4],
        }
    }
}

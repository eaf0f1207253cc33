//! # umbra-render
//!
//! Stencil shadow-volume rendering against an abstract graphics context.
//!
//! ## Key Types
//!
//! - [`GraphicsContext`] — the pipeline surface the renderer drives.
//! - [`RecordingContext`] — headless context that records draws with their state.
//! - [`StencilShadowRenderer`] — the five-stage per-frame draw sequence.
//! - [`ShadowMesh`] — a drawable mesh that owns its shadow volume.
//! - [`JsonTraceExporter`] — writes recorded frames to JSON.

pub mod config;
pub mod context;
pub mod drawable;
pub mod json_exporter;
pub mod recording;
pub mod renderer;
pub mod shadow_mesh;
pub mod state;

pub use config::{DebugFlags, RenderConfig};
pub use context::{Geometry, GraphicsContext};
pub use drawable::{Drawable, ShadowCaster};
pub use json_exporter::JsonTraceExporter;
pub use recording::{DrawRecord, FrameRecord, GfxCommand, RecordingContext};
pub use renderer::{FrameContext, ShadowScene, Stage, StageObserver, StencilShadowRenderer};
pub use shadow_mesh::ShadowMesh;
pub use state::{
    BlendFactor, BlendFunc, ClearFlags, CompareFunc, CullMode, FrontFace, LightSetup,
    PipelineState, StencilFunc, StencilOp, StencilOps,
};

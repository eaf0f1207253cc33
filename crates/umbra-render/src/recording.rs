//! Headless graphics context that records what it is asked to do.
//!
//! Nothing is rasterized. Every clear, stack operation and draw is kept
//! in order, and each draw carries the full [`PipelineState`] and model
//! transform it was issued under, so a frame can be inspected or exported
//! after the fact.

use serde::{Deserialize, Serialize};
use umbra_math::Mat4;

use crate::context::{Geometry, GraphicsContext};
use crate::state::{
    BlendFunc, ClearFlags, CompareFunc, CullMode, FrontFace, LightSetup, PipelineState,
    StencilFunc, StencilOp, StencilOps,
};

/// One draw call as the pipeline saw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub label: String,
    pub triangles: usize,
    pub indexed: bool,
    pub state: PipelineState,
    pub model: Mat4,
}

/// Structural commands, in issue order. State setters are folded into
/// the snapshot attached to each draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GfxCommand {
    Clear(ClearFlags),
    PushState,
    PopState,
    PushTransform,
    PopTransform,
    /// Index into the frame's draw list.
    Draw(usize),
}

/// Everything recorded between two [`RecordingContext::take_frame`] calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub commands: Vec<GfxCommand>,
    pub draws: Vec<DrawRecord>,
}

impl FrameRecord {
    /// Draws whose label is `label`, in order.
    pub fn draws_labelled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a DrawRecord> + 'a {
        self.draws.iter().filter(move |d| d.label == label)
    }

    /// Total triangles submitted this frame.
    pub fn triangle_count(&self) -> usize {
        self.draws.iter().map(|d| d.triangles).sum()
    }
}

/// Headless [`GraphicsContext`].
#[derive(Debug)]
pub struct RecordingContext {
    state: PipelineState,
    state_stack: Vec<PipelineState>,
    transforms: Vec<Mat4>,
    view: Mat4,
    projection: Mat4,
    frame: FrameRecord,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self {
            state: PipelineState::default(),
            state_stack: Vec::new(),
            transforms: vec![Mat4::IDENTITY],
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            frame: FrameRecord::default(),
        }
    }

    /// Current pipeline state.
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Current model transform.
    pub fn model(&self) -> Mat4 {
        *self.transforms.last().unwrap_or(&Mat4::IDENTITY)
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Number of saved pipeline states.
    pub fn state_depth(&self) -> usize {
        self.state_stack.len()
    }

    /// Number of saved transforms.
    pub fn transform_depth(&self) -> usize {
        self.transforms.len() - 1
    }

    /// The frame recorded so far.
    pub fn frame(&self) -> &FrameRecord {
        &self.frame
    }

    /// Returns the frame recorded so far and starts a new one.
    ///
    /// Pipeline state carries over, like a real context's would.
    pub fn take_frame(&mut self) -> FrameRecord {
        std::mem::take(&mut self.frame)
    }
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsContext for RecordingContext {
    fn clear(&mut self, flags: ClearFlags) {
        self.frame.commands.push(GfxCommand::Clear(flags));
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.state.depth_test = enabled;
    }

    fn set_depth_write(&mut self, enabled: bool) {
        self.state.depth_write = enabled;
    }

    fn set_depth_func(&mut self, func: CompareFunc) {
        self.state.depth_func = func;
    }

    fn set_stencil_test(&mut self, enabled: bool) {
        self.state.stencil_test = enabled;
    }

    fn set_stencil_func(&mut self, func: CompareFunc, reference: u32, mask: u32) {
        self.state.stencil_func = StencilFunc {
            func,
            reference,
            mask,
        };
    }

    fn set_stencil_op(&mut self, stencil_fail: StencilOp, depth_fail: StencilOp, depth_pass: StencilOp) {
        self.state.stencil_ops = StencilOps {
            stencil_fail,
            depth_fail,
            depth_pass,
        };
    }

    fn set_stencil_write_mask(&mut self, mask: u32) {
        self.state.stencil_write_mask = mask;
    }

    fn set_color_write(&mut self, enabled: bool) {
        self.state.color_write = enabled;
    }

    fn set_cull_mode(&mut self, mode: CullMode) {
        self.state.cull = mode;
    }

    fn set_front_face(&mut self, face: FrontFace) {
        self.state.front_face = face;
    }

    fn set_blend(&mut self, blend: Option<BlendFunc>) {
        self.state.blend = blend;
    }

    fn set_lighting(&mut self, light: Option<LightSetup>) {
        self.state.lighting = light;
    }

    fn set_color(&mut self, rgba: [f32; 4]) {
        self.state.color = rgba;
    }

    fn set_camera(&mut self, view: Mat4, projection: Mat4) {
        self.view = view;
        self.projection = projection;
    }

    fn push_transform(&mut self, m: Mat4) {
        let current = self.model();
        self.transforms.push(current * m);
        self.frame.commands.push(GfxCommand::PushTransform);
    }

    fn pop_transform(&mut self) {
        assert!(self.transforms.len() > 1, "pop_transform without matching push_transform");
        self.transforms.pop();
        self.frame.commands.push(GfxCommand::PopTransform);
    }

    fn push_state(&mut self) {
        self.state_stack.push(self.state);
        self.frame.commands.push(GfxCommand::PushState);
    }

    fn pop_state(&mut self) {
        let Some(saved) = self.state_stack.pop() else {
            panic!("pop_state without matching push_state");
        };
        self.state = saved;
        self.frame.commands.push(GfxCommand::PopState);
    }

    fn draw(&mut self, geometry: Geometry<'_>) {
        let index = self.frame.draws.len();
        self.frame.draws.push(DrawRecord {
            label: geometry.label.to_string(),
            triangles: geometry.triangle_count(),
            indexed: geometry.indices.is_some(),
            state: self.state,
            model: self.model(),
        });
        self.frame.commands.push(GfxCommand::Draw(index));
        tracing::trace!(label = geometry.label, triangles = geometry.triangle_count(), "draw");
    }
}

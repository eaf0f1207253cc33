//! Stencil shadow-volume renderer.
//!
//! Each frame runs five stages in a fixed order against a
//! [`GraphicsContext`]:
//!
//! 1. **Mask** — write stencil 1 wherever the ground receiver is visible.
//! 2. **Reflection** — draw the caster mirrored through the ground plane,
//!    clipped to the mask.
//! 3. **Receiver overlay** — blend the translucent ground over the
//!    reflection.
//! 4. **Ambient** — draw the caster and the wall with ambient light only.
//! 5. **Shadow volume** — count volume faces into a cleared stencil
//!    (increment front, decrement back), then add diffuse and specular
//!    light where the count is zero.
//!
//! Optional debug draws of the raw volume follow stage 5.
//!
//! The caster's volume must already be built for the frame's light; the
//! renderer only draws it.

use serde::{Deserialize, Serialize};
use umbra_math::{Mat4, PlaneFrame, Vec3};
use umbra_types::UmbraResult;

use crate::config::RenderConfig;
use crate::context::GraphicsContext;
use crate::drawable::{Drawable, ShadowCaster};
use crate::state::{BlendFunc, ClearFlags, CompareFunc, CullMode, FrontFace, LightSetup, StencilOp};

/// Per-frame inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// World-space light position.
    pub light: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
    /// Seconds since the previous frame.
    pub dt: f32,
}

/// What a frame draws.
pub struct ShadowScene<'a> {
    /// Receiver the reflection is clipped to.
    pub ground: &'a dyn Drawable,
    /// World frame of the ground plane, used to mirror the caster.
    pub ground_frame: PlaneFrame,
    /// Backdrop that receives the shadow.
    pub wall: &'a dyn Drawable,
    pub caster: &'a dyn ShadowCaster,
}

/// Render stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Mask,
    Reflection,
    ReceiverOverlay,
    Ambient,
    ShadowVolume,
    DebugVolumes,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Mask,
        Stage::Reflection,
        Stage::ReceiverOverlay,
        Stage::Ambient,
        Stage::ShadowVolume,
        Stage::DebugVolumes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Mask => "mask",
            Stage::Reflection => "reflection",
            Stage::ReceiverOverlay => "receiver_overlay",
            Stage::Ambient => "ambient",
            Stage::ShadowVolume => "shadow_volume",
            Stage::DebugVolumes => "debug_volumes",
        }
    }
}

/// Notified after each stage completes.
///
/// `()` is the no-op observer.
pub trait StageObserver {
    fn stage_complete(&mut self, stage: Stage);
}

impl StageObserver for () {
    fn stage_complete(&mut self, _stage: Stage) {}
}

/// Draws a frame with stencil shadow volumes.
#[derive(Debug, Clone)]
pub struct StencilShadowRenderer {
    config: RenderConfig,
}

impl StencilShadowRenderer {
    /// Creates a renderer, rejecting an invalid configuration.
    pub fn new(config: RenderConfig) -> UmbraResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// One-time context setup: depth test on, back faces culled, CCW front.
    pub fn init(&self, ctx: &mut dyn GraphicsContext) {
        ctx.set_depth_test(true);
        ctx.set_cull_mode(CullMode::Back);
        ctx.set_front_face(FrontFace::Ccw);
    }

    /// Renders one frame.
    pub fn render_frame(&self, ctx: &mut dyn GraphicsContext, frame: &FrameContext, scene: &ShadowScene<'_>) {
        self.render_frame_observed(ctx, frame, scene, &mut ());
    }

    /// Renders one frame, reporting each finished stage to `observer`.
    pub fn render_frame_observed(
        &self,
        ctx: &mut dyn GraphicsContext,
        frame: &FrameContext,
        scene: &ShadowScene<'_>,
        observer: &mut dyn StageObserver,
    ) {
        ctx.set_camera(frame.view, frame.projection);

        self.mask_pass(ctx, scene);
        observer.stage_complete(Stage::Mask);

        self.reflection_pass(ctx, scene);
        observer.stage_complete(Stage::Reflection);

        self.receiver_overlay(ctx, scene);
        observer.stage_complete(Stage::ReceiverOverlay);

        self.ambient_pass(ctx, frame, scene);
        observer.stage_complete(Stage::Ambient);

        self.shadow_pass(ctx, frame, scene);
        observer.stage_complete(Stage::ShadowVolume);

        self.debug_volumes(ctx, scene);
        observer.stage_complete(Stage::DebugVolumes);

        tracing::trace!(
            volume_triangles = scene.caster.volume_triangles(),
            "frame rendered"
        );
    }

    fn mask_pass(&self, ctx: &mut dyn GraphicsContext, scene: &ShadowScene<'_>) {
        ctx.clear(ClearFlags::DEPTH_STENCIL);
        ctx.set_depth_test(false);
        ctx.set_stencil_test(true);
        ctx.set_stencil_func(CompareFunc::Always, 1, 1);
        ctx.set_stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Replace);
        ctx.set_cull_mode(CullMode::Back);
        ctx.set_color_write(false);
        ctx.set_front_face(FrontFace::Ccw);
        scene.ground.draw(ctx);
    }

    fn reflection_pass(&self, ctx: &mut dyn GraphicsContext, scene: &ShadowScene<'_>) {
        ctx.set_depth_test(true);
        ctx.set_color_write(true);
        ctx.set_stencil_func(CompareFunc::Equal, 1, 1);
        ctx.set_stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Keep);

        // Mirroring flips handedness, so the front winding flips with it.
        ctx.push_transform(scene.ground_frame.reflection());
        ctx.set_front_face(FrontFace::Cw);
        if self.config.debug.draw_object {
            scene.caster.draw(ctx);
        }
        ctx.pop_transform();
        ctx.set_front_face(FrontFace::Ccw);
    }

    fn receiver_overlay(&self, ctx: &mut dyn GraphicsContext, scene: &ShadowScene<'_>) {
        ctx.set_stencil_test(false);
        ctx.set_blend(Some(BlendFunc::ALPHA));
        ctx.set_color(self.config.receiver_color);
        ctx.set_cull_mode(CullMode::None);
        scene.ground.draw(ctx);
        ctx.set_blend(None);
    }

    fn ambient_pass(&self, ctx: &mut dyn GraphicsContext, frame: &FrameContext, scene: &ShadowScene<'_>) {
        ctx.set_lighting(Some(self.ambient_light(frame.light)));
        if self.config.debug.draw_object {
            scene.caster.draw(ctx);
        }
        ctx.set_color(self.config.wall_ambient_color);
        scene.wall.draw(ctx);
    }

    fn shadow_pass(&self, ctx: &mut dyn GraphicsContext, frame: &FrameContext, scene: &ShadowScene<'_>) {
        ctx.push_state();

        ctx.clear(ClearFlags::STENCIL);
        ctx.set_depth_write(false);
        ctx.set_color_write(false);
        ctx.set_cull_mode(CullMode::Back);
        ctx.set_stencil_test(true);
        ctx.set_stencil_write_mask(!0);
        ctx.set_stencil_func(CompareFunc::Always, 0, !0);

        ctx.set_cull_mode(CullMode::Back);
        ctx.set_stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::IncrementClamp);
        scene.caster.draw_volume(ctx, CullMode::Back, false);

        ctx.set_cull_mode(CullMode::Front);
        ctx.set_stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::DecrementClamp);
        scene.caster.draw_volume(ctx, CullMode::Front, false);

        // Light only where no volume face was counted.
        ctx.set_stencil_func(CompareFunc::Equal, 0, !0);
        ctx.set_stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Keep);
        ctx.set_depth_func(CompareFunc::LessEqual);
        ctx.set_color_write(true);
        ctx.set_depth_write(true);
        ctx.set_cull_mode(CullMode::Back);
        ctx.set_blend(Some(BlendFunc::ADDITIVE));
        ctx.set_lighting(Some(self.lit_light(frame.light)));

        if self.config.debug.draw_object {
            scene.caster.draw(ctx);
        }
        ctx.set_color(self.config.wall_lit_color);
        scene.wall.draw(ctx);
        ctx.set_blend(None);

        ctx.pop_state();
    }

    fn debug_volumes(&self, ctx: &mut dyn GraphicsContext, scene: &ShadowScene<'_>) {
        let debug = self.config.debug;
        if debug.draw_back_volumes {
            scene.caster.draw_volume(ctx, CullMode::Front, true);
        }
        if debug.draw_front_volumes {
            scene.caster.draw_volume(ctx, CullMode::Back, true);
        }
    }

    fn ambient_light(&self, position: Vec3) -> LightSetup {
        LightSetup {
            position,
            ambient: self.config.ambient,
            diffuse: [0.0; 3],
            specular: [0.0; 3],
        }
    }

    fn lit_light(&self, position: Vec3) -> LightSetup {
        LightSetup {
            position,
            ambient: [0.0; 3],
            diffuse: self.config.diffuse,
            specular: self.config.specular,
        }
    }
}

//! Per-frame orchestration.
//!
//! A frame, in order:
//!
//! 1. measure `dt` and advance the scene clock,
//! 2. move the light along its orbit and rebuild the caster's volumes,
//! 3. pose the caster toward the animated target on the ground plane,
//! 4. render the five stencil stages,
//! 5. update the caster and advance the animation phase.
//!
//! Each step is reported on the scene's [`EventBus`].

use std::time::Instant;

use umbra_math::{Mat4, Vec3, Vec4};
use umbra_render::{
    FrameContext, GraphicsContext, RenderConfig, ShadowCaster, ShadowScene, Stage, StageObserver,
    StencilShadowRenderer,
};
use umbra_telemetry::{EventBus, EventKind, FrameEvent};
use umbra_types::constants::{ANIMATION_RATE, KEY_STEP, MOUSE_SENSITIVITY};
use umbra_types::{UmbraError, UmbraResult};

use crate::camera::{Camera, OrbitCamera};
use crate::config::SceneConfig;
use crate::group::{Articulated, MeshGroup};
use crate::plane::Plane;

/// Reports finished render stages as telemetry.
struct BusObserver<'a> {
    bus: &'a EventBus,
    frame: u64,
}

impl StageObserver for BusObserver<'_> {
    fn stage_complete(&mut self, stage: Stage) {
        self.bus.emit(FrameEvent::new(
            self.frame,
            EventKind::StageComplete {
                stage: stage.name().to_string(),
            },
        ));
    }
}

pub struct Scene {
    config: SceneConfig,
    renderer: StencilShadowRenderer,
    camera: OrbitCamera,
    ground: Plane,
    wall: Plane,
    object: MeshGroup,
    ratio: f32,
    projection: Mat4,
    /// Seconds of scene time.
    elapsed: f32,
    /// Animation phase driving the resolve target.
    phase: f32,
    light: Vec3,
    frame: u64,
    last_time: Instant,
    bus: EventBus,
}

impl Scene {
    pub fn new(config: SceneConfig, render: RenderConfig, object: MeshGroup) -> UmbraResult<Self> {
        config.validate()?;
        let renderer = StencilShadowRenderer::new(render)?;
        let camera = OrbitCamera::look_at(
            Vec3::from(config.camera.eye),
            Vec3::from(config.camera.target),
            Vec3::from(config.camera.up),
        );
        let ratio = config.aspect_ratio();
        let mut scene = Self {
            ground: Plane::ground(config.plane_alpha),
            wall: Plane::wall(),
            light: config.light.position(0.0),
            projection: Mat4::IDENTITY,
            config,
            renderer,
            camera,
            object,
            ratio,
            elapsed: 0.0,
            phase: 0.0,
            frame: 0,
            last_time: Instant::now(),
            bus: EventBus::new(),
        };
        scene.update_projection();
        Ok(scene)
    }

    /// One-time context setup and initial volumes.
    pub fn init(&mut self, ctx: &mut dyn GraphicsContext) {
        self.renderer.init(ctx);
        self.object.create_volume(self.light);
        self.last_time = Instant::now();
    }

    /// Renders a frame timed by the wall clock.
    pub fn draw(&mut self, ctx: &mut dyn GraphicsContext) -> FrameContext {
        let now = Instant::now();
        let dt = now.duration_since(self.last_time).as_secs_f32();
        self.last_time = now;
        self.step(ctx, dt)
    }

    /// Renders a frame `dt` seconds after the previous one.
    pub fn step(&mut self, ctx: &mut dyn GraphicsContext, dt: f32) -> FrameContext {
        let started = Instant::now();
        let frame = self.frame;
        self.bus
            .emit(FrameEvent::new(frame, EventKind::FrameBegin { dt: f64::from(dt) }));

        self.elapsed += dt;
        self.light = self.config.light.position(self.elapsed);
        let triangles = self.object.create_volume(self.light);
        self.bus.emit(FrameEvent::new(
            frame,
            EventKind::VolumeBuilt {
                triangles: triangles as u32,
                light: self.light.to_array(),
            },
        ));

        let (target, normal) = self.resolve_target();
        self.object.resolve(target, normal);

        let frame_ctx = FrameContext {
            light: self.light,
            view: self.camera.view_matrix(),
            projection: self.projection,
            dt,
        };
        let shadow_scene = ShadowScene {
            ground: &self.ground,
            ground_frame: self.ground.frame(),
            wall: &self.wall,
            caster: &self.object,
        };
        let mut observer = BusObserver {
            bus: &self.bus,
            frame,
        };
        self.renderer
            .render_frame_observed(ctx, &frame_ctx, &shadow_scene, &mut observer);

        self.object.update(dt);
        self.phase += dt * ANIMATION_RATE;

        self.bus.emit(FrameEvent::new(
            frame,
            EventKind::FrameEnd {
                wall_time: started.elapsed().as_secs_f64(),
            },
        ));
        self.bus.flush();
        self.frame += 1;

        tracing::trace!(frame, dt, triangles, "frame complete");
        frame_ctx
    }

    /// Point on the ground the caster reaches for, and the ground normal,
    /// both in world space.
    pub fn resolve_target(&self) -> (Vec3, Vec3) {
        let x = self.phase;
        let p = self.ground.frame().transform();
        let local = Vec4::new((x * 7.0).sin() * (x / 3.0).cos(), 0.0, (x * 5.0).cos(), 1.0);
        let target = (p * local).truncate();
        let normal = (p * Vec4::new(0.0, -1.0, 0.0, 0.0)).truncate();
        (target, normal)
    }

    /// Sets the vertical field of view in degrees. Out-of-range values
    /// are rejected and leave the projection unchanged.
    pub fn set_fovy(&mut self, fovy: f32) -> UmbraResult<()> {
        self.apply_config(SceneConfig {
            fovy,
            ..self.config.clone()
        })
    }

    /// Sets the near clip distance; it must stay in `(0, far)`.
    pub fn set_near(&mut self, near: f32) -> UmbraResult<()> {
        self.apply_config(SceneConfig {
            near,
            ..self.config.clone()
        })
    }

    pub fn set_ratio(&mut self, ratio: f32) -> UmbraResult<()> {
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(UmbraError::InvalidConfig(format!(
                "aspect ratio must be positive, got {ratio}"
            )));
        }
        self.ratio = ratio;
        self.update_projection();
        Ok(())
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) -> UmbraResult<()> {
        self.apply_config(SceneConfig {
            screen_size: [width, height],
            ..self.config.clone()
        })?;
        self.set_ratio(self.config.aspect_ratio())
    }

    fn apply_config(&mut self, config: SceneConfig) -> UmbraResult<()> {
        config.validate()?;
        self.config = config;
        self.update_projection();
        Ok(())
    }

    /// Mouse drag in pixels.
    pub fn mouse_move(&mut self, dx: f32, dy: f32) {
        self.camera
            .rotate(-dx * MOUSE_SENSITIVITY, -dy * MOUSE_SENSITIVITY);
    }

    /// Key movement in camera axes.
    pub fn key_pressed(&mut self, mv: Vec3) {
        let step = mv * KEY_STEP;
        self.camera.translate(step.x, step.y, step.z);
    }

    fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh_gl(
            self.config.fovy.to_radians(),
            self.ratio,
            self.config.near,
            self.config.far,
        );
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn light(&self) -> Vec3 {
        self.light
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn object(&self) -> &MeshGroup {
        &self.object
    }

    pub fn ground(&self) -> &Plane {
        &self.ground
    }

    pub fn wall(&self) -> &Plane {
        &self.wall
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }
}

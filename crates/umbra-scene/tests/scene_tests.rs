//! Integration tests for umbra-scene.

use umbra_math::{Mat4, Vec3};
use umbra_mesh::generators::unit_cube;
use umbra_render::{
    Drawable, GraphicsContext, RecordingContext, RenderConfig, ShadowCaster, ShadowMesh,
};
use umbra_scene::{Articulated, Camera, LightOrbit, MeshGroup, OrbitCamera, Plane, Scene, SceneConfig};
use umbra_telemetry::{EventKind, VecSink};
use umbra_types::UmbraError;

fn cube_group() -> MeshGroup {
    MeshGroup::new(vec![ShadowMesh::new("cube", unit_cube(0.5))])
}

fn make_scene() -> Scene {
    Scene::new(SceneConfig::default(), RenderConfig::default(), cube_group()).unwrap()
}

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config_valid() {
    let config = SceneConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.plane_alpha, 65.0);
    assert!((config.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
}

#[test]
fn config_toml_roundtrip() {
    let config = SceneConfig {
        fovy: 60.0,
        light: LightOrbit {
            radius: 1.0,
            height: 3.0,
            angular_speed: 0.5,
            phase: 0.0,
        },
        ..Default::default()
    };
    let text = config.to_toml_string().unwrap();
    assert_eq!(SceneConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn partial_toml_uses_defaults() {
    let config = SceneConfig::from_toml_str("far = 50.0\n[light]\nheight = 4.0\n").unwrap();
    assert_eq!(config.far, 50.0);
    assert_eq!(config.light.height, 4.0);
    assert_eq!(config.light.radius, 0.5);
    assert_eq!(config.camera.eye, [2.0, 1.0, 5.0]);
}

#[test]
fn invalid_configs_rejected() {
    let cases = [
        SceneConfig {
            fovy: 0.0,
            ..Default::default()
        },
        SceneConfig {
            near: 10.0,
            far: 5.0,
            ..Default::default()
        },
        SceneConfig {
            screen_size: [640, 0],
            ..Default::default()
        },
        SceneConfig {
            light: LightOrbit {
                radius: -1.0,
                ..Default::default()
            },
            ..Default::default()
        },
    ];
    for config in cases {
        assert!(matches!(config.validate(), Err(UmbraError::InvalidConfig(_))), "{config:?}");
    }
    assert!(Scene::new(
        SceneConfig {
            fovy: 200.0,
            ..Default::default()
        },
        RenderConfig::default(),
        cube_group()
    )
    .is_err());
}

#[test]
fn render_keys_are_not_scene_keys() {
    let render_toml = RenderConfig::default().to_toml_string().unwrap();
    assert!(SceneConfig::from_toml_str(&render_toml).is_err());
    assert!(SceneConfig::from_toml_str("[light]\nspeed = 1.0").is_err());
}

#[test]
fn light_orbit_positions() {
    let orbit = LightOrbit::default();
    assert!(close(orbit.position(0.0), Vec3::new(0.1f32.sin() * 0.5, 0.1f32.cos() * 0.5, 2.0)));
    let t1 = orbit.position(1.0);
    assert!(close(t1, Vec3::new(0.2f32.sin() * 0.5, 0.2f32.cos() * 0.5, 2.0)));

    let unphased = LightOrbit {
        phase: 0.0,
        ..orbit
    };
    assert!(close(unphased.position(0.0), Vec3::new(0.0, 0.5, 2.0)));
    // Stays on the circle.
    let p = orbit.position(37.0);
    assert!((Vec3::new(p.x, p.y, 0.0).length() - 0.5).abs() < 1e-5);
}

// ─── Plane Tests ──────────────────────────────────────────────

#[test]
fn ground_faces_tilted_down() {
    let ground = Plane::ground(65.0);
    let a = 65f32.to_radians();
    assert!(close(ground.normal(), Vec3::new(a.sin(), -a.cos(), 0.0)));
    assert!(close(ground.frame().point(Vec3::ZERO), Vec3::new(-1.25, 0.7, 0.05)));
    assert_eq!(ground.label(), "ground");
}

#[test]
fn wall_faces_camera() {
    let wall = Plane::wall();
    assert!(close(wall.normal(), Vec3::Z));
    assert!(close(wall.frame().point(Vec3::ZERO), Vec3::new(0.0, 0.0, -3.0)));
}

#[test]
fn plane_draws_under_its_transform() {
    let wall = Plane::wall();
    let mut ctx = RecordingContext::new();
    wall.draw(&mut ctx);
    let frame = ctx.take_frame();
    assert_eq!(frame.draws.len(), 1);
    assert_eq!(frame.draws[0].label, "wall");
    assert_eq!(frame.draws[0].triangles, 2);
    assert_eq!(frame.draws[0].model, wall.frame().transform());
    assert_eq!(ctx.transform_depth(), 0);
}

// ─── Camera Tests ─────────────────────────────────────────────

#[test]
fn camera_reconstructs_eye() {
    let camera = OrbitCamera::look_at(Vec3::new(2.0, 1.0, 5.0), Vec3::ZERO, Vec3::Y);
    assert!(close(camera.eye(), Vec3::new(2.0, 1.0, 5.0)));
    let expected = Mat4::look_at_rh(Vec3::new(2.0, 1.0, 5.0), Vec3::ZERO, Vec3::Y);
    assert!(camera.view_matrix().abs_diff_eq(expected, 1e-4));
}

#[test]
fn camera_rotation_keeps_distance() {
    let mut camera = OrbitCamera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    camera.rotate(90.0, 0.0);
    assert!(close(camera.eye(), Vec3::new(5.0, 0.0, 0.0)));
    camera.rotate(0.0, 500.0);
    assert!((camera.eye().length() - 5.0).abs() < 1e-4);
    assert!(camera.eye().y < 5.0, "pitch is clamped short of the pole");
}

#[test]
fn camera_translation_moves_target() {
    let mut camera = OrbitCamera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    camera.translate(1.0, 0.0, 0.0);
    assert!(close(camera.target(), Vec3::X));
    camera.translate(0.0, 2.0, 1.0);
    assert!(close(camera.target(), Vec3::new(1.0, 2.0, 1.0)));
    assert!(close(camera.eye(), Vec3::new(1.0, 2.0, 6.0)));
}

// ─── MeshGroup Tests ──────────────────────────────────────────

#[test]
fn group_sums_parts() {
    let mut group = MeshGroup::new(vec![
        ShadowMesh::new("a", unit_cube(1.0)),
        ShadowMesh::new("b", unit_cube(2.0)),
    ]);
    let triangles = group.create_volume(Vec3::new(0.0, 5.0, 0.0));
    assert_eq!(triangles, 16);
    assert_eq!(group.volume_triangles(), 16);

    let mut ctx = RecordingContext::new();
    group.draw(&mut ctx);
    group.draw_volume(&mut ctx, umbra_render::CullMode::Back, false);
    let labels: Vec<String> = ctx.take_frame().draws.into_iter().map(|d| d.label).collect();
    assert_eq!(labels, vec!["a", "b", "a/volume", "b/volume"]);
}

#[test]
fn group_records_pose_and_clock() {
    let mut group = cube_group();
    assert!(group.target().is_none());
    group.resolve(Vec3::X, Vec3::NEG_Y);
    group.update(0.25);
    group.update(0.5);
    assert_eq!(group.target(), Some((Vec3::X, Vec3::NEG_Y)));
    assert_eq!(group.clock(), 0.75);
}

#[test]
fn group_loads_parts_from_files() {
    let dir = std::env::temp_dir();
    let paths: Vec<_> = ["upper", "lower"]
        .iter()
        .map(|name| dir.join(format!("umbra-scene-{}-{name}.mesh", std::process::id())))
        .collect();
    for path in &paths {
        umbra_io::save_mesh(&unit_cube(1.0), path).unwrap();
    }
    let group = MeshGroup::load(&paths, 3.0).unwrap();
    for path in &paths {
        std::fs::remove_file(path).ok();
    }
    assert_eq!(group.parts().len(), 2);
    assert_eq!(group.parts()[0].builder().extrusion_factor, 3.0);
}

#[test]
fn group_load_fails_on_missing_part() {
    let result = MeshGroup::load(&["/nonexistent/umbra/part.mesh"], 2.0);
    assert!(matches!(result, Err(UmbraError::Io(_))));
}

// ─── Scene Tests ──────────────────────────────────────────────

#[test]
fn init_builds_initial_volume() {
    let mut scene = make_scene();
    let mut ctx = RecordingContext::new();
    scene.init(&mut ctx);
    assert!(scene.object().volume_triangles() > 0);
    assert!(ctx.state().depth_test);
    assert!(close(scene.light(), Vec3::new(0.1f32.sin() * 0.5, 0.1f32.cos() * 0.5, 2.0)));
}

#[test]
fn step_advances_clock_light_and_phase() {
    let mut scene = make_scene();
    let mut ctx = RecordingContext::new();
    scene.init(&mut ctx);

    let frame = scene.step(&mut ctx, 1.0);
    assert_eq!(scene.frame_count(), 1);
    assert!(close(frame.light, LightOrbit::default().position(1.0)));
    assert_eq!(scene.light(), frame.light);
    assert_eq!(frame.dt, 1.0);
    assert!((scene.phase() - 0.3).abs() < 1e-6);
    assert_eq!(scene.object().clock(), 1.0);

    scene.step(&mut ctx, 0.5);
    assert!((scene.phase() - 0.45).abs() < 1e-6);
    assert_eq!(scene.frame_count(), 2);
}

#[test]
fn resolve_uses_phase_before_advancing() {
    let mut scene = make_scene();
    let mut ctx = RecordingContext::new();
    let ground = scene.ground().frame();
    scene.step(&mut ctx, 0.1);

    let (target, normal) = scene.object().target().unwrap();
    // Phase 0 puts the target at local (0, 0, 1) on the ground.
    assert_eq!(target, ground.point(Vec3::Z));
    assert_eq!(normal, scene.ground().normal());
}

#[test]
fn frame_draws_ground_caster_wall_and_volumes() {
    let mut scene = make_scene();
    let mut ctx = RecordingContext::new();
    scene.init(&mut ctx);
    scene.step(&mut ctx, 0.016);
    let frame = ctx.take_frame();

    assert_eq!(frame.draws_labelled("ground").count(), 2);
    assert_eq!(frame.draws_labelled("wall").count(), 2);
    assert_eq!(frame.draws_labelled("cube").count(), 3);
    assert_eq!(frame.draws_labelled("cube/volume").count(), 2);

    let ground = frame.draws_labelled("ground").next().unwrap();
    assert_eq!(ground.model, scene.ground().frame().transform());
    let reflected = frame.draws_labelled("cube").next().unwrap();
    assert_eq!(reflected.model, scene.ground().frame().reflection());
    assert_eq!(ctx.view(), scene.camera().view_matrix());
}

#[test]
fn telemetry_reports_each_frame() {
    let mut scene = make_scene();
    let sink = VecSink::new();
    scene.bus_mut().add_sink(Box::new(sink.clone()));
    let mut ctx = RecordingContext::new();
    scene.step(&mut ctx, 0.02);
    scene.step(&mut ctx, 0.02);

    let events = sink.events();
    assert_eq!(events.len(), 2 * 9);
    assert!(matches!(events[0].kind, EventKind::FrameBegin { .. }));
    assert!(matches!(events[1].kind, EventKind::VolumeBuilt { triangles, .. } if triangles > 0));
    let stages: Vec<&str> = events[2..8]
        .iter()
        .map(|e| match &e.kind {
            EventKind::StageComplete { stage } => stage.as_str(),
            other => panic!("expected a stage event, got {other:?}"),
        })
        .collect();
    assert_eq!(
        stages,
        vec!["mask", "reflection", "receiver_overlay", "ambient", "shadow_volume", "debug_volumes"]
    );
    assert!(matches!(events[8].kind, EventKind::FrameEnd { .. }));
    assert_eq!(events[9].frame, 1);
}

#[test]
fn screen_size_updates_projection() {
    let mut scene = make_scene();
    scene.set_screen_size(1000, 500).unwrap();
    assert_eq!(scene.ratio(), 2.0);
    let expected = Mat4::perspective_rh_gl(45f32.to_radians(), 2.0, 0.1, 100.0);
    assert_eq!(scene.projection(), expected);

    scene.set_fovy(60.0).unwrap();
    scene.set_near(1.0).unwrap();
    let expected = Mat4::perspective_rh_gl(60f32.to_radians(), 2.0, 1.0, 100.0);
    assert_eq!(scene.projection(), expected);
    assert_eq!(scene.config().fovy, 60.0);
}

#[test]
fn invalid_projection_settings_rejected() {
    let mut scene = make_scene();
    let before = scene.projection();

    for near in [0.0, -1.0, 100.0, 250.0] {
        assert!(matches!(scene.set_near(near), Err(UmbraError::InvalidConfig(_))), "{near}");
    }
    for fovy in [0.0, 180.0, f32::NAN] {
        assert!(scene.set_fovy(fovy).is_err(), "{fovy}");
    }
    assert!(scene.set_ratio(0.0).is_err());
    assert!(scene.set_screen_size(640, 0).is_err());

    assert_eq!(scene.projection(), before);
    assert_eq!(scene.config().near, 0.1);
    assert_eq!(scene.config().fovy, 45.0);
    assert_eq!(scene.config().screen_size, [800, 600]);
}

#[test]
fn input_moves_camera() {
    let mut scene = make_scene();
    let start_eye = scene.camera().eye();
    let start_target = scene.camera().target();

    scene.key_pressed(Vec3::new(1.0, 0.0, 0.0));
    let moved = scene.camera().target() - start_target;
    assert!((moved.length() - 0.25).abs() < 1e-5);

    scene.mouse_move(10.0, 0.0);
    let eye = scene.camera().eye();
    assert!(!close(eye - moved, start_eye));
    assert!((scene.camera().distance() - start_eye.length()).abs() < 1e-4);
}

#[test]
fn wall_clock_draw_runs() {
    let mut scene = make_scene();
    let mut ctx = RecordingContext::new();
    scene.init(&mut ctx);
    let frame = scene.draw(&mut ctx);
    assert!(frame.dt >= 0.0);
    assert_eq!(scene.frame_count(), 1);
    // GraphicsContext is object-safe for the scene's callers.
    let _: &mut dyn GraphicsContext = &mut ctx;
}

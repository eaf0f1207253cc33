//! CLI command implementations.

use serde::Serialize;
use umbra_math::Vec3;
use umbra_mesh::{FaceNormalCache, MeshTopology};
use umbra_render::{DrawRecord, JsonTraceExporter, RecordingContext, RenderConfig};
use umbra_scene::{MeshGroup, Scene, SceneConfig};
use umbra_shadow::{ShadowVolume, ShadowVolumeBuilder};
use umbra_telemetry::{EventKind, TracingSink, VecSink};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Parses `x,y,z`.
pub fn parse_light(text: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got {text:?}"));
    }
    let mut xyz = [0.0f32; 3];
    for (slot, part) in xyz.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("cannot parse {part:?} as a coordinate"))?;
    }
    Ok(Vec3::from(xyz))
}

/// Loads a text mesh, or a JSON-serialized topology for `.json` paths.
fn load_any_mesh(path: &str) -> Result<MeshTopology, Box<dyn std::error::Error>> {
    if path.ends_with(".json") {
        let content = std::fs::read_to_string(path)?;
        let mesh: MeshTopology = serde_json::from_str(&content)?;
        mesh.validate()?;
        Ok(mesh)
    } else {
        Ok(umbra_io::load_mesh(path)?)
    }
}

/// Load a mesh and print its topology.
pub fn inspect(path: &str) -> CommandResult {
    println!("Umbra Mesh Inspector");
    println!("────────────────────");
    println!();

    let mesh = load_any_mesh(path)?;

    println!("Vertices:     {}", mesh.vertex_count());
    println!("Corners:      {}", mesh.corner_count());
    println!("Triangles:    {}", mesh.triangle_count());
    println!("Edges:        {}", mesh.edge_count());
    println!("  interior:   {}", mesh.interior_edge_count());
    println!("  boundary:   {}", mesh.boundary_edge_count());
    println!("Closed:       {}", if mesh.is_closed() { "yes" } else { "no" });

    if mesh.vertex_count() > 0 {
        let (min, max) = mesh.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), &v| (lo.min(v), hi.max(v)),
        );
        println!(
            "Bounds:       [{:.3}, {:.3}, {:.3}] – [{:.3}, {:.3}, {:.3}]",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    Ok(())
}

#[derive(Serialize)]
struct VolumeExport {
    light: [f32; 3],
    extrusion_factor: f32,
    silhouette_edges: Vec<u32>,
    triangle_count: usize,
    positions: Vec<f32>,
}

/// Build a shadow volume and print or export it.
pub fn volume(path: &str, light: &str, extrusion: f32, output_path: Option<&str>) -> CommandResult {
    println!("Umbra Shadow Volume");
    println!("═══════════════════");
    println!();

    let light = parse_light(light)?;
    if !(extrusion.is_finite() && extrusion > 0.0) {
        return Err(format!("extrusion factor must be positive, got {extrusion}").into());
    }

    let mesh = load_any_mesh(path)?;
    let normals = FaceNormalCache::compute(&mesh);
    let builder = ShadowVolumeBuilder::new(extrusion);
    let mut volume = ShadowVolume::for_mesh(&mesh);

    let silhouettes = builder.silhouette_edges(&mesh, &normals, light);
    let triangles = builder.build(&mesh, &normals, light, &mut volume);

    println!("Light:            [{:.3}, {:.3}, {:.3}]", light.x, light.y, light.z);
    println!("Extrusion:        {extrusion}");
    println!("Interior edges:   {}", mesh.interior_edge_count());
    println!("Silhouette edges: {}", silhouettes.len());
    println!("Volume triangles: {triangles} (capacity {})", volume.capacity_triangles());
    if mesh.boundary_edge_count() > 0 {
        println!(
            "Note: {} boundary edges are not extruded; the volume is open.",
            mesh.boundary_edge_count()
        );
    }

    if let Some(path) = output_path {
        let export = VolumeExport {
            light: light.to_array(),
            extrusion_factor: extrusion,
            silhouette_edges: silhouettes.iter().map(|e| e.0).collect(),
            triangle_count: triangles,
            positions: volume.as_slice().to_vec(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&export)?)?;
        println!();
        println!("Volume written to: {path}");
    }

    Ok(())
}

fn describe(draw: &DrawRecord) -> String {
    let s = &draw.state;
    let stencil = if s.stencil_test {
        format!(
            "{:?}({}, {:#x}) {:?}",
            s.stencil_func.func, s.stencil_func.reference, s.stencil_func.mask, s.stencil_ops.depth_pass
        )
    } else {
        "off".to_string()
    };
    let blend = match s.blend {
        Some(b) => format!("{:?}/{:?}", b.src, b.dst),
        None => "off".to_string(),
    };
    format!(
        "{:<16} {:>6} tris  cull {:<5?} front {:<3?} color {:<5} depth-write {:<5} stencil {:<34} blend {}",
        draw.label, draw.triangles, s.cull, s.front_face, s.color_write, s.depth_write, stencil, blend
    )
}

/// Render frames headlessly and print the draw sequence of the last one.
pub fn render(
    meshes: &[String],
    config_path: Option<&str>,
    scene_path: Option<&str>,
    frames: u32,
    dt: f32,
    trace_path: Option<&str>,
) -> CommandResult {
    println!("Umbra Headless Render");
    println!("═════════════════════");
    println!();

    let render_config = match config_path {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    let scene_config = match scene_path {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    let object = MeshGroup::load(meshes, render_config.extrusion_factor)?;
    for part in object.parts() {
        println!(
            "Part: {} ({} verts, {} tris, {} edges)",
            part.name(),
            part.topology().vertex_count(),
            part.topology().triangle_count(),
            part.topology().edge_count(),
        );
    }
    println!();

    let mut scene = Scene::new(scene_config, render_config, object)?;
    let events = VecSink::new();
    scene.bus_mut().add_sink(Box::new(events.clone()));
    scene
        .bus_mut()
        .add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));

    let mut ctx = RecordingContext::new();
    scene.init(&mut ctx);
    ctx.take_frame();

    let mut exporter = trace_path.map(JsonTraceExporter::new);
    let mut last = None;
    for _ in 0..frames {
        let frame = scene.step(&mut ctx, dt);
        let record = ctx.take_frame();
        if let Some(exporter) = exporter.as_mut() {
            exporter.submit_frame(&frame, record.clone());
        }
        last = Some((frame, record));
    }
    scene.bus_mut().finalize();

    let Some((frame, record)) = last else {
        println!("No frames rendered.");
        return Ok(());
    };

    let volume_triangles: u64 = events
        .events()
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::VolumeBuilt { triangles, .. } => Some(u64::from(triangles)),
            _ => None,
        })
        .sum();

    println!("Frames:           {frames}");
    println!(
        "Light (last):     [{:.3}, {:.3}, {:.3}]",
        frame.light.x, frame.light.y, frame.light.z
    );
    println!("Volume triangles: {volume_triangles} total");
    println!("Draws per frame:  {}", record.draws.len());
    println!();
    println!("Last frame draw sequence:");
    for draw in &record.draws {
        println!("  {}", describe(draw));
    }

    if let (Some(exporter), Some(path)) = (exporter.as_mut(), trace_path) {
        exporter.finalize()?;
        println!();
        println!("Trace written to: {path}");
    }

    Ok(())
}

/// Validate a mesh or config.
pub fn validate(path: &str) -> CommandResult {
    println!("Umbra Validator");
    println!("───────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let content = std::fs::read_to_string(path)?;
        match (
            RenderConfig::from_toml_str(&content),
            SceneConfig::from_toml_str(&content),
        ) {
            (Ok(_), _) => println!("✅ Render config is valid."),
            (_, Ok(_)) => println!("✅ Scene config is valid."),
            (Err(render), Err(scene)) => {
                println!("❌ Not a valid render config: {render}");
                println!("❌ Not a valid scene config: {scene}");
            }
        }
    } else {
        println!("Validating mesh: {path}");
        match load_any_mesh(path) {
            Ok(mesh) => println!(
                "✅ Mesh is valid ({} verts, {} tris, {} edges).",
                mesh.vertex_count(),
                mesh.triangle_count(),
                mesh.edge_count()
            ),
            Err(e) => println!("❌ Mesh validation failed: {e}"),
        }
    }

    Ok(())
}

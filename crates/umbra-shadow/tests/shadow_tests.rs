//! Integration tests for umbra-shadow.

use umbra_math::Vec3;
use umbra_mesh::generators::{quad, unit_cube};
use umbra_mesh::{FaceNormalCache, MeshTopology};
use umbra_shadow::{edge_alignment, EdgeAlignment, ShadowVolume, ShadowVolumeBuilder};

fn build(mesh: &MeshTopology, light: Vec3) -> ShadowVolume {
    let normals = FaceNormalCache::compute(mesh);
    let mut volume = ShadowVolume::for_mesh(mesh);
    ShadowVolumeBuilder::default().build(mesh, &normals, light, &mut volume);
    volume
}

fn geometric_normal([a, b, c]: [Vec3; 3]) -> Vec3 {
    (b - a).cross(c - a)
}

// ─── Classification Tests ─────────────────────────────────────

#[test]
fn opposite_signs_are_silhouette() {
    assert!(EdgeAlignment { d1: -1.0, d2: 2.0 }.is_silhouette());
    assert!(EdgeAlignment { d1: 0.5, d2: -0.1 }.is_silhouette());
    assert!(!EdgeAlignment { d1: 1.0, d2: 2.0 }.is_silhouette());
    assert!(!EdgeAlignment { d1: -1.0, d2: -2.0 }.is_silhouette());
}

#[test]
fn zero_product_is_never_silhouette() {
    assert!(!EdgeAlignment { d1: 0.0, d2: -1.0 }.is_silhouette());
    assert!(!EdgeAlignment { d1: 1.0, d2: 0.0 }.is_silhouette());
    assert!(!EdgeAlignment { d1: 0.0, d2: 0.0 }.is_silhouette());
}

#[test]
fn boundary_edge_has_no_alignment() {
    let q = quad(1.0, 1.0);
    let normals = FaceNormalCache::compute(&q);
    let boundary = q.edges.iter().find(|e| !e.is_interior()).unwrap();
    assert!(edge_alignment(&q, &normals, boundary, Vec3::Y).is_none());
}

// ─── Builder Tests ────────────────────────────────────────────

#[test]
fn cube_lit_from_above_has_four_silhouette_edges() {
    let cube = unit_cube(1.0);
    let normals = FaceNormalCache::compute(&cube);
    let light = Vec3::new(0.0, 5.0, 0.0);

    let builder = ShadowVolumeBuilder::default();
    let silhouettes = builder.silhouette_edges(&cube, &normals, light);
    assert_eq!(silhouettes.len(), 4);

    // Only the rim of the top face.
    for id in &silhouettes {
        let edge = &cube.edges[id.index()];
        assert_eq!(cube.position(edge.v0 as usize).y, 0.5);
        assert_eq!(cube.position(edge.v1 as usize).y, 0.5);
    }

    let mut volume = ShadowVolume::for_mesh(&cube);
    let triangles = builder.build(&cube, &normals, light, &mut volume);
    assert_eq!(triangles, 8);
    assert_eq!(volume.triangle_count(), 8);
    assert_eq!(volume.vertex_count(), 24);
    assert_eq!(volume.as_slice().len(), 8 * 9);
}

#[test]
fn triangle_count_is_twice_silhouette_count() {
    let cube = unit_cube(1.0);
    let normals = FaceNormalCache::compute(&cube);
    let builder = ShadowVolumeBuilder::default();
    let mut volume = ShadowVolume::for_mesh(&cube);

    for light in [
        Vec3::new(0.0, 5.0, 0.0),
        Vec3::new(3.0, 4.0, 1.0),
        Vec3::new(-2.0, 0.3, 7.0),
        Vec3::new(0.2, -6.0, -0.1),
    ] {
        let silhouettes = builder.silhouette_edges(&cube, &normals, light);
        let triangles = builder.build(&cube, &normals, light, &mut volume);
        assert_eq!(triangles, 2 * silhouettes.len(), "light {light:?}");
        assert!(triangles <= volume.capacity_triangles());
    }
}

#[test]
fn light_on_bisecting_plane_is_excluded() {
    let cube = unit_cube(1.0);
    let normals = FaceNormalCache::compute(&cube);
    // Level with the +X face: that face's dot is exactly zero on every
    // edge it shares, so those edges are not silhouettes.
    let light = Vec3::new(0.5, 5.0, 0.0);
    let silhouettes = ShadowVolumeBuilder::default().silhouette_edges(&cube, &normals, light);
    assert_eq!(silhouettes.len(), 3);
    for id in &silhouettes {
        let edge = &cube.edges[id.index()];
        let on_plus_x = cube.position(edge.v0 as usize).x == 0.5
            && cube.position(edge.v1 as usize).x == 0.5;
        assert!(!on_plus_x);
    }
}

#[test]
fn extruded_vertices_lie_on_light_rays() {
    let cube = unit_cube(1.0);
    let light = Vec3::new(1.0, 4.0, -2.0);
    let volume = build(&cube, light);
    let k = ShadowVolumeBuilder::default().extrusion_factor;

    let originals: Vec<Vec3> = cube.vertices.clone();
    for [a, b, c] in volume.triangles() {
        for p in [a, b, c] {
            if originals.contains(&p) {
                continue;
            }
            // p = v + (v - L) * k for one of the mesh vertices.
            let found = originals
                .iter()
                .any(|&v| (v + (v - light) * k - p).length() < 1e-5);
            assert!(found, "{p:?} is not an extrusion of a mesh vertex");
        }
    }
}

#[test]
fn volume_faces_point_outward() {
    let cube = unit_cube(1.0);
    let volume = build(&cube, Vec3::new(0.0, 5.0, 0.0));
    for tri in volume.triangles() {
        let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
        let radial = Vec3::new(centroid.x, 0.0, centroid.z);
        assert!(geometric_normal(tri).dot(radial) > 0.0, "{tri:?}");
    }
}

#[test]
fn swapping_edge_triangles_flips_winding() {
    let cube = unit_cube(1.0);
    let mut swapped = cube.clone();
    swapped.edges = cube.edges.iter().map(|e| e.with_swapped_triangles()).collect();

    let light = Vec3::new(2.0, 3.0, 1.5);
    let normals = FaceNormalCache::compute(&cube);
    let builder = ShadowVolumeBuilder::default();
    assert_eq!(
        builder.silhouette_edges(&cube, &normals, light),
        builder.silhouette_edges(&swapped, &normals, light)
    );

    let original = build(&cube, light);
    let flipped = build(&swapped, light);
    assert_eq!(original.triangle_count(), flipped.triangle_count());
    for (a, b) in original.triangles().zip(flipped.triangles()) {
        assert_eq!(a, [b[2], b[1], b[0]]);
    }
}

#[test]
fn rebuild_is_byte_identical() {
    let cube = unit_cube(1.5);
    let normals = FaceNormalCache::compute(&cube);
    let builder = ShadowVolumeBuilder::new(3.0);
    let light = Vec3::new(-1.0, 2.5, 0.75);

    let mut volume = ShadowVolume::for_mesh(&cube);
    builder.build(&cube, &normals, light, &mut volume);
    let first = volume.as_slice().to_vec();

    // A different light in between must leave no trace.
    builder.build(&cube, &normals, Vec3::new(0.0, -9.0, 0.0), &mut volume);
    builder.build(&cube, &normals, light, &mut volume);
    let second: Vec<u32> = volume.as_slice().iter().map(|f| f.to_bits()).collect();
    let first: Vec<u32> = first.iter().map(|f| f.to_bits()).collect();
    assert_eq!(first, second);
}

#[test]
fn open_mesh_skips_boundary_edges() {
    let mut q = quad(2.0, 2.0);
    // Fold the quad along its diagonal: corners 0 and 2 are shared, so
    // corners 1 and 3 alone set each triangle's facing.
    q.corners[0].normal = Vec3::ZERO;
    q.corners[2].normal = Vec3::ZERO;
    q.corners[1].normal = Vec3::Y;
    q.corners[3].normal = Vec3::NEG_Y;

    let volume = build(&q, Vec3::new(0.0, 5.0, 0.0));
    // Only the diagonal is extruded; the four rim edges have no second face.
    assert_eq!(volume.triangle_count(), 2);
    assert_eq!(volume.capacity_triangles(), 2);
}

#[test]
fn flat_quad_casts_nothing() {
    let volume = build(&quad(2.0, 2.0), Vec3::new(0.3, 5.0, 0.1));
    assert!(volume.is_empty());
}

#[test]
fn extrusion_factor_scales_far_cap() {
    let cube = unit_cube(1.0);
    let light = Vec3::new(0.0, 5.0, 0.0);
    let normals = FaceNormalCache::compute(&cube);
    let mut near = ShadowVolume::for_mesh(&cube);
    let mut far = ShadowVolume::for_mesh(&cube);
    ShadowVolumeBuilder::new(1.0).build(&cube, &normals, light, &mut near);
    ShadowVolumeBuilder::new(10.0).build(&cube, &normals, light, &mut far);

    let lowest = |v: &ShadowVolume| v.triangles().flatten().map(|p| p.y).fold(f32::MAX, f32::min);
    // Top rim at y = 0.5 is 4.5 below the light.
    assert!((lowest(&near) - (0.5 - 4.5)).abs() < 1e-5);
    assert!((lowest(&far) - (0.5 - 45.0)).abs() < 1e-4);
}

// ─── ShadowVolume Tests ───────────────────────────────────────

#[test]
fn capacity_covers_every_interior_edge() {
    let cube = unit_cube(1.0);
    let volume = ShadowVolume::for_mesh(&cube);
    assert_eq!(volume.capacity_triangles(), 2 * cube.interior_edge_count());
    assert!(volume.is_empty());
    assert!(volume.as_slice().is_empty());
}

#[test]
fn clear_resets_used_length() {
    let mut volume = build(&unit_cube(1.0), Vec3::new(0.0, 5.0, 0.0));
    assert!(!volume.is_empty());
    volume.clear();
    assert_eq!(volume.triangle_count(), 0);
    assert_eq!(volume.capacity_triangles(), 36);
}

#[test]
#[should_panic(expected = "shadow volume overflow")]
fn undersized_volume_panics() {
    let cube = unit_cube(1.0);
    let normals = FaceNormalCache::compute(&cube);
    let mut volume = ShadowVolume::with_capacity(1);
    ShadowVolumeBuilder::default().build(&cube, &normals, Vec3::new(0.0, 5.0, 0.0), &mut volume);
}

#[test]
fn builder_config_serializes() {
    let builder: ShadowVolumeBuilder = serde_json::from_str(r#"{"extrusion_factor": 4.0}"#).unwrap();
    assert_eq!(builder, ShadowVolumeBuilder::new(4.0));
    assert_eq!(ShadowVolumeBuilder::default().extrusion_factor, 2.0);
}

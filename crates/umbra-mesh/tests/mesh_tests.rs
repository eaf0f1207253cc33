//! Integration tests for umbra-mesh.

use umbra_math::Vec3;
use umbra_mesh::generators::{quad, unit_cube};
use umbra_mesh::{Corner, Edge, EdgeTable, FaceNormalCache, MeshTopology};

// ─── MeshTopology Tests ───────────────────────────────────────

fn make_single_triangle() -> MeshTopology {
    MeshTopology {
        vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        corners: vec![
            Corner { vertex: 0, normal: Vec3::Z },
            Corner { vertex: 1, normal: Vec3::Z },
            Corner { vertex: 2, normal: Vec3::Z },
        ],
        indices: vec![0, 1, 2],
        edges: vec![
            Edge::boundary(0, 1, 0),
            Edge::boundary(1, 2, 0),
            Edge::boundary(2, 0, 0),
        ],
    }
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.corner_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.edge_count(), 3);
}

#[test]
fn triangle_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.triangle(0), [0, 1, 2]);
    assert_eq!(mesh.triangle_vertices(0), [0, 1, 2]);
}

#[test]
fn validate_ok() {
    assert!(make_single_triangle().validate().is_ok());
}

#[test]
fn validate_catches_oob_corner_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_corner_vertex() {
    let mut mesh = make_single_triangle();
    mesh.corners[1].vertex = 7;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_edge_triangle() {
    let mut mesh = make_single_triangle();
    mesh.edges[0] = Edge::interior(0, 1, 0, 5);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_edge_not_on_triangle() {
    let mut mesh = make_single_triangle();
    mesh.vertices.push(Vec3::ONE);
    mesh.edges[0] = Edge::boundary(0, 3, 0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_repeated_edge_triangle() {
    let mut mesh = make_single_triangle();
    mesh.edges[0] = Edge::interior(0, 1, 0, 0);
    assert!(mesh.validate().is_err());
}

#[test]
fn flattened_corner_arrays() {
    let mesh = make_single_triangle();
    assert_eq!(
        mesh.corner_positions(),
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
    );
    assert_eq!(mesh.corner_normals().len(), 9);
}

#[test]
fn mesh_serializes() {
    let cube = unit_cube(1.0);
    let json = serde_json::to_string(&cube).unwrap();
    let recovered: MeshTopology = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, cube);
}

// ─── Edge Tests ───────────────────────────────────────────────

#[test]
fn edge_adjacency_counts() {
    let e = Edge::interior(0, 1, 2, 3);
    assert!(e.is_interior());
    assert_eq!(e.triangle_count(), 2);
    assert_eq!(e.triangles(), Some((2, 3)));

    let b = Edge::boundary(0, 1, 2);
    assert!(!b.is_interior());
    assert_eq!(b.triangle_count(), 1);
    assert_eq!(b.triangles(), None);
}

#[test]
fn swapping_triangles() {
    let e = Edge::interior(4, 5, 1, 2).with_swapped_triangles();
    assert_eq!(e.triangles(), Some((2, 1)));
    let b = Edge::boundary(4, 5, 1);
    assert_eq!(b.with_swapped_triangles(), b);
}

// ─── EdgeTable Tests ──────────────────────────────────────────

#[test]
fn cube_is_closed() {
    let cube = unit_cube(1.0);
    assert_eq!(cube.edge_count(), 18);
    assert_eq!(cube.interior_edge_count(), 18);
    assert!(cube.is_closed());
    for edge in &cube.edges {
        assert!((1..=2).contains(&edge.triangle_count()));
    }
}

#[test]
fn quad_has_boundary() {
    let q = quad(1.0, 1.0);
    assert_eq!(q.edge_count(), 5);
    assert_eq!(q.interior_edge_count(), 1);
    assert_eq!(q.boundary_edge_count(), 4);
    assert!(!q.is_closed());
}

#[test]
fn edges_keep_first_triangle_direction() {
    let q = quad(1.0, 1.0);
    // The diagonal is first walked 2 → 0 by triangle 0 = (0, 1, 2).
    let diagonal = q.interior_edges().next().unwrap();
    assert_eq!((diagonal.v0, diagonal.v1), (2, 0));
    assert_eq!(diagonal.triangles(), Some((0, 1)));
}

#[test]
fn hard_edges_share_vertex_space_edges() {
    // Two triangles with distinct corners (different normals) on the same vertices.
    let corners = vec![
        Corner { vertex: 0, normal: Vec3::Y },
        Corner { vertex: 1, normal: Vec3::Y },
        Corner { vertex: 2, normal: Vec3::Y },
        Corner { vertex: 0, normal: Vec3::X },
        Corner { vertex: 2, normal: Vec3::X },
        Corner { vertex: 3, normal: Vec3::X },
    ];
    let table = EdgeTable::build(&corners, &[0, 1, 2, 3, 4, 5]).unwrap();
    assert_eq!(table.edges.len(), 5);
    assert_eq!(table.boundary_edge_count(), 4);
    assert!(!table.is_closed());
}

#[test]
fn non_manifold_edge_rejected() {
    let corners: Vec<Corner> = (0..5)
        .map(|vertex| Corner { vertex, normal: Vec3::Y })
        .collect();
    // Edge (0, 1) shared by three triangles.
    let indices = [0, 1, 2, 1, 0, 3, 0, 1, 4];
    assert!(EdgeTable::build(&corners, &indices).is_err());
}

#[test]
fn degenerate_triangle_rejected() {
    let corners: Vec<Corner> = (0..3)
        .map(|vertex| Corner { vertex, normal: Vec3::Y })
        .collect();
    assert!(EdgeTable::build(&corners, &[0, 0, 1]).is_err());
}

// ─── FaceNormalCache Tests ────────────────────────────────────

#[test]
fn face_normals_average_corners() {
    let mut mesh = make_single_triangle();
    mesh.corners[0].normal = Vec3::X;
    mesh.corners[1].normal = Vec3::Y;
    mesh.corners[2].normal = Vec3::Z;
    let cache = FaceNormalCache::compute(&mesh);
    assert_eq!(cache.len(), 1);
    let n = cache.get(0);
    assert!((n - Vec3::splat(1.0 / 3.0)).length() < 1e-6);
}

#[test]
fn face_normals_not_renormalized() {
    let mut mesh = make_single_triangle();
    mesh.corners[0].normal = Vec3::X;
    mesh.corners[1].normal = Vec3::NEG_X;
    mesh.corners[2].normal = Vec3::Y;
    let n = FaceNormalCache::compute(&mesh).get(0);
    assert!((n.length() - 1.0 / 3.0).abs() < 1e-6);
}

#[test]
fn cube_face_normals_are_flat() {
    let cube = unit_cube(2.0);
    let cache = FaceNormalCache::compute(&cube);
    assert_eq!(cache.len(), cube.triangle_count());
    // Triangles come in pairs per face; both share the face normal.
    for pair in cache.as_slice().chunks_exact(2) {
        assert_eq!(pair[0], pair[1]);
        assert!((pair[0].length() - 1.0).abs() < 1e-6);
    }
}

#[test]
fn cube_winding_matches_normals() {
    let cube = unit_cube(1.0);
    let cache = FaceNormalCache::compute(&cube);
    for t in 0..cube.triangle_count() {
        let [a, b, c] = cube.triangle_vertices(t);
        let pa = cube.position(a as usize);
        let pb = cube.position(b as usize);
        let pc = cube.position(c as usize);
        let geometric = (pb - pa).cross(pc - pa).normalize();
        assert!(geometric.dot(cache.get(t)) > 0.99, "Triangle {} winding", t);
    }
}

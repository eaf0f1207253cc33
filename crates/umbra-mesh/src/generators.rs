//! Procedural meshes for fixtures and demos.
//!
//! These generators produce deterministic meshes with outward CCW winding
//! and derived edge tables.

use umbra_math::Vec3;

use crate::mesh::{Corner, MeshTopology};

/// Generates an axis-aligned cube of edge length `size` centered at the origin.
///
/// Every face carries its own flat normal (24 corners), giving
/// 8 vertices, 12 triangles and 18 interior edges.
///
/// # Example
/// ```
/// use umbra_mesh::generators::unit_cube;
/// let cube = unit_cube(1.0);
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.triangle_count(), 12);
/// assert_eq!(cube.edge_count(), 18);
/// ```
pub fn unit_cube(size: f32) -> MeshTopology {
    let h = size / 2.0;
    let vertices = vec![
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ];

    // Each face as a CCW quad seen from outside, with its normal.
    let faces: [([u32; 4], Vec3); 6] = [
        ([4, 5, 6, 7], Vec3::Z),
        ([1, 0, 3, 2], Vec3::NEG_Z),
        ([5, 1, 2, 6], Vec3::X),
        ([0, 4, 7, 3], Vec3::NEG_X),
        ([7, 6, 2, 3], Vec3::Y),
        ([0, 1, 5, 4], Vec3::NEG_Y),
    ];

    let mut corners = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (quad, normal) in faces {
        let base = corners.len() as u32;
        for vertex in quad {
            corners.push(Corner { vertex, normal });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    // The fixed face list above is always a valid closed manifold.
    MeshTopology::with_derived_edges(vertices, corners, indices)
        .unwrap_or_else(|e| unreachable!("cube topology is static: {e}"))
}

/// Generates an open quad of two triangles in the XZ plane facing +Y.
///
/// The quad spans `[-width/2, width/2]` in X and `[-depth/2, depth/2]`
/// in Z. It has one interior edge (the diagonal) and four boundary edges.
pub fn quad(width: f32, depth: f32) -> MeshTopology {
    let hw = width / 2.0;
    let hd = depth / 2.0;
    let vertices = vec![
        Vec3::new(-hw, 0.0, -hd),
        Vec3::new(-hw, 0.0, hd),
        Vec3::new(hw, 0.0, hd),
        Vec3::new(hw, 0.0, -hd),
    ];
    let corners = (0..4)
        .map(|vertex| Corner {
            vertex,
            normal: Vec3::Y,
        })
        .collect();
    let indices = vec![0, 1, 2, 0, 2, 3];

    MeshTopology::with_derived_edges(vertices, corners, indices)
        .unwrap_or_else(|e| unreachable!("quad topology is static: {e}"))
}

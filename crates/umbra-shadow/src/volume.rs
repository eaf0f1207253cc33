//! Shadow-volume triangle soup storage.
//!
//! The buffer is allocated once with room for every interior edge to be a
//! silhouette edge and is overwritten in place each frame. A separate used
//! length marks how much of it the current frame wrote; the rest is
//! stale and never drawn.

use umbra_math::Vec3;
use umbra_mesh::MeshTopology;

/// Floats written per silhouette edge: 2 triangles × 3 vertices × xyz.
pub const FLOATS_PER_EDGE: usize = 18;

/// A fixed-capacity arena of shadow-volume triangle positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowVolume {
    /// Flat positions `[x0, y0, z0, x1, ...]`, sized to capacity.
    positions: Vec<f32>,
    /// Number of floats written by the last build.
    used: usize,
}

impl ShadowVolume {
    /// Creates an arena that can hold `max_edges` extruded silhouette edges.
    pub fn with_capacity(max_edges: usize) -> Self {
        Self {
            positions: vec![0.0; max_edges * FLOATS_PER_EDGE],
            used: 0,
        }
    }

    /// Creates an arena sized for `mesh`: one quad per interior edge.
    pub fn for_mesh(mesh: &MeshTopology) -> Self {
        Self::with_capacity(mesh.interior_edge_count())
    }

    /// Forgets the previous frame's contents without touching the storage.
    #[inline]
    pub fn clear(&mut self) {
        self.used = 0;
    }

    /// Maximum number of triangles the arena can hold.
    #[inline]
    pub fn capacity_triangles(&self) -> usize {
        self.positions.len() / 9
    }

    /// Number of triangles written by the last build.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.used / 9
    }

    /// Number of vertices written by the last build.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.used / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// The written part of the buffer, ready to draw as a triangle list.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.positions[..self.used]
    }

    /// Iterates over the written triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.as_slice().chunks_exact(9).map(|t| {
            [
                Vec3::new(t[0], t[1], t[2]),
                Vec3::new(t[3], t[4], t[5]),
                Vec3::new(t[6], t[7], t[8]),
            ]
        })
    }

    /// Appends the six vertices of one extruded edge.
    ///
    /// # Panics
    /// If the arena is full. Capacity covers every interior edge of the
    /// mesh it was sized for, so this only fires on a mismatched mesh.
    pub(crate) fn push_quad(&mut self, vertices: [Vec3; 6]) {
        let end = self.used + FLOATS_PER_EDGE;
        assert!(
            end <= self.positions.len(),
            "shadow volume overflow: capacity {} triangles",
            self.capacity_triangles()
        );
        for (slot, v) in self.positions[self.used..end].chunks_exact_mut(3).zip(vertices) {
            slot.copy_from_slice(&v.to_array());
        }
        self.used = end;
    }
}

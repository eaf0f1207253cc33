//! Core mesh topology type.
//!
//! Positions live in *vertex space*; triangles index into *corner space*,
//! where each corner pairs a vertex with the normal it carries on that
//! triangle. A vertex shared by faces with different normals (a hard
//! edge) appears in several corners. Edges are stored in vertex space so
//! that faces meeting at a hard edge still share the edge.

use serde::{Deserialize, Serialize};
use umbra_math::Vec3;
use umbra_types::{UmbraError, UmbraResult};

use crate::topology::EdgeTable;

/// A triangle corner: a vertex reference plus the normal used there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    /// Index into [`MeshTopology::vertices`].
    pub vertex: u32,
    /// Normal of this corner.
    pub normal: Vec3,
}

/// An edge in vertex space with its one or two adjacent triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint.
    pub v0: u32,
    /// Second endpoint.
    pub v1: u32,
    /// First adjacent triangle.
    pub tri_a: u32,
    /// Second adjacent triangle. `None` on a boundary edge.
    pub tri_b: Option<u32>,
}

impl Edge {
    /// Creates an interior edge shared by two triangles.
    pub fn interior(v0: u32, v1: u32, tri_a: u32, tri_b: u32) -> Self {
        Self {
            v0,
            v1,
            tri_a,
            tri_b: Some(tri_b),
        }
    }

    /// Creates a boundary edge with a single adjacent triangle.
    pub fn boundary(v0: u32, v1: u32, tri: u32) -> Self {
        Self {
            v0,
            v1,
            tri_a: tri,
            tri_b: None,
        }
    }

    /// Returns true if the edge has two adjacent triangles.
    #[inline]
    pub fn is_interior(&self) -> bool {
        self.tri_b.is_some()
    }

    /// Number of adjacent triangles (1 or 2).
    #[inline]
    pub fn triangle_count(&self) -> usize {
        if self.is_interior() {
            2
        } else {
            1
        }
    }

    /// Both adjacent triangles, if the edge is interior.
    #[inline]
    pub fn triangles(&self) -> Option<(u32, u32)> {
        self.tri_b.map(|b| (self.tri_a, b))
    }

    /// The same edge with its two triangles listed in the opposite order.
    pub fn with_swapped_triangles(&self) -> Self {
        match self.tri_b {
            Some(b) => Self::interior(self.v0, self.v1, b, self.tri_a),
            None => *self,
        }
    }
}

/// The static geometric data of one mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshTopology {
    /// Vertex positions.
    pub vertices: Vec<Vec3>,
    /// Rendered vertex list: one entry per (vertex, normal) pair.
    pub corners: Vec<Corner>,
    /// Triangle corner indices, flat: `[t0c0, t0c1, t0c2, t1c0, ...]`.
    pub indices: Vec<u32>,
    /// Edge adjacency table.
    pub edges: Vec<Edge>,
}

impl MeshTopology {
    /// Assembles a topology and validates it.
    pub fn new(
        vertices: Vec<Vec3>,
        corners: Vec<Corner>,
        indices: Vec<u32>,
        edges: Vec<Edge>,
    ) -> UmbraResult<Self> {
        let mesh = Self {
            vertices,
            corners,
            indices,
            edges,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Assembles a topology whose edge table is derived from the triangles.
    pub fn with_derived_edges(
        vertices: Vec<Vec3>,
        corners: Vec<Corner>,
        indices: Vec<u32>,
    ) -> UmbraResult<Self> {
        let edges = EdgeTable::build(&corners, &indices)?.into_edges();
        Self::new(vertices, corners, indices, edges)
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of corners.
    #[inline]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        self.vertices[i]
    }

    /// Returns the three corner indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle_vertices(&self, t: usize) -> [u32; 3] {
        self.triangle(t).map(|c| self.corners[c as usize].vertex)
    }

    /// Iterates over the edges eligible for silhouette testing.
    pub fn interior_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|e| e.is_interior())
    }

    /// Number of edges with two adjacent triangles.
    pub fn interior_edge_count(&self) -> usize {
        self.interior_edges().count()
    }

    /// Number of edges with a single adjacent triangle.
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.len() - self.interior_edge_count()
    }

    /// Returns true if every edge is shared by two triangles.
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }

    /// Corner positions flattened to `[x0, y0, z0, x1, ...]` for drawing.
    pub fn corner_positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.corners.len() * 3);
        for corner in &self.corners {
            out.extend_from_slice(&self.vertices[corner.vertex as usize].to_array());
        }
        out
    }

    /// Corner normals flattened to `[nx0, ny0, nz0, nx1, ...]` for drawing.
    pub fn corner_normals(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.corners.len() * 3);
        for corner in &self.corners {
            out.extend_from_slice(&corner.normal.to_array());
        }
        out
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Corner vertex indices are within bounds
    /// - Index count is a multiple of 3 and all corner indices are in bounds
    /// - Edge endpoints and triangles are in bounds and distinct
    /// - Each adjacent triangle actually contains both edge endpoints
    pub fn validate(&self) -> UmbraResult<()> {
        let n = self.vertices.len();
        let m = self.corners.len();

        for (i, corner) in self.corners.iter().enumerate() {
            if corner.vertex as usize >= n {
                return Err(UmbraError::InvalidMesh(format!(
                    "Corner {} references vertex {} (vertex count: {})",
                    i, corner.vertex, n
                )));
            }
        }

        if self.indices.len() % 3 != 0 {
            return Err(UmbraError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= m {
                return Err(UmbraError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (corner count: {})",
                    idx, i, m
                )));
            }
        }

        let t = self.triangle_count();
        for (i, edge) in self.edges.iter().enumerate() {
            if edge.v0 as usize >= n || edge.v1 as usize >= n {
                return Err(UmbraError::InvalidMesh(format!(
                    "Edge {} references vertex out of range: ({}, {})",
                    i, edge.v0, edge.v1
                )));
            }
            if edge.v0 == edge.v1 {
                return Err(UmbraError::InvalidMesh(format!(
                    "Edge {} is degenerate: both endpoints are {}",
                    i, edge.v0
                )));
            }
            for tri in std::iter::once(edge.tri_a).chain(edge.tri_b) {
                if tri as usize >= t {
                    return Err(UmbraError::InvalidMesh(format!(
                        "Edge {} references triangle {} (triangle count: {})",
                        i, tri, t
                    )));
                }
                let verts = self.triangle_vertices(tri as usize);
                if !verts.contains(&edge.v0) || !verts.contains(&edge.v1) {
                    return Err(UmbraError::InvalidMesh(format!(
                        "Edge {} ({}, {}) is not a side of triangle {}",
                        i, edge.v0, edge.v1, tri
                    )));
                }
            }
            if edge.tri_b == Some(edge.tri_a) {
                return Err(UmbraError::InvalidMesh(format!(
                    "Edge {} lists triangle {} twice",
                    i, edge.tri_a
                )));
            }
        }

        Ok(())
    }
}

//! Edge adjacency construction.
//!
//! Builds the edge table from the triangle index buffer once at load
//! time. Triangles reference corners, but adjacency is resolved in
//! vertex space so that two faces meeting at a hard edge (different
//! corner normals, same vertices) still share that edge.

use std::collections::HashMap;

use umbra_types::{UmbraError, UmbraResult};

use crate::mesh::{Corner, Edge};

/// Edge table derived from a triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeTable {
    /// Edges in first-seen order.
    pub edges: Vec<Edge>,
}

impl EdgeTable {
    /// Build the edge table from corners and triangle corner indices.
    ///
    /// Each edge keeps the direction in which its first triangle walks it,
    /// so `tri_a` always traverses `v0 → v1`. An edge claimed by more than
    /// two triangles is rejected as non-manifold.
    pub fn build(corners: &[Corner], indices: &[u32]) -> UmbraResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(UmbraError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        let vertex_of = |c: u32| -> UmbraResult<u32> {
            corners
                .get(c as usize)
                .map(|corner| corner.vertex)
                .ok_or_else(|| {
                    UmbraError::InvalidMesh(format!(
                        "Corner index {} is out of range (corner count: {})",
                        c,
                        corners.len()
                    ))
                })
        };

        // Key: (min_vertex, max_vertex) to canonicalize edge direction
        let mut lookup: HashMap<(u32, u32), usize> = HashMap::new();
        let mut edges: Vec<Edge> = Vec::new();

        for (t, tri) in indices.chunks_exact(3).enumerate() {
            let a = vertex_of(tri[0])?;
            let b = vertex_of(tri[1])?;
            let c = vertex_of(tri[2])?;
            let t = t as u32;

            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                if v0 == v1 {
                    return Err(UmbraError::InvalidMesh(format!(
                        "Triangle {} repeats vertex {}",
                        t, v0
                    )));
                }
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                match lookup.get(&key) {
                    None => {
                        lookup.insert(key, edges.len());
                        edges.push(Edge::boundary(v0, v1, t));
                    }
                    Some(&i) => {
                        let edge = &mut edges[i];
                        if edge.tri_b.is_some() {
                            return Err(UmbraError::InvalidMesh(format!(
                                "Non-manifold edge ({}, {}) shared by more than two triangles",
                                key.0, key.1
                            )));
                        }
                        edge.tri_b = Some(t);
                    }
                }
            }
        }

        tracing::trace!(edges = edges.len(), "edge table built");
        Ok(Self { edges })
    }

    /// Consumes the table, returning the edges.
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// Returns the number of boundary edges (edges with only 1 adjacent triangle).
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| !e.is_interior()).count()
    }

    /// Returns true if the mesh is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }
}

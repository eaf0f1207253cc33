//! Silhouette classification and extrusion.
//!
//! For each interior edge `(v1, v2, t1, t2)` and light `L`:
//!
//! ```text
//! m  = (v1 + v2) / 2
//! d1 = n(t1) · (L - m)        d2 = n(t2) · (L - m)
//! silhouette  ⇔  d1 · d2 < 0
//! w1 = v1 + (v1 - L) · k      w2 = v2 + (v2 - L) · k
//! d1 < 0  →  (v1, v2, w2), (w2, w1, v1)
//! else    →  (w2, v2, v1), (v1, w1, w2)
//! ```
//!
//! The winding decides which side of the volume faces outward and must
//! agree with the stencil pass: back-face-culled draws increment,
//! front-face-culled draws decrement.
//!
//! Boundary edges have no second face to compare against and are
//! skipped, so the volume of an open mesh is missing the quads along its
//! boundary.

use serde::{Deserialize, Serialize};
use umbra_math::Vec3;
use umbra_mesh::{Edge, FaceNormalCache, MeshTopology};
use umbra_types::constants::DEFAULT_EXTRUSION_FACTOR;
use umbra_types::EdgeId;

use crate::volume::ShadowVolume;

/// Signed alignment of an edge's two faces with the direction to the light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeAlignment {
    /// `n(t1) · (L - midpoint)`.
    pub d1: f32,
    /// `n(t2) · (L - midpoint)`.
    pub d2: f32,
}

impl EdgeAlignment {
    /// One face lit, the other unlit. A zero product is never a silhouette.
    #[inline]
    pub fn is_silhouette(&self) -> bool {
        self.d1 * self.d2 < 0.0
    }
}

/// Alignment of an interior edge, or `None` for a boundary edge.
///
/// # Panics
/// If the edge references vertices or triangles outside `mesh`/`normals`.
pub fn edge_alignment(
    mesh: &MeshTopology,
    normals: &FaceNormalCache,
    edge: &Edge,
    light: Vec3,
) -> Option<EdgeAlignment> {
    let (t1, t2) = edge.triangles()?;
    let v1 = mesh.position(edge.v0 as usize);
    let v2 = mesh.position(edge.v1 as usize);
    let toward_light = light - (v1 + v2) / 2.0;
    Some(EdgeAlignment {
        d1: normals.get(t1 as usize).dot(toward_light),
        d2: normals.get(t2 as usize).dot(toward_light),
    })
}

/// Builds shadow volumes with a fixed extrusion factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowVolumeBuilder {
    /// Multiple of the light-to-vertex vector added to push the far cap out.
    pub extrusion_factor: f32,
}

impl Default for ShadowVolumeBuilder {
    fn default() -> Self {
        Self {
            extrusion_factor: DEFAULT_EXTRUSION_FACTOR,
        }
    }
}

impl ShadowVolumeBuilder {
    pub fn new(extrusion_factor: f32) -> Self {
        Self { extrusion_factor }
    }

    /// Rebuilds `volume` for `light`, returning the number of triangles written.
    ///
    /// The previous contents are discarded. Identical inputs always
    /// produce identical output.
    pub fn build(
        &self,
        mesh: &MeshTopology,
        normals: &FaceNormalCache,
        light: Vec3,
        volume: &mut ShadowVolume,
    ) -> usize {
        volume.clear();
        let k = self.extrusion_factor;

        for edge in mesh.interior_edges() {
            let Some(alignment) = edge_alignment(mesh, normals, edge, light) else {
                continue;
            };
            if !alignment.is_silhouette() {
                continue;
            }

            let v1 = mesh.position(edge.v0 as usize);
            let v2 = mesh.position(edge.v1 as usize);
            let w1 = v1 + (v1 - light) * k;
            let w2 = v2 + (v2 - light) * k;

            if alignment.d1 < 0.0 {
                volume.push_quad([v1, v2, w2, w2, w1, v1]);
            } else {
                volume.push_quad([w2, v2, v1, v1, w1, w2]);
            }
        }

        let triangles = volume.triangle_count();
        tracing::trace!(triangles, light = ?light, "shadow volume built");
        triangles
    }

    /// Ids of the edges that are silhouettes for `light`, in table order.
    pub fn silhouette_edges(
        &self,
        mesh: &MeshTopology,
        normals: &FaceNormalCache,
        light: Vec3,
    ) -> Vec<EdgeId> {
        mesh.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                edge_alignment(mesh, normals, e, light).is_some_and(|a| a.is_silhouette())
            })
            .map(|(i, _)| EdgeId(i as u32))
            .collect()
    }
}

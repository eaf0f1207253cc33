//! Per-triangle normals for silhouette classification.
//!
//! Each face normal is the plain mean of the triangle's three corner
//! normals. This is not the geometric cross-product normal: on creased
//! geometry with smoothed corner normals it leans toward the neighbours,
//! which can shift the silhouette slightly. The mean is not renormalized;
//! only the sign of its dot product with the light direction is used.

use serde::{Deserialize, Serialize};
use umbra_math::Vec3;

use crate::mesh::MeshTopology;

/// Face normals computed once after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceNormalCache {
    normals: Vec<Vec3>,
}

impl FaceNormalCache {
    /// Computes one normal per triangle of `mesh`.
    pub fn compute(mesh: &MeshTopology) -> Self {
        let normals = mesh
            .indices
            .chunks_exact(3)
            .map(|tri| {
                let sum = tri
                    .iter()
                    .fold(Vec3::ZERO, |acc, &c| acc + mesh.corners[c as usize].normal);
                sum / 3.0
            })
            .collect();
        Self { normals }
    }

    /// Normal of triangle `t`.
    #[inline]
    pub fn get(&self, t: usize) -> Vec3 {
        self.normals[t]
    }

    /// Number of cached normals (equals the triangle count).
    #[inline]
    pub fn len(&self) -> usize {
        self.normals.len()
    }

    /// Returns true if the mesh had no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.normals.is_empty()
    }

    pub fn as_slice(&self) -> &[Vec3] {
        &self.normals
    }
}

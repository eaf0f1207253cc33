//! # umbra-shadow
//!
//! Per-frame shadow-volume construction.
//!
//! Given a [`MeshTopology`](umbra_mesh::MeshTopology), its
//! [`FaceNormalCache`](umbra_mesh::FaceNormalCache) and a light position,
//! [`ShadowVolumeBuilder`] finds the silhouette edges and extrudes each
//! into a two-triangle quad, written into a preallocated
//! [`ShadowVolume`] arena.

pub mod builder;
pub mod volume;

pub use builder::{edge_alignment, EdgeAlignment, ShadowVolumeBuilder};
pub use volume::ShadowVolume;

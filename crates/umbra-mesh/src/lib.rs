//! # umbra-mesh
//!
//! Static mesh topology for shadow-volume extrusion.
//!
//! ## Key Types
//!
//! - [`MeshTopology`] — vertices, corners (vertex + normal), triangles
//!   and the per-edge triangle adjacency table.
//! - [`EdgeTable`] — derives the edge table from a triangle list.
//! - [`FaceNormalCache`] — per-triangle normals used by silhouette tests.
//! - Procedural generators for fixtures (unit cube, open quad).

pub mod generators;
pub mod mesh;
pub mod normals;
pub mod topology;

pub use mesh::{Corner, Edge, MeshTopology};
pub use normals::FaceNormalCache;
pub use topology::EdgeTable;

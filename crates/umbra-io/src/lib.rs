//! # umbra-io
//!
//! Reader and writer for the plain-text mesh description.
//!
//! The format is four sections, each introduced by a decimal count on
//! its own line:
//!
//! ```text
//! N            vertices:   x y z
//! M            corners:    vertexIndex nx ny nz
//! T            triangles:  c0 c1 c2
//! E            edges:      v0 v1 tri_a [tri_b]
//! ```
//!
//! There is no header or version field.

pub mod loader;
pub mod writer;

pub use loader::{load_mesh, parse_mesh, parse_mesh_str};
pub use writer::{mesh_to_string, save_mesh, write_mesh};

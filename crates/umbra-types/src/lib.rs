//! # umbra-types
//!
//! Shared types, identifiers, error types and rendering constants
//! for the umbra shadow-volume renderer.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other umbra crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{UmbraError, UmbraResult};
pub use ids::{CornerId, EdgeId, TriangleId, VertexId};

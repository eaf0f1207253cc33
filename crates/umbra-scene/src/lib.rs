//! # umbra-scene
//!
//! The pieces around the shadow renderer: planar receivers, an orbit
//! camera, an articulated caster made of shadow meshes, and the
//! [`Scene`] that ties them into a per-frame loop.

pub mod camera;
pub mod config;
pub mod group;
pub mod plane;
pub mod scene;

pub use camera::{Camera, OrbitCamera};
pub use config::{CameraConfig, LightOrbit, SceneConfig};
pub use group::{Articulated, MeshGroup};
pub use plane::Plane;
pub use scene::Scene;

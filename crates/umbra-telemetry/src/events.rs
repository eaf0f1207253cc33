//! Frame event types.
//!
//! Lightweight values emitted at fixed points of each rendered frame.

use serde::{Deserialize, Serialize};

/// An event tagged with the frame it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Frame number (0-indexed).
    pub frame: u64,
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame started.
    FrameBegin {
        /// Seconds since the previous frame.
        dt: f64,
    },

    /// Shadow volumes rebuilt for the frame's light.
    VolumeBuilt {
        /// Volume triangles across all casters.
        triangles: u32,
        /// Light position used for extrusion.
        light: [f32; 3],
    },

    /// A render stage finished.
    StageComplete {
        stage: String,
    },

    /// Frame finished.
    FrameEnd {
        /// Wall-clock time spent on the frame (seconds).
        wall_time: f64,
    },

    /// Custom event for extensibility.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl FrameEvent {
    pub fn new(frame: u64, kind: EventKind) -> Self {
        Self { frame, kind }
    }
}

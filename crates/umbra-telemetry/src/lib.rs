//! # umbra-telemetry
//!
//! Event bus for per-frame telemetry. Emits structured events
//! (frame timing, shadow-volume size, completed render stages) that are
//! consumed by pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, FrameEvent};
pub use sinks::{EventSink, TracingSink, VecSink};

//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::events::FrameEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &FrameEvent);

    /// Called at shutdown. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events in memory.
///
/// The log is shared, so a clone kept outside the bus can read what the
/// boxed sink received.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<FrameEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<FrameEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &FrameEvent) {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing` at a fixed level.
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &FrameEvent) {
        let frame = event.frame;
        let kind = &event.kind;
        if self.level == Level::ERROR {
            tracing::error!(frame, event = ?kind, "frame_event");
        } else if self.level == Level::WARN {
            tracing::warn!(frame, event = ?kind, "frame_event");
        } else if self.level == Level::INFO {
            tracing::info!(frame, event = ?kind, "frame_event");
        } else if self.level == Level::DEBUG {
            tracing::debug!(frame, event = ?kind, "frame_event");
        } else {
            tracing::trace!(frame, event = ?kind, "frame_event");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

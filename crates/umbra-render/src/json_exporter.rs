//! JSON trace exporter — writes recorded frames for offline inspection.
//!
//! Collects the [`FrameRecord`]s produced by a
//! [`RecordingContext`](crate::recording::RecordingContext), tagged with
//! the frame's light and timestep, and serializes the whole run to a
//! JSON file on `finalize()`.

use std::path::PathBuf;

use serde::Serialize;
use umbra_types::{UmbraError, UmbraResult};

use crate::recording::FrameRecord;
use crate::renderer::FrameContext;

/// One captured frame.
#[derive(Serialize)]
struct FrameTrace {
    frame: u32,
    dt: f32,
    light: [f32; 3],
    draw_count: usize,
    triangle_count: usize,
    record: FrameRecord,
}

/// Complete run for JSON export.
#[derive(Serialize)]
struct TraceData<'a> {
    frame_count: usize,
    frames: &'a [FrameTrace],
}

/// Exports recorded frames to a JSON file.
///
/// Usage:
/// ```text
/// let mut exporter = JsonTraceExporter::new("trace.json");
/// // ... each frame: render into a RecordingContext, then
/// exporter.submit_frame(&frame_ctx, ctx.take_frame());
/// exporter.finalize()?; // Writes the JSON file
/// ```
pub struct JsonTraceExporter {
    output_path: PathBuf,
    frames: Vec<FrameTrace>,
}

impl JsonTraceExporter {
    /// Creates a new exporter that will write to the given path.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            frames: Vec::new(),
        }
    }

    pub fn submit_frame(&mut self, frame: &FrameContext, record: FrameRecord) {
        self.frames.push(FrameTrace {
            frame: self.frames.len() as u32,
            dt: frame.dt,
            light: frame.light.to_array(),
            draw_count: record.draws.len(),
            triangle_count: record.triangle_count(),
            record,
        });
    }

    pub fn frame_count(&self) -> u32 {
        self.frames.len() as u32
    }

    /// Serializes the frames submitted so far.
    pub fn to_json_string(&self) -> UmbraResult<String> {
        let data = TraceData {
            frame_count: self.frames.len(),
            frames: &self.frames,
        };
        serde_json::to_string(&data)
            .map_err(|e| UmbraError::Serialization(format!("JSON serialization failed: {e}")))
    }

    /// Writes the JSON file and clears the submitted frames.
    pub fn finalize(&mut self) -> UmbraResult<()> {
        let json = self.to_json_string()?;
        std::fs::write(&self.output_path, json)?;
        tracing::debug!(
            path = %self.output_path.display(),
            frames = self.frames.len(),
            "trace written"
        );
        self.frames.clear();
        Ok(())
    }
}

use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{RiverGlyphError, RiverGlyphResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkConfig {
    /// Canvas size of the first frame. Later frames may differ after a resize.
    pub canvas: Canvas,
    /// Spokes the animation will grow.
    pub total_spokes: usize,
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> RiverGlyphResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RiverGlyphResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> RiverGlyphResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RiverGlyphResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RiverGlyphResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> RiverGlyphResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes each frame to `<dir>/frame_00000.png`, `frame_00001.png`, ...
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: usize,
}

impl PngSequenceSink {
    /// Create a sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    /// Number of frames written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Path of the PNG for frame `idx`.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        frame_path_in(&self.dir, idx)
    }
}

fn frame_path_in(dir: &Path, idx: FrameIndex) -> PathBuf {
    dir.join(format!("frame_{:05}.png", idx.0))
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> RiverGlyphResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            RiverGlyphError::render(format!(
                "create output dir '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.written = 0;
        tracing::info!(
            dir = %self.dir.display(),
            width = cfg.canvas.width,
            height = cfg.canvas.height,
            spokes = cfg.total_spokes,
            "writing png sequence"
        );
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RiverGlyphResult<()> {
        write_png(&self.frame_path(idx), frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> RiverGlyphResult<()> {
        tracing::info!(frames = self.written, "png sequence complete");
        Ok(())
    }
}

/// Encode a frame as a straight-alpha RGBA PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> RiverGlyphResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| RiverGlyphError::render(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;

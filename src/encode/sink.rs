use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::RenderResult;
use crate::render::canvas::FrameRGBA;

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

/// Consumer of rendered frames.
///
/// `begin` is called once when the pipeline initializes, `push_frame` once per rendered tick
/// and `end` on shutdown. A display window is just another sink supplied by the host.
pub trait FrameSink {
    /// Prepare for frames of the given size.
    fn begin(&mut self, cfg: SinkConfig) -> RenderResult<()>;
    /// Consume the frame rendered for `tick`.
    fn push_frame(&mut self, tick: u64, frame: &FrameRGBA) -> RenderResult<()>;
    /// Release resources; no more frames follow.
    fn end(&mut self) -> RenderResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    ended: bool,
    /// Frames in the order they were pushed.
    pub frames: Vec<(u64, FrameRGBA)>,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration received by the last `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Whether `end` has been called since the last `begin`.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RenderResult<()> {
        self.cfg = Some(cfg);
        self.ended = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, tick: u64, frame: &FrameRGBA) -> RenderResult<()> {
        self.frames.push((tick, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> RenderResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes every frame as `<dir>/t=NNN.png`.
#[derive(Debug, Clone)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir`; the directory is created on `begin`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File written for `tick`: `t=NNN.png`, zero-padded to three digits.
    pub fn path_for(&self, tick: u64) -> PathBuf {
        self.dir.join(format!("t={tick:03}.png"))
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> RenderResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create record dir '{}'", self.dir.display()))?;
        Ok(())
    }

    fn push_frame(&mut self, tick: u64, frame: &FrameRGBA) -> RenderResult<()> {
        let path = self.path_for(tick);
        frame.save_png(&path)?;
        tracing::debug!(path = %path.display(), tick, "wrote frame");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> RenderResult<()> {
        tracing::info!(dir = %self.dir.display(), frames = self.written.len(), "png sequence done");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;

use std::path::PathBuf;

use crate::assets::sprite_cache::SpriteCache;
use crate::config::PipelineOpts;
use crate::encode::sink::{FrameSink, PngSequenceSink, SinkConfig};
use crate::foundation::error::{RenderError, RenderResult};
use crate::geometry::GraphicsProperties;
use crate::render::canvas::{FrameRGBA, RgbArray};
use crate::render::compositor::Compositor;
use crate::world::model::WorldView;

/// What [`GraphicPipeline::render`] hands back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Update the display sink only.
    #[default]
    Human,
    /// Also return the frame as an `(height, width, 3)` array.
    RgbArray,
}

/// Renders world snapshots of one fixed grid size.
///
/// Lifecycle:
/// 1. [`GraphicPipeline::new`] derives the geometry and loads the status font
/// 2. [`GraphicPipeline::initialize`] allocates the frame buffer and starts the display sink
/// 3. [`GraphicPipeline::render`] / [`GraphicPipeline::export_frame`] once per tick
/// 4. [`GraphicPipeline::shutdown`] ends the display sink and drops the buffer
///
/// Each pipeline owns its sprite cache; pipelines never share decoded sprites.
pub struct GraphicPipeline {
    grid: (u32, u32),
    opts: PipelineOpts,
    compositor: Compositor,
    frame: Option<FrameRGBA>,
    display: Option<Box<dyn FrameSink>>,
    recorder: Option<PngSequenceSink>,
}

impl GraphicPipeline {
    /// Pipeline for a `grid_width x grid_height` world.
    pub fn new(grid_width: u32, grid_height: u32, opts: PipelineOpts) -> RenderResult<Self> {
        let props = GraphicsProperties::new(grid_width, grid_height, &opts)?;
        let compositor = Compositor::new(props, &opts)?;
        Ok(Self {
            grid: (grid_width, grid_height),
            opts,
            compositor,
            frame: None,
            display: None,
            recorder: None,
        })
    }

    /// Pipeline sized for `world`'s grid.
    pub fn for_world(world: &dyn WorldView, opts: PipelineOpts) -> RenderResult<Self> {
        let (w, h) = world.grid_size();
        Self::new(w, h, opts)
    }

    /// Attach a host display; every rendered frame is pushed to it.
    pub fn with_display(mut self, sink: Box<dyn FrameSink>) -> Self {
        self.display = Some(sink);
        self.opts.display = true;
        self
    }

    /// Allocate the frame buffer and start the display sink.
    ///
    /// Calling it again on an initialized pipeline is a no-op.
    pub fn initialize(&mut self) -> RenderResult<()> {
        if self.frame.is_some() {
            return Ok(());
        }
        let canvas = self.compositor.props().canvas;
        if self.opts.display {
            let sink = self.display.as_mut().ok_or_else(|| {
                RenderError::validation("display requested but no display sink attached")
            })?;
            sink.begin(SinkConfig {
                width: canvas.width,
                height: canvas.height,
            })?;
        }
        self.frame = Some(FrameRGBA::new(canvas, self.opts.palette.floor));
        tracing::info!(
            width = canvas.width,
            height = canvas.height,
            display = self.opts.display,
            "pipeline initialized"
        );
        Ok(())
    }

    /// Return `true` between [`Self::initialize`] and [`Self::shutdown`].
    pub fn is_initialized(&self) -> bool {
        self.frame.is_some()
    }

    /// Compose one frame of `world`, present it and optionally return it as an array.
    #[tracing::instrument(skip(self, world), fields(tick = world.elapsed_ticks()))]
    pub fn render(
        &mut self,
        world: &dyn WorldView,
        mode: RenderMode,
    ) -> RenderResult<Option<RgbArray>> {
        self.draw(world)?;
        let frame = self.frame.as_ref().ok_or_else(not_initialized)?;

        if self.opts.display
            && let Some(sink) = self.display.as_mut()
        {
            sink.push_frame(world.elapsed_ticks(), frame)?;
        }

        Ok(match mode {
            RenderMode::Human => None,
            RenderMode::RgbArray => Some(frame.to_rgb_array()),
        })
    }

    /// Render `world` and write it to `<record_dir>/t=NNN.png`.
    ///
    /// The first export creates the record directory.
    #[tracing::instrument(skip(self, world))]
    pub fn export_frame(&mut self, world: &dyn WorldView, tick: u64) -> RenderResult<PathBuf> {
        self.draw(world)?;
        let frame = self.frame.as_ref().ok_or_else(not_initialized)?;

        let recorder = match self.recorder.take() {
            Some(recorder) => recorder,
            None => {
                let mut sink = PngSequenceSink::new(self.opts.record_dir.clone());
                sink.begin(SinkConfig {
                    width: frame.width,
                    height: frame.height,
                })?;
                sink
            }
        };
        let recorder = self.recorder.insert(recorder);
        recorder.push_frame(tick, frame)?;

        let path = recorder.path_for(tick);
        tracing::info!(path = %path.display(), "exported frame");
        Ok(path)
    }

    /// End the display and record sinks and release the frame buffer. The sprite cache is kept.
    pub fn shutdown(&mut self) -> RenderResult<()> {
        if self.frame.take().is_none() {
            return Ok(());
        }
        if self.opts.display
            && let Some(sink) = self.display.as_mut()
        {
            sink.end()?;
        }
        if let Some(mut recorder) = self.recorder.take() {
            recorder.end()?;
        }
        tracing::info!("pipeline shut down");
        Ok(())
    }

    /// Last composed frame, if initialized.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }

    /// Geometry derived at construction.
    pub fn props(&self) -> &GraphicsProperties {
        self.compositor.props()
    }

    /// Options the pipeline was built with.
    pub fn opts(&self) -> &PipelineOpts {
        &self.opts
    }

    /// Frames exported since the last [`Self::shutdown`].
    pub fn exported(&self) -> &[PathBuf] {
        self.recorder
            .as_ref()
            .map(PngSequenceSink::written)
            .unwrap_or_default()
    }

    /// Sprite cache owned by this pipeline.
    pub fn sprite_cache(&self) -> &SpriteCache {
        self.compositor.sprite_cache()
    }

    fn draw(&mut self, world: &dyn WorldView) -> RenderResult<()> {
        if world.grid_size() != self.grid {
            let (w, h) = world.grid_size();
            return Err(RenderError::validation(format!(
                "world grid {w}x{h} does not match pipeline grid {}x{}",
                self.grid.0, self.grid.1
            )));
        }
        let frame = self.frame.as_mut().ok_or_else(not_initialized)?;
        self.compositor.compose(world, frame)
    }
}

fn not_initialized() -> RenderError {
    RenderError::validation("pipeline is not initialized")
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

//! Raster renderer for a grid-based cooperative cooking simulation.
//!
//! Each tick the world model is read once through [`WorldView`] and composited into an RGBA
//! frame: floor, static tiles, agents, per-cell object stacks, progress bars, and an info area
//! with recipe timers and a status line. Frames go to a display [`FrameSink`], come back as an
//! `(height, width, 3)` [`RgbArray`], or are exported as `t=NNN.png` files.
//!
//! - Build a [`GraphicPipeline`] from the grid size and [`PipelineOpts`]
//! - [`GraphicPipeline::initialize`], then [`GraphicPipeline::render`] once per tick
//! - [`GraphicPipeline::shutdown`] when the episode ends
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

/// Pipeline options and the color palette.
pub mod config;
/// Frame sinks.
pub mod encode;
/// Grid-to-pixel geometry.
pub mod geometry;
/// Frame composition and the pipeline lifecycle.
pub mod render;
/// World model boundary.
pub mod world;

pub use crate::foundation::core::{Canvas, Cell, GridPos, PixelPoint, PixelSize, Rgb8};
pub use crate::foundation::error::{RenderError, RenderResult};

pub use crate::assets::decode::Sprite;
pub use crate::assets::sprite_cache::{SpriteCache, SpriteKey};
pub use crate::config::{Palette, PipelineOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::geometry::GraphicsProperties;
pub use crate::render::canvas::{FrameRGBA, RgbArray};
pub use crate::render::compositor::Compositor;
pub use crate::render::pipeline::{GraphicPipeline, RenderMode};
pub use crate::render::stack::{DrawOp, StackContext, StackRegions, pack_grid, resolve_stack};
pub use crate::world::model::{
    Agent, CookState, DynamicFilter, DynamicKind, DynamicObject, Orientation, Recipe, StaticKind,
    StaticObject, WorldView,
};
pub use crate::world::snapshot::WorldSnapshot;

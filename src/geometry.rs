//! Grid-to-pixel mapping for every placement class the compositor draws with.
//!
//! All mappers return the top-left corner of the region, floored to integer pixels.

use crate::config::PipelineOpts;
use crate::foundation::core::{Canvas, GridPos, PixelPoint, PixelSize};
use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::{px_extent, px_floor};

/// Rows reserved below the playfield for recipe icons and the status line.
pub const INFO_ROWS: u32 = 2;

/// Upward shift of pot contents, as a fraction of a tile.
pub const SOUPPOT_RIM_OFFSET: f64 = 0.05;

/// Upward shift of the pot overlay sprite, as a fraction of a tile.
pub const POT_SPRITE_OFFSET: f64 = 0.075;

/// Immutable pixel geometry derived once from grid dimensions and scale constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphicsProperties {
    /// Side length of one tile in pixels.
    pub pixel_per_tile: u32,
    /// Held-item scale.
    pub holding_scale: f64,
    /// Plated-item scale.
    pub container_scale: f64,
    /// Pot-content scale.
    pub souppot_scale: f64,
    /// Full tile region.
    pub tile_size: PixelSize,
    /// Region of an item held by an agent.
    pub holding_size: PixelSize,
    /// Region of an item inside a container on a tile.
    pub container_size: PixelSize,
    /// Region of an item inside a container held by an agent.
    pub holding_container_size: PixelSize,
    /// Region of pot contents and recipe icons.
    pub souppot_size: PixelSize,
    /// Total canvas, including the info rows.
    pub canvas: Canvas,
}

impl GraphicsProperties {
    /// Derive geometry for a `grid_width x grid_height` world.
    pub fn new(grid_width: u32, grid_height: u32, opts: &PipelineOpts) -> RenderResult<Self> {
        opts.validate()?;
        if grid_width == 0 || grid_height == 0 {
            return Err(RenderError::validation(format!(
                "grid must be non-empty, got {grid_width}x{grid_height}"
            )));
        }

        let ppt = opts.pixel_per_tile;
        let ppt_f = f64::from(ppt);
        let scaled = |scale: f64| PixelSize::square(px_extent(ppt_f * scale));

        let width = ppt
            .checked_mul(grid_width)
            .ok_or_else(|| RenderError::validation("canvas width overflow"))?;
        let height = grid_height
            .checked_add(INFO_ROWS)
            .and_then(|rows| rows.checked_mul(ppt))
            .ok_or_else(|| RenderError::validation("canvas height overflow"))?;

        Ok(Self {
            pixel_per_tile: ppt,
            holding_scale: opts.holding_scale,
            container_scale: opts.container_scale,
            souppot_scale: opts.souppot_scale,
            tile_size: PixelSize::square(ppt),
            holding_size: scaled(opts.holding_scale),
            container_size: scaled(opts.container_scale),
            holding_container_size: scaled(opts.container_scale * opts.holding_scale),
            souppot_size: scaled(opts.souppot_scale),
            canvas: Canvas { width, height },
        })
    }

    fn ppt(&self) -> f64 {
        f64::from(self.pixel_per_tile)
    }

    fn offset_by(&self, loc: GridPos, dx: f64, dy: f64) -> PixelPoint {
        let ppt = self.ppt();
        PixelPoint::new(px_floor(ppt * loc.x + dx), px_floor(ppt * loc.y + dy))
    }

    /// `pixel_per_tile * loc`.
    pub fn scaled_location(&self, loc: impl Into<GridPos>) -> PixelPoint {
        self.offset_by(loc.into(), 0.0, 0.0)
    }

    /// Bottom-right biased region for an item in an agent's hands.
    pub fn holding_location(&self, loc: impl Into<GridPos>) -> PixelPoint {
        let d = self.ppt() * (1.0 - self.holding_scale);
        self.offset_by(loc.into(), d, d)
    }

    /// Centered region for a plated item on a tile.
    pub fn container_location(&self, loc: impl Into<GridPos>) -> PixelPoint {
        let d = self.ppt() * (1.0 - self.container_scale) / 2.0;
        self.offset_by(loc.into(), d, d)
    }

    /// Centered pot-content region, raised above the rim.
    pub fn souppot_location(&self, loc: impl Into<GridPos>) -> PixelPoint {
        let d = self.ppt() * (1.0 - self.souppot_scale) / 2.0;
        let centered = self.offset_by(loc.into(), d, d);
        let rim = self.ppt() * SOUPPOT_RIM_OFFSET;
        PixelPoint::new(centered.x, px_floor(f64::from(centered.y) - rim))
    }

    /// Centered container region nested inside the holding region.
    pub fn holding_container_location(&self, loc: impl Into<GridPos>) -> PixelPoint {
        let factor =
            (1.0 - self.holding_scale) + (1.0 - self.container_scale) / 2.0 * self.holding_scale;
        let d = self.ppt() * factor;
        self.offset_by(loc.into(), d, d)
    }

    /// Pot overlay sprite location (tile origin raised by a fixed fraction).
    pub fn pot_sprite_location(&self, loc: impl Into<GridPos>) -> PixelPoint {
        self.offset_by(loc.into(), 0.0, -self.ppt() * POT_SPRITE_OFFSET)
    }
}

#[cfg(test)]
#[path = "../tests/unit/geometry.rs"]
mod tests;

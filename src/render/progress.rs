//! Progress bars: chopping, cooking countdown, burning, fire extinguishing and recipe timers.
//!
//! Bars are computed as plain data first and drawn afterwards, so the fractions can be checked
//! without touching pixels.

use crate::config::Palette;
use crate::foundation::core::{Cell, GridPos, PixelPoint, PixelSize, Rgb8};
use crate::foundation::math::{px_extent, px_floor};
use crate::geometry::GraphicsProperties;
use crate::world::model::{CookState, DynamicFilter, Recipe, StaticKind, WorldView};

/// Bar width at fraction 1.0, as a fraction of a tile.
pub const BAR_WIDTH: f64 = 0.8;
/// Bar height, as a fraction of a tile.
pub const BAR_HEIGHT: f64 = 0.1;
/// Horizontal inset of every bar, as a fraction of a tile.
pub const BAR_INSET_X: f64 = 0.1;
/// Vertical offset of cutboard, pot and recipe bars.
pub const BAR_ROW_Y: f64 = 0.8;
/// Vertical offset of the fire extinguish bar.
pub const FIRE_BAR_ROW_Y: f64 = 0.5;
/// Chops needed to finish cutting an ingredient.
pub const MAX_CHOP_COUNT: u32 = 8;

/// Palette slot a bar is filled with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarTone {
    /// Work done, time left, or fresh order.
    Green,
    /// Order at one to two thirds of its time.
    Yellow,
    /// Order below one third of its time.
    Red,
    /// Burning contents and fire.
    Fire,
}

impl BarTone {
    /// Resolve against a palette.
    pub fn color(self, palette: &Palette) -> Rgb8 {
        match self {
            Self::Green => palette.progress_green,
            Self::Yellow => palette.progress_yellow,
            Self::Red => palette.progress_red,
            Self::Fire => palette.fire,
        }
    }
}

/// Horizontal bar anchored at a pixel, filled to `fraction` of the full bar width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressBar {
    /// Top-left corner.
    pub at: PixelPoint,
    /// Fill fraction; `[0, 1]` for well-formed world data.
    pub fraction: f64,
    /// Fill color slot.
    pub tone: BarTone,
}

impl ProgressBar {
    /// Bar anchored at `base + (0.1, row_y) * tile`.
    pub fn anchored(
        props: &GraphicsProperties,
        base: PixelPoint,
        row_y: f64,
        fraction: f64,
        tone: BarTone,
    ) -> Self {
        let ppt = f64::from(props.pixel_per_tile);
        let at = PixelPoint::new(
            px_floor(f64::from(base.x) + ppt * BAR_INSET_X),
            px_floor(f64::from(base.y) + ppt * row_y),
        );
        Self { at, fraction, tone }
    }

    /// Pixel extent; width is monotonically non-decreasing in `fraction`.
    pub fn size(&self, props: &GraphicsProperties) -> PixelSize {
        let ppt = f64::from(props.pixel_per_tile);
        PixelSize::new(
            px_extent(self.fraction * ppt * BAR_WIDTH),
            px_extent(BAR_HEIGHT * ppt),
        )
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}

/// Chopping bar for the object lying on a cutboard; `None` for objects without a chop count.
pub fn chop_bar(
    props: &GraphicsProperties,
    cell: Cell,
    chop_count: Option<u32>,
) -> Option<ProgressBar> {
    let chops = chop_count?;
    Some(ProgressBar::anchored(
        props,
        props.scaled_location(cell),
        BAR_ROW_Y,
        f64::from(chops) / f64::from(MAX_CHOP_COUNT),
        BarTone::Green,
    ))
}

/// Pot bar: a green countdown while cooking, a fire-colored bar while burning.
pub fn cook_bar(props: &GraphicsProperties, cell: Cell, content: &CookState) -> ProgressBar {
    let progress = f64::from(content.current_progress);
    let (fraction, tone) = if content.current_progress >= 0 {
        let cook_max = f64::from(content.min_progress);
        (ratio(cook_max - progress, cook_max), BarTone::Green)
    } else {
        let overcook_max = f64::from(content.overcooked_progress).abs();
        (ratio(-progress, overcook_max), BarTone::Fire)
    };
    ProgressBar::anchored(props, props.scaled_location(cell), BAR_ROW_Y, fraction, tone)
}

/// Fire extinguish bar drawn over a burning pot's stack base.
pub fn fire_bar(
    props: &GraphicsProperties,
    base: PixelPoint,
    put_count: u32,
    max_put_count: u32,
) -> ProgressBar {
    ProgressBar::anchored(
        props,
        base,
        FIRE_BAR_ROW_Y,
        ratio(f64::from(put_count), f64::from(max_put_count)),
        BarTone::Fire,
    )
}

/// Recipe timer for the recipe shown in info slot `slot`.
pub fn recipe_bar(
    props: &GraphicsProperties,
    slot: GridPos,
    recipe: &Recipe,
) -> ProgressBar {
    let fraction = ratio(
        f64::from(recipe.remaining_time),
        f64::from(recipe.max_remaining_time),
    );
    let tone = if fraction >= 2.0 / 3.0 {
        BarTone::Green
    } else if fraction >= 1.0 / 3.0 {
        BarTone::Yellow
    } else {
        BarTone::Red
    };
    ProgressBar::anchored(props, props.scaled_location(slot), BAR_ROW_Y, fraction, tone)
}

/// Cutboard and pot bars for the whole world, in static-object order.
pub fn progress_overlays(world: &dyn WorldView, props: &GraphicsProperties) -> Vec<ProgressBar> {
    let mut bars = Vec::new();
    for obj in world.static_objects() {
        match &obj.kind {
            StaticKind::CutBoard => {
                let on_board = world.dynamic_objects_at(obj.location, DynamicFilter::Any);
                if let Some(first) = on_board.first()
                    && let Some(bar) = chop_bar(props, obj.location, first.chop_count())
                {
                    bars.push(bar);
                }
            }
            StaticKind::Pot {
                powered: true,
                content,
            } => {
                // Soup on the pot's cell takes precedence over the pot's own record.
                let soup = world.dynamic_objects_at(obj.location, DynamicFilter::SoupContent);
                let state = soup
                    .first()
                    .and_then(|o| o.cook_state())
                    .or(content.as_ref());
                if let Some(state) = state {
                    bars.push(cook_bar(props, obj.location, state));
                }
            }
            _ => {}
        }
    }
    bars
}

#[cfg(test)]
#[path = "../../tests/unit/render/progress.rs"]
mod tests;

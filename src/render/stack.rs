//! Per-cell stacking: turns the dynamic objects sharing one cell into ordered draw ops.
//!
//! Three layouts exist:
//! - container on top: container at the base region, the rest packed into its nested region
//! - pot cell: contents packed into the raised pot region, fire and its bar drawn over them
//! - anything else: everything packed into the base region
//!
//! The base region is the full tile, or the smaller holding region when an agent stands on
//! the cell.

use crate::foundation::core::{Cell, PixelPoint, PixelSize};
use crate::geometry::GraphicsProperties;
use crate::render::progress::{ProgressBar, fire_bar};
use crate::world::model::{DynamicKind, DynamicObject, WorldView};

/// One drawing directive, executed in order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Blit sprite `name` scaled to `size` at `at`.
    Sprite {
        /// Sprite name.
        name: String,
        /// Target size.
        size: PixelSize,
        /// Top-left corner.
        at: PixelPoint,
    },
    /// Fill a progress bar.
    Bar(ProgressBar),
}

impl DrawOp {
    fn sprite(name: &str, size: PixelSize, at: PixelPoint) -> Self {
        Self::Sprite {
            name: name.to_string(),
            size,
            at,
        }
    }
}

/// Facts about a cell the stack layout depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackContext {
    /// Cell shared by the stack.
    pub cell: Cell,
    /// An agent stands on the cell, so the stack is drawn as held.
    pub agent_on_cell: bool,
    /// A pot occupies the cell.
    pub pot_on_cell: bool,
}

/// Base and nested regions of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackRegions {
    /// Size of the base region (tile or holding).
    pub base_size: PixelSize,
    /// Corner of the base region.
    pub base_at: PixelPoint,
    /// Size of the region inside a container.
    pub nested_size: PixelSize,
    /// Corner of the region inside a container.
    pub nested_at: PixelPoint,
}

impl StackRegions {
    /// Regions for `cell`, switching to held geometry when an agent is on it.
    pub fn for_cell(props: &GraphicsProperties, cell: Cell, agent_on_cell: bool) -> Self {
        if agent_on_cell {
            Self {
                base_size: props.holding_size,
                base_at: props.holding_location(cell),
                nested_size: props.holding_container_size,
                nested_at: props.holding_container_location(cell),
            }
        } else {
            Self {
                base_size: props.tile_size,
                base_at: props.scaled_location(cell),
                nested_size: props.container_size,
                nested_at: props.container_location(cell),
            }
        }
    }
}

/// Lay out `n` items in the smallest square grid that holds them.
///
/// The grid side is `floor(sqrt(n - 1)) + 1` (that is `ceil(sqrt(n))`); each sub-cell is the
/// region size divided per axis by the side, and item `i` lands in column `i % side`,
/// row `i / side`.
pub fn pack_grid(n: usize, size: PixelSize, at: PixelPoint) -> Vec<(PixelPoint, PixelSize)> {
    if n == 0 {
        return Vec::new();
    }
    let tiles = (n - 1).isqrt() + 1;
    let cell = PixelSize::new(size.w / tiles as u32, size.h / tiles as u32);
    (0..n)
        .map(|i| {
            let col = (i % tiles) as i32;
            let row = (i / tiles) as i32;
            (at.offset(cell.w as i32 * col, cell.h as i32 * row), cell)
        })
        .collect()
}

fn pack_into(ops: &mut Vec<DrawOp>, items: &[&DynamicObject], size: PixelSize, at: PixelPoint) {
    for (obj, (loc, sub)) in items.iter().zip(pack_grid(items.len(), size, at)) {
        ops.push(DrawOp::sprite(&obj.sprite, sub, loc));
    }
}

/// Resolve the draw ops for one cell's stack.
///
/// `world` supplies the stacking order through [`WorldView::highest_order`].
pub fn resolve_stack(
    world: &dyn WorldView,
    props: &GraphicsProperties,
    stack: &[&DynamicObject],
    ctx: StackContext,
) -> Vec<DrawOp> {
    let Some(top_idx) = world.highest_order(stack).filter(|&i| i < stack.len()) else {
        return Vec::new();
    };
    let top = stack[top_idx];
    let rest: Vec<&DynamicObject> = stack
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != top_idx)
        .map(|(_, obj)| *obj)
        .collect();

    let regions = StackRegions::for_cell(props, ctx.cell, ctx.agent_on_cell);
    let mut ops = Vec::with_capacity(stack.len() + 1);

    match top.kind {
        DynamicKind::Container => {
            ops.push(DrawOp::sprite(&top.sprite, regions.base_size, regions.base_at));
            pack_into(&mut ops, &rest, regions.nested_size, regions.nested_at);
        }
        DynamicKind::Fire {
            put_count,
            max_put_count,
        } if ctx.pot_on_cell => {
            pack_into(
                &mut ops,
                &rest,
                props.souppot_size,
                props.souppot_location(ctx.cell),
            );
            ops.push(DrawOp::sprite(&top.sprite, regions.base_size, regions.base_at));
            ops.push(DrawOp::Bar(fire_bar(
                props,
                regions.base_at,
                put_count,
                max_put_count,
            )));
        }
        _ if ctx.pot_on_cell => {
            pack_into(
                &mut ops,
                stack,
                props.souppot_size,
                props.souppot_location(ctx.cell),
            );
        }
        _ => pack_into(&mut ops, stack, regions.base_size, regions.base_at),
    }
    ops
}

#[cfg(test)]
#[path = "../../tests/unit/render/stack.rs"]
mod tests;

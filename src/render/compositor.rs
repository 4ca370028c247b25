//! One full frame: floor, statics, agents, dynamic stacks, progress bars, info rows.

use std::collections::{BTreeMap, HashSet};

use crate::assets::sprite_cache::SpriteCache;
use crate::config::{Palette, PipelineOpts};
use crate::foundation::core::{Cell, GridPos, PixelPoint, PixelSize};
use crate::foundation::error::RenderResult;
use crate::geometry::GraphicsProperties;
use crate::render::canvas::FrameRGBA;
use crate::render::progress::{ProgressBar, progress_overlays, recipe_bar};
use crate::render::stack::{DrawOp, StackContext, resolve_stack};
use crate::render::text::StatusText;
use crate::world::model::{DynamicObject, StaticKind, WorldView};

/// Row offset of the status line below the last grid row.
const STATUS_ROW_OFFSET: f64 = 1.5;

/// Draws world snapshots into a frame buffer, layer by layer.
///
/// Owns the sprite cache, so sprites decoded for one frame are reused by every later frame
/// composed by the same instance.
pub struct Compositor {
    props: GraphicsProperties,
    palette: Palette,
    max_steps: u64,
    sprites: SpriteCache,
    status: Option<StatusText>,
}

impl Compositor {
    /// Compositor for `props`, loading the status font from `opts` when one is configured.
    pub fn new(props: GraphicsProperties, opts: &PipelineOpts) -> RenderResult<Self> {
        let status = match &opts.font_path {
            Some(path) => Some(StatusText::load(path, opts.font_size_px, opts.palette.text)?),
            None => {
                tracing::debug!("no font_path configured, status line disabled");
                None
            }
        };
        Ok(Self {
            props,
            palette: opts.palette.clone(),
            max_steps: opts.max_steps,
            sprites: SpriteCache::new(opts.graphics_root()),
            status,
        })
    }

    /// Geometry used for every layer.
    pub fn props(&self) -> &GraphicsProperties {
        &self.props
    }

    /// Sprite cache shared by every frame.
    pub fn sprite_cache(&self) -> &SpriteCache {
        &self.sprites
    }

    /// Status line text for the current world state.
    pub fn status_line(&self, world: &dyn WorldView) -> String {
        let time_left = self.max_steps.saturating_sub(world.elapsed_ticks());
        format!(
            "score: {}              time_left: {}",
            world.total_score(),
            time_left
        )
    }

    /// Overwrite `frame` with the full picture of `world`.
    pub fn compose(&mut self, world: &dyn WorldView, frame: &mut FrameRGBA) -> RenderResult<()> {
        frame.fill(self.palette.floor);
        self.draw_statics(world, frame)?;
        self.draw_agents(world, frame)?;
        self.draw_dynamics(world, frame)?;
        for bar in progress_overlays(world, &self.props) {
            self.draw_bar(frame, &bar);
        }
        self.draw_info(world, frame)
    }

    fn draw_statics(&mut self, world: &dyn WorldView, frame: &mut FrameRGBA) -> RenderResult<()> {
        let tile = self.props.tile_size;
        for obj in world.static_objects() {
            let at = self.props.scaled_location(obj.location);
            match obj.kind {
                StaticKind::DeliverySquare => frame.fill_rect(at, tile, self.palette.delivery),
                _ => {
                    frame.fill_rect(at, tile, self.palette.counter);
                    frame.stroke_rect(at, tile, self.palette.counter_border);
                }
            }

            let Some(sprite) = obj.sprite() else {
                continue;
            };
            let sprite_at = if obj.is_pot() {
                self.props.pot_sprite_location(obj.location)
            } else {
                at
            };
            self.blit(frame, sprite, tile, sprite_at)?;
        }
        Ok(())
    }

    fn draw_agents(&mut self, world: &dyn WorldView, frame: &mut FrameRGBA) -> RenderResult<()> {
        for agent in world.agents() {
            let name = agent.sprite_name()?;
            let at = self.props.scaled_location(agent.location);
            self.blit(frame, &name, self.props.tile_size, at)?;
        }
        Ok(())
    }

    fn draw_dynamics(&mut self, world: &dyn WorldView, frame: &mut FrameRGBA) -> RenderResult<()> {
        let (grid_w, grid_h) = world.grid_size();
        let in_grid = |c: Cell| {
            u32::try_from(c.x).is_ok_and(|x| x < grid_w)
                && u32::try_from(c.y).is_ok_and(|y| y < grid_h)
        };

        let mut stacks: BTreeMap<(i32, i32), Vec<&DynamicObject>> = BTreeMap::new();
        for obj in world.dynamic_objects() {
            if !in_grid(obj.location) {
                tracing::debug!(
                    cell = %obj.location,
                    sprite = %obj.sprite,
                    "skipping out-of-grid object"
                );
                continue;
            }
            stacks
                .entry((obj.location.y, obj.location.x))
                .or_default()
                .push(obj);
        }

        let agent_cells: HashSet<Cell> = world.agents().iter().map(|a| a.location).collect();
        let pot_cells: HashSet<Cell> = world
            .static_objects()
            .iter()
            .filter(|o| o.is_pot())
            .map(|o| o.location)
            .collect();

        for ((y, x), stack) in stacks {
            let cell = Cell::new(x, y);
            let ctx = StackContext {
                cell,
                agent_on_cell: agent_cells.contains(&cell),
                pot_on_cell: pot_cells.contains(&cell),
            };
            for op in resolve_stack(world, &self.props, &stack, ctx) {
                match op {
                    DrawOp::Sprite { name, size, at } => self.blit(frame, &name, size, at)?,
                    DrawOp::Bar(bar) => self.draw_bar(frame, &bar),
                }
            }
        }
        Ok(())
    }

    fn draw_info(&mut self, world: &dyn WorldView, frame: &mut FrameRGBA) -> RenderResult<()> {
        let (_, grid_h) = world.grid_size();
        let info_row = f64::from(grid_h);

        for (i, recipe) in world.recipes().iter().enumerate() {
            let slot = GridPos::new(i as f64, info_row);
            let at = self.props.souppot_location(slot);
            self.blit(frame, &recipe.sprite, self.props.souppot_size, at)?;
            self.draw_bar(frame, &recipe_bar(&self.props, slot, recipe));
        }

        let line = self.status_line(world);
        if let Some(status) = self.status.as_mut() {
            let at = self
                .props
                .scaled_location(GridPos::new(0.0, info_row + STATUS_ROW_OFFSET));
            status.draw(frame, &line, at)?;
        }
        Ok(())
    }

    fn blit(
        &mut self,
        frame: &mut FrameRGBA,
        name: &str,
        size: PixelSize,
        at: PixelPoint,
    ) -> RenderResult<()> {
        if size.is_empty() {
            return Ok(());
        }
        let sprite = self.sprites.get(name, size)?;
        frame.blit(&sprite, at);
        Ok(())
    }

    fn draw_bar(&self, frame: &mut FrameRGBA, bar: &ProgressBar) {
        let size = bar.size(&self.props);
        if size.is_empty() {
            return;
        }
        frame.fill_rect(bar.at, size, bar.tone.color(&self.palette));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;

use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{RenderError, RenderResult};
use crate::world::model::{
    Agent, DynamicKind, DynamicObject, Recipe, StaticKind, StaticObject, WorldView,
};

/// Owned world state captured at one tick, loadable from JSON.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorldSnapshot {
    /// Grid width in tiles.
    pub width: u32,
    /// Grid height in tiles.
    pub height: u32,
    /// Static objects.
    #[serde(default)]
    pub static_objects: Vec<StaticObject>,
    /// Dynamic objects.
    #[serde(default)]
    pub dynamic_objects: Vec<DynamicObject>,
    /// Agents.
    #[serde(default)]
    pub agents: Vec<Agent>,
    /// Active recipes.
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    /// Accumulated score.
    #[serde(default)]
    pub score: i64,
    /// Elapsed ticks.
    #[serde(default)]
    pub t: u64,
}

impl WorldSnapshot {
    /// Empty snapshot of the given grid size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Load and validate a snapshot from a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read snapshot '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a snapshot from a JSON string.
    pub fn from_json_str(text: &str) -> RenderResult<Self> {
        let snap: Self =
            serde_json::from_str(text).map_err(|e| RenderError::serde(e.to_string()))?;
        snap.validate()?;
        Ok(snap)
    }

    /// Reject data that would make progress ratios meaningless.
    ///
    /// Out-of-grid locations are accepted; the compositor skips them.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::validation("snapshot grid must be non-empty"));
        }
        for r in &self.recipes {
            if r.max_remaining_time == 0 {
                return Err(RenderError::validation(format!(
                    "recipe '{}' has max_remaining_time 0",
                    r.sprite
                )));
            }
        }
        for o in &self.dynamic_objects {
            if let DynamicKind::Fire { max_put_count, .. } = o.kind
                && max_put_count == 0
            {
                return Err(RenderError::validation(format!(
                    "fire at {} has max_put_count 0",
                    o.location
                )));
            }
        }
        for o in &self.static_objects {
            if let StaticKind::Pot {
                content: Some(c), ..
            } = &o.kind
                && (c.min_progress <= 0 || c.overcooked_progress >= 0)
            {
                return Err(RenderError::validation(format!(
                    "pot at {} needs min_progress > 0 and overcooked_progress < 0",
                    o.location
                )));
            }
        }
        Ok(())
    }
}

impl WorldView for WorldSnapshot {
    fn grid_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn static_objects(&self) -> &[StaticObject] {
        &self.static_objects
    }

    fn dynamic_objects(&self) -> &[DynamicObject] {
        &self.dynamic_objects
    }

    fn agents(&self) -> &[Agent] {
        &self.agents
    }

    fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    fn total_score(&self) -> i64 {
        self.score
    }

    fn elapsed_ticks(&self) -> u64 {
        self.t
    }
}

#[cfg(test)]
#[path = "../../tests/unit/world/snapshot.rs"]
mod tests;

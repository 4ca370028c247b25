use crate::foundation::core::Cell;
use crate::foundation::error::{RenderError, RenderResult};

/// Signed cook progress of pot contents.
///
/// `current_progress` counts up to `min_progress` while cooking; once it turns negative the
/// contents are burning and `overcooked_progress` (negative) is the point where they are lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CookState {
    /// Signed progress; `>= 0` cooking, `< 0` burning.
    pub current_progress: i32,
    /// Progress at which the contents are done.
    pub min_progress: i32,
    /// Negative threshold at which burning contents are lost.
    pub overcooked_progress: i32,
}

/// Closed set of static tile kinds.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StaticKind {
    /// Plain counter, drawn without a sprite.
    Counter,
    /// Delivery window.
    DeliverySquare,
    /// Bin that discards items.
    Dustbin,
    /// Chopping station.
    CutBoard,
    /// Blender station.
    Blender,
    /// Ingredient dispenser.
    Station,
    /// Cooking pot. `powered` pots advance the cook state of their content.
    Pot {
        /// Whether the stove under the pot is on.
        #[serde(default)]
        powered: bool,
        /// Cook state of what is currently in the pot.
        #[serde(default)]
        content: Option<CookState>,
    },
}

impl StaticKind {
    fn default_sprite(&self) -> Option<&'static str> {
        match self {
            Self::Counter => None,
            Self::DeliverySquare => Some("delivery"),
            Self::Dustbin => Some("dustbin"),
            Self::CutBoard => Some("cutboard"),
            Self::Blender => Some("blender"),
            Self::Station => Some("station"),
            Self::Pot { .. } => Some("pot"),
        }
    }
}

/// Static object occupying one tile.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StaticObject {
    /// Grid cell.
    pub location: Cell,
    /// Sprite name override; kinds other than counters fall back to a fixed name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    /// Kind-specific data.
    #[serde(flatten)]
    pub kind: StaticKind,
}

impl StaticObject {
    /// Build a static object using the kind's default sprite.
    pub fn new(location: Cell, kind: StaticKind) -> Self {
        Self {
            location,
            sprite: None,
            kind,
        }
    }

    /// Overlay sprite name; `None` for plain counters.
    pub fn sprite(&self) -> Option<&str> {
        match self.kind {
            StaticKind::Counter => None,
            _ => self.sprite.as_deref().or(self.kind.default_sprite()),
        }
    }

    /// Return `true` for pots.
    pub fn is_pot(&self) -> bool {
        matches!(self.kind, StaticKind::Pot { .. })
    }
}

/// Closed set of movable object kinds.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DynamicKind {
    /// Plate, bowl or other container that holds items.
    Container,
    /// Ingredient; `chop_count` counts cuts made on a cutboard.
    Food {
        /// Chops applied so far.
        #[serde(default)]
        chop_count: u32,
    },
    /// Pot fire; extinguished after `max_put_count` puts.
    Fire {
        /// Extinguish actions applied so far.
        put_count: u32,
        /// Extinguish actions needed.
        max_put_count: u32,
    },
    /// Soup being cooked in a pot; its state drives the pot's progress bar.
    SoupContent(CookState),
}

/// Filter used by [`WorldView::dynamic_objects_at`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DynamicFilter {
    /// Every dynamic object.
    Any,
    /// Containers only.
    Container,
    /// Food only.
    Food,
    /// Fire only.
    Fire,
    /// Soup contents only.
    SoupContent,
}

impl DynamicFilter {
    /// Return `true` when `kind` passes the filter.
    pub fn matches(self, kind: &DynamicKind) -> bool {
        matches!(
            (self, kind),
            (Self::Any, _)
                | (Self::Container, DynamicKind::Container)
                | (Self::Food, DynamicKind::Food { .. })
                | (Self::Fire, DynamicKind::Fire { .. })
                | (Self::SoupContent, DynamicKind::SoupContent(_))
        )
    }
}

/// Movable object on the grid or in an agent's hands.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DynamicObject {
    /// Grid cell.
    pub location: Cell,
    /// Sprite name.
    pub sprite: String,
    /// Kind-specific data.
    #[serde(flatten)]
    pub kind: DynamicKind,
}

impl DynamicObject {
    /// Build a dynamic object.
    pub fn new(location: Cell, sprite: impl Into<String>, kind: DynamicKind) -> Self {
        Self {
            location,
            sprite: sprite.into(),
            kind,
        }
    }

    /// Chop count for food; `None` for every other kind.
    pub fn chop_count(&self) -> Option<u32> {
        match self.kind {
            DynamicKind::Food { chop_count } => Some(chop_count),
            _ => None,
        }
    }

    /// Cook state for soup contents; `None` for every other kind.
    pub fn cook_state(&self) -> Option<&CookState> {
        match &self.kind {
            DynamicKind::SoupContent(state) => Some(state),
            _ => None,
        }
    }
}

/// Facing direction of an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Code 1.
    Left,
    /// Code 2.
    Right,
    /// Code 3.
    Down,
    /// Code 4.
    Up,
}

impl Orientation {
    /// Decode the world model's orientation code.
    pub fn from_code(code: i32) -> RenderResult<Self> {
        match code {
            1 => Ok(Self::Left),
            2 => Ok(Self::Right),
            3 => Ok(Self::Down),
            4 => Ok(Self::Up),
            other => Err(RenderError::contract(format!(
                "agent orientation invalid ({other})"
            ))),
        }
    }

    /// Sprite token for this direction.
    pub fn token(self) -> &'static str {
        match self {
            Self::Left => "arrow_left",
            Self::Right => "arrow_right",
            Self::Down => "arrow_down",
            Self::Up => "arrow_up",
        }
    }
}

/// Agent as exposed by the world model.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Agent {
    /// Grid cell.
    pub location: Cell,
    /// Raw orientation code (1 left, 2 right, 3 down, 4 up).
    pub orientation: i32,
    /// Color identifier used in the agent's sprite name.
    pub color: String,
}

impl Agent {
    /// Decoded facing direction.
    pub fn facing(&self) -> RenderResult<Orientation> {
        Orientation::from_code(self.orientation)
    }

    /// Sprite name `agent-<color>-<arrow token>`.
    pub fn sprite_name(&self) -> RenderResult<String> {
        Ok(format!("agent-{}-{}", self.color, self.facing()?.token()))
    }
}

/// Active order shown in the info row.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Recipe {
    /// Icon sprite name.
    pub sprite: String,
    /// Ticks left before the order expires.
    pub remaining_time: u32,
    /// Ticks the order started with.
    pub max_remaining_time: u32,
}

/// Read-only view of the simulation consumed once per frame.
///
/// The default methods derive per-cell queries and the stacking order from the bulk
/// accessors; implementors may override them with indexed lookups.
pub trait WorldView {
    /// Grid `(width, height)` in tiles.
    fn grid_size(&self) -> (u32, u32);

    /// Every static object.
    fn static_objects(&self) -> &[StaticObject];

    /// Every dynamic object, including held ones.
    fn dynamic_objects(&self) -> &[DynamicObject];

    /// Agents in draw order.
    fn agents(&self) -> &[Agent];

    /// Active recipes in display order.
    fn recipes(&self) -> &[Recipe];

    /// Accumulated score.
    fn total_score(&self) -> i64;

    /// Ticks elapsed in the episode.
    fn elapsed_ticks(&self) -> u64;

    /// Dynamic objects on `cell` that pass `filter`, in world order.
    fn dynamic_objects_at(&self, cell: Cell, filter: DynamicFilter) -> Vec<&DynamicObject> {
        self.dynamic_objects()
            .iter()
            .filter(|o| o.location == cell && filter.matches(&o.kind))
            .collect()
    }

    /// Rank in the stacking order; higher ranks are drawn as the stack's base.
    fn order_rank(&self, obj: &DynamicObject) -> u8 {
        match obj.kind {
            DynamicKind::Container => 3,
            DynamicKind::Fire { .. } => 2,
            DynamicKind::SoupContent(_) => 1,
            DynamicKind::Food { .. } => 0,
        }
    }

    /// Index of the highest-order object in `stack`; the first one wins ties.
    fn highest_order(&self, stack: &[&DynamicObject]) -> Option<usize> {
        let mut best: Option<(usize, u8)> = None;
        for (idx, obj) in stack.iter().enumerate() {
            let rank = self.order_rank(obj);
            if best.is_none_or(|(_, r)| rank > r) {
                best = Some((idx, rank));
            }
        }
        best.map(|(idx, _)| idx)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/world/model.rs"]
mod tests;

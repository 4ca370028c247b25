use super::*;
use crate::config::PipelineOpts;
use crate::render::progress::BarTone;
use crate::world::model::{Agent, Recipe, StaticObject};
use crate::world::snapshot::WorldSnapshot;

fn props() -> GraphicsProperties {
    GraphicsProperties::new(3, 3, &PipelineOpts::default()).unwrap()
}

fn obj(cell: Cell, sprite: &str, kind: DynamicKind) -> DynamicObject {
    DynamicObject::new(cell, sprite, kind)
}

fn food(cell: Cell, sprite: &str) -> DynamicObject {
    obj(cell, sprite, DynamicKind::Food { chop_count: 0 })
}

fn sprite_op(name: &str, size: u32, x: i32, y: i32) -> DrawOp {
    DrawOp::Sprite {
        name: name.to_string(),
        size: PixelSize::square(size),
        at: PixelPoint::new(x, y),
    }
}

fn ctx(cell: Cell, agent_on_cell: bool, pot_on_cell: bool) -> StackContext {
    StackContext {
        cell,
        agent_on_cell,
        pot_on_cell,
    }
}

#[test]
fn pack_single_item_fills_region() {
    let packed = pack_grid(1, PixelSize::square(45), PixelPoint::new(90, 45));
    assert_eq!(
        packed,
        vec![(PixelPoint::new(90, 45), PixelSize::square(45))]
    );
}

#[test]
fn pack_four_items_is_two_by_two() {
    let packed = pack_grid(4, PixelSize::square(40), PixelPoint::new(0, 0));
    let sub = PixelSize::square(20);
    assert_eq!(
        packed,
        vec![
            (PixelPoint::new(0, 0), sub),
            (PixelPoint::new(20, 0), sub),
            (PixelPoint::new(0, 20), sub),
            (PixelPoint::new(20, 20), sub),
        ]
    );
}

#[test]
fn pack_grid_side_is_ceil_sqrt() {
    for (n, side) in [(1, 1), (2, 2), (4, 2), (5, 3), (9, 3), (10, 4), (16, 4), (17, 5)] {
        let packed = pack_grid(n, PixelSize::square(60), PixelPoint::new(0, 0));
        assert_eq!(packed.len(), n);
        assert_eq!(packed[0].1, PixelSize::square(60 / side), "n = {n}");
    }
    assert!(pack_grid(0, PixelSize::square(60), PixelPoint::new(0, 0)).is_empty());
}

#[test]
fn packed_cells_never_overlap_and_stay_inside() {
    let region = PixelSize::square(45);
    for n in 1..=30usize {
        let packed = pack_grid(n, region, PixelPoint::new(10, 20));
        for (i, (a, sa)) in packed.iter().enumerate() {
            assert!(a.x >= 10 && a.y >= 20);
            assert!(a.x + sa.w as i32 <= 55 && a.y + sa.h as i32 <= 65);
            for (b, sb) in packed.iter().skip(i + 1) {
                let disjoint = a.x + sa.w as i32 <= b.x
                    || b.x + sb.w as i32 <= a.x
                    || a.y + sa.h as i32 <= b.y
                    || b.y + sb.h as i32 <= a.y;
                assert!(disjoint, "n = {n}: {a:?} overlaps {b:?}");
            }
        }
    }
}

#[test]
fn container_on_tile_nests_contents() {
    let world = WorldSnapshot::new(3, 3);
    let c = Cell::new(1, 1);
    let tomato = food(c, "tomato");
    let plate = obj(c, "plate", DynamicKind::Container);
    let onion = food(c, "onion");

    let ops = resolve_stack(&world, &props(), &[&tomato, &plate, &onion], ctx(c, false, false));
    assert_eq!(
        ops,
        vec![
            sprite_op("plate", 45, 45, 45),
            sprite_op("tomato", 15, 51, 51),
            sprite_op("onion", 15, 66, 51),
        ]
    );
}

#[test]
fn held_container_uses_holding_geometry() {
    let world = WorldSnapshot::new(3, 3);
    let c = Cell::new(1, 1);
    let plate = obj(c, "plate", DynamicKind::Container);
    let lettuce = food(c, "lettuce");

    let ops = resolve_stack(&world, &props(), &[&plate, &lettuce], ctx(c, true, false));
    assert_eq!(
        ops,
        vec![
            sprite_op("plate", 22, 67, 67),
            sprite_op("lettuce", 15, 70, 70),
        ]
    );
}

#[test]
fn empty_container_draws_alone() {
    let world = WorldSnapshot::new(3, 3);
    let c = Cell::new(0, 0);
    let plate = obj(c, "plate", DynamicKind::Container);
    let ops = resolve_stack(&world, &props(), &[&plate], ctx(c, false, false));
    assert_eq!(ops, vec![sprite_op("plate", 45, 0, 0)]);
}

#[test]
fn pot_contents_use_raised_pot_region() {
    let world = WorldSnapshot::new(3, 3);
    let c = Cell::new(2, 2);
    let onion = food(c, "onion");
    let ops = resolve_stack(&world, &props(), &[&onion], ctx(c, false, true));
    assert_eq!(ops, vec![sprite_op("onion", 40, 92, 89)]);
}

#[test]
fn burning_pot_draws_contents_then_fire_then_bar() {
    let world = WorldSnapshot::new(3, 3);
    let c = Cell::new(2, 2);
    let soup = food(c, "onion");
    let fire = obj(
        c,
        "fire",
        DynamicKind::Fire {
            put_count: 1,
            max_put_count: 3,
        },
    );

    let ops = resolve_stack(&world, &props(), &[&soup, &fire], ctx(c, false, true));
    assert_eq!(ops.len(), 3);
    assert_eq!(ops[0], sprite_op("onion", 40, 92, 89));
    assert_eq!(ops[1], sprite_op("fire", 45, 90, 90));
    let DrawOp::Bar(bar) = &ops[2] else {
        panic!("expected fire bar, got {:?}", ops[2]);
    };
    assert_eq!(bar.tone, BarTone::Fire);
    assert_eq!(bar.at, PixelPoint::new(94, 112));
    assert!((bar.fraction - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn fire_alone_in_pot_has_no_contents() {
    let world = WorldSnapshot::new(3, 3);
    let c = Cell::new(2, 2);
    let fire = obj(
        c,
        "fire",
        DynamicKind::Fire {
            put_count: 0,
            max_put_count: 3,
        },
    );
    let ops = resolve_stack(&world, &props(), &[&fire], ctx(c, false, true));
    assert_eq!(ops[0], sprite_op("fire", 45, 90, 90));
    assert_eq!(ops.len(), 2);
}

#[test]
fn loose_items_pack_into_tile() {
    let world = WorldSnapshot::new(3, 3);
    let c = Cell::new(0, 1);
    let a = food(c, "tomato");
    let b = food(c, "onion");
    let ops = resolve_stack(&world, &props(), &[&a, &b], ctx(c, false, false));
    assert_eq!(
        ops,
        vec![
            sprite_op("tomato", 22, 0, 45),
            sprite_op("onion", 22, 22, 45),
        ]
    );
}

#[test]
fn held_loose_item_uses_holding_region() {
    let world = WorldSnapshot::new(3, 3);
    let c = Cell::new(0, 1);
    let a = food(c, "tomato");
    let ops = resolve_stack(&world, &props(), &[&a], ctx(c, true, false));
    assert_eq!(ops, vec![sprite_op("tomato", 22, 22, 67)]);
}

#[test]
fn empty_stack_resolves_to_nothing() {
    let world = WorldSnapshot::new(3, 3);
    assert!(resolve_stack(&world, &props(), &[], ctx(Cell::new(0, 0), false, false)).is_empty());
}

struct FoodFirst(WorldSnapshot);

impl WorldView for FoodFirst {
    fn grid_size(&self) -> (u32, u32) {
        self.0.grid_size()
    }
    fn static_objects(&self) -> &[StaticObject] {
        self.0.static_objects()
    }
    fn dynamic_objects(&self) -> &[DynamicObject] {
        self.0.dynamic_objects()
    }
    fn agents(&self) -> &[Agent] {
        self.0.agents()
    }
    fn recipes(&self) -> &[Recipe] {
        self.0.recipes()
    }
    fn total_score(&self) -> i64 {
        0
    }
    fn elapsed_ticks(&self) -> u64 {
        0
    }
    fn order_rank(&self, obj: &DynamicObject) -> u8 {
        match obj.kind {
            DynamicKind::Food { .. } => 9,
            _ => 0,
        }
    }
}

#[test]
fn stacking_order_comes_from_the_world() {
    let world = FoodFirst(WorldSnapshot::new(3, 3));
    let c = Cell::new(0, 0);
    let plate = obj(c, "plate", DynamicKind::Container);
    let tomato = food(c, "tomato");
    let ops = resolve_stack(&world, &props(), &[&plate, &tomato], ctx(c, false, false));
    // No container on top: both objects are packed as loose items.
    assert_eq!(
        ops,
        vec![sprite_op("plate", 22, 0, 0), sprite_op("tomato", 22, 22, 0)]
    );
}

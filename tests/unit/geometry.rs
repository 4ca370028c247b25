use super::*;
use crate::foundation::core::Cell;

fn props_3x3() -> GraphicsProperties {
    GraphicsProperties::new(3, 3, &PipelineOpts::default()).unwrap()
}

#[test]
fn derived_sizes_follow_default_scales() {
    let p = props_3x3();
    assert_eq!(p.tile_size, PixelSize::square(45));
    assert_eq!(p.holding_size, PixelSize::square(22));
    assert_eq!(p.container_size, PixelSize::square(31));
    assert_eq!(p.holding_container_size, PixelSize::square(15));
    assert_eq!(p.souppot_size, PixelSize::square(40));
    assert_eq!(
        p.canvas,
        Canvas {
            width: 135,
            height: 225
        }
    );
}

#[test]
fn scaled_location_is_exact_multiple() {
    let p = props_3x3();
    for x in -2..6 {
        for y in -2..6 {
            assert_eq!(
                p.scaled_location(Cell::new(x, y)),
                PixelPoint::new(45 * x, 45 * y)
            );
        }
    }
}

#[test]
fn derived_locations_keep_fixed_offsets_from_scaled() {
    let p = props_3x3();
    for x in 0..5 {
        for y in 0..5 {
            let c = Cell::new(x, y);
            let base = p.scaled_location(c);
            assert_eq!(p.holding_location(c), base.offset(22, 22));
            assert_eq!(p.container_location(c), base.offset(6, 6));
            assert_eq!(p.holding_container_location(c), base.offset(25, 25));
            assert_eq!(p.souppot_location(c), base.offset(2, -1));
            assert_eq!(p.pot_sprite_location(c), base.offset(0, -4));
        }
    }
}

#[test]
fn fractional_rows_map_below_grid() {
    let p = props_3x3();
    assert_eq!(
        p.scaled_location(GridPos::new(0.0, 4.5)),
        PixelPoint::new(0, 202)
    );
    assert_eq!(
        p.souppot_location(GridPos::new(1.0, 3.0)),
        PixelPoint::new(47, 134)
    );
}

#[test]
fn other_tile_sizes_scale_exactly() {
    let opts = PipelineOpts {
        pixel_per_tile: 40,
        ..Default::default()
    };
    let p = GraphicsProperties::new(2, 5, &opts).unwrap();
    assert_eq!(p.holding_size, PixelSize::square(20));
    assert_eq!(p.holding_location(Cell::new(1, 1)), PixelPoint::new(60, 60));
    assert_eq!(
        p.canvas,
        Canvas {
            width: 80,
            height: 280
        }
    );
}

#[test]
fn empty_grid_is_rejected() {
    let err = GraphicsProperties::new(0, 3, &PipelineOpts::default()).unwrap_err();
    assert!(matches!(err, RenderError::Validation(_)));
}

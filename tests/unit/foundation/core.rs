use super::*;

#[test]
fn cell_serde_is_a_pair() {
    let c: Cell = serde_json::from_str("[3, 4]").unwrap();
    assert_eq!(c, Cell::new(3, 4));
    assert_eq!(serde_json::to_string(&c).unwrap(), "[3,4]");
}

#[test]
fn rgb8_serde_and_rgba() {
    let c: Rgb8 = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, Rgb8::new(1, 2, 3));
    assert_eq!(c.to_rgba8(), [1, 2, 3, 255]);
}

#[test]
fn grid_pos_from_cell() {
    let p = GridPos::from(Cell::new(-2, 7));
    assert_eq!(p, GridPos::new(-2.0, 7.0));
}

#[test]
fn pixel_helpers() {
    assert_eq!(PixelPoint::new(1, 2).offset(3, -4), PixelPoint::new(4, -2));
    assert!(PixelSize::new(0, 3).is_empty());
    assert!(!PixelSize::square(1).is_empty());
}

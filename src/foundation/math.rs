pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Truncate a pixel-space value to the integer grid.
///
/// Uses `floor` so negative offsets (sprites raised above row 0) stay consistent.
pub(crate) fn px_floor(v: f64) -> i32 {
    v.floor() as i32
}

/// Non-negative pixel extent, floored.
pub(crate) fn px_extent(v: f64) -> u32 {
    v.floor().max(0.0) as u32
}

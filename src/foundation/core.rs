use std::fmt;

/// Integer grid cell `(x, y)`; `x` grows to the right, `y` grows downwards.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Cell {
    /// Construct a cell from column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Cell {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Cell> for [i32; 2] {
    fn from(c: Cell) -> Self {
        [c.x, c.y]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid position that may be fractional (UI rows below the playfield use half rows).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPos {
    /// Column, in tiles.
    pub x: f64,
    /// Row, in tiles.
    pub y: f64,
}

impl GridPos {
    /// Construct a grid position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Cell> for GridPos {
    fn from(c: Cell) -> Self {
        Self {
            x: f64::from(c.x),
            y: f64::from(c.y),
        }
    }
}

/// Top-left pixel coordinate in canvas space. May be negative (partially off-canvas).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    /// Horizontal pixel offset.
    pub x: i32,
    /// Vertical pixel offset.
    pub y: i32,
}

impl PixelPoint {
    /// Construct a pixel point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)` pixels.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Pixel extent `(width, height)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl PixelSize {
    /// Construct a pixel size.
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Square size with side `side`.
    pub const fn square(side: u32) -> Self {
        Self { w: side, h: side }
    }

    /// Return `true` when either side is zero.
    pub const fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Opaque RGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct an opaque color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA8 form (premultiplied and straight alpha coincide).
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

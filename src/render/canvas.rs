use std::path::Path;

use anyhow::Context;

use crate::assets::decode::Sprite;
use crate::foundation::core::{Canvas, PixelPoint, PixelSize, Rgb8};
use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied RGBA8.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Composite premultiplied `src` over `dst`; both must be equal-length RGBA8 buffers.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> RenderResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RenderError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// A composited frame as RGBA8 pixels.
///
/// Frames are opaque: every pixel is written by the background fill first, so straight and
/// premultiplied alpha coincide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

/// Three-channel observation laid out row-major as `(height, width, 3)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbArray {
    /// Rows.
    pub height: u32,
    /// Columns.
    pub width: u32,
    /// `height * width * 3` bytes.
    pub data: Vec<u8>,
}

impl RgbArray {
    /// Shape as `[height, width, channels]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.height as usize, self.width as usize, 3]
    }

    /// RGB triple at row `y`, column `x`.
    pub fn get(&self, y: u32, x: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }
}

impl FrameRGBA {
    /// Allocate a frame filled with `color`.
    pub fn new(canvas: Canvas, color: Rgb8) -> Self {
        let len = canvas.width as usize * canvas.height as usize * 4;
        let mut frame = Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; len],
        };
        frame.fill(color);
        frame
    }

    /// Canvas dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Overwrite every pixel.
    pub fn fill(&mut self, color: Rgb8) {
        let rgba = color.to_rgba8();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// RGBA at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Clip a rectangle to the frame, returning `(x0, y0, x1, y1)` half-open.
    fn clip(&self, at: PixelPoint, size: PixelSize) -> Option<(u32, u32, u32, u32)> {
        let x0 = i64::from(at.x).max(0);
        let y0 = i64::from(at.y).max(0);
        let x1 = (i64::from(at.x) + i64::from(size.w)).min(i64::from(self.width));
        let y1 = (i64::from(at.y) + i64::from(size.h)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Fill an axis-aligned rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, at: PixelPoint, size: PixelSize, color: Rgb8) {
        let Some((x0, y0, x1, y1)) = self.clip(at, size) else {
            return;
        };
        let rgba = color.to_rgba8();
        for y in y0..y1 {
            let start = self.index(x0, y);
            let end = self.index(x1, y);
            for px in self.data[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    /// Draw a 1px outline inside the rectangle.
    pub fn stroke_rect(&mut self, at: PixelPoint, size: PixelSize, color: Rgb8) {
        if size.is_empty() {
            return;
        }
        let bottom = at.offset(0, size.h as i32 - 1);
        let right = at.offset(size.w as i32 - 1, 0);
        self.fill_rect(at, PixelSize::new(size.w, 1), color);
        self.fill_rect(bottom, PixelSize::new(size.w, 1), color);
        self.fill_rect(at, PixelSize::new(1, size.h), color);
        self.fill_rect(right, PixelSize::new(1, size.h), color);
    }

    /// Composite a premultiplied sprite with its top-left corner at `at`.
    pub fn blit(&mut self, sprite: &Sprite, at: PixelPoint) {
        let size = PixelSize::new(sprite.width, sprite.height);
        let Some((x0, y0, x1, y1)) = self.clip(at, size) else {
            return;
        };
        let src = sprite.rgba8_premul.as_slice();
        for y in y0..y1 {
            let sy = (i64::from(y) - i64::from(at.y)) as usize;
            for x in x0..x1 {
                let sx = (i64::from(x) - i64::from(at.x)) as usize;
                let si = (sy * sprite.width as usize + sx) * 4;
                let di = self.index(x, y);
                let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
                let d = [
                    self.data[di],
                    self.data[di + 1],
                    self.data[di + 2],
                    self.data[di + 3],
                ];
                self.data[di..di + 4].copy_from_slice(&over(d, s));
            }
        }
    }

    /// Composite a full-frame premultiplied layer (e.g. rasterized text).
    pub fn composite_layer(&mut self, layer: &[u8]) -> RenderResult<()> {
        over_in_place(&mut self.data, layer)
    }

    /// Drop alpha and lay the pixels out as `(height, width, 3)`.
    pub fn to_rgb_array(&self) -> RgbArray {
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for px in self.data.chunks_exact(4) {
            data.extend_from_slice(&px[..3]);
        }
        RgbArray {
            height: self.height,
            width: self.width,
            data,
        }
    }

    /// Encode as PNG at `path`.
    pub fn save_png(&self, path: &Path) -> RenderResult<()> {
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;

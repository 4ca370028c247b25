use std::sync::Arc;

use crate::foundation::core::PixelSize;
use crate::foundation::error::{RenderError, RenderResult};

/// Decoded, pre-scaled sprite in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> RenderResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| RenderError::asset(format!("decode image from memory: {e}")))?;
    Ok(dyn_img.to_rgba8())
}

/// Scale `base` to exactly `size` (nearest neighbour) and premultiply.
pub fn scale_to_sprite(base: &image::RgbaImage, size: PixelSize) -> RenderResult<Sprite> {
    if size.is_empty() {
        return Err(RenderError::validation(format!(
            "sprite size must be non-empty, got {}x{}",
            size.w, size.h
        )));
    }

    let scaled = if base.dimensions() == (size.w, size.h) {
        base.clone()
    } else {
        image::imageops::resize(base, size.w, size.h, image::imageops::FilterType::Nearest)
    };

    let mut rgba8_premul = scaled.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(Sprite {
        width: size.w,
        height: size.h,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

use std::path::Path;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{RenderError, RenderResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Font bytes loaded once per pipeline plus the registered family name.
pub(crate) struct LoadedFont {
    pub(crate) bytes: Vec<u8>,
    pub(crate) family: String,
}

/// Stateful helper for building Parley text layouts from a single font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Read a TTF/OTF file and register it with the font collection.
    pub(crate) fn load_font(&mut self, path: &Path) -> RenderResult<LoadedFont> {
        let bytes = std::fs::read(path)
            .map_err(|e| RenderError::asset(format!("read font '{}': {e}", path.display())))?;

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            RenderError::asset(format!(
                "no font families registered from '{}'",
                path.display()
            ))
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| RenderError::asset("registered font family has no name"))?
            .to_string();

        Ok(LoadedFont { bytes, family })
    }

    /// Shape and lay out a single unwrapped line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &LoadedFont,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> RenderResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(RenderError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;

use std::path::Path;

use crate::assets::text::{LoadedFont, TextLayoutEngine};
use crate::foundation::core::{PixelPoint, Rgb8};
use crate::foundation::error::{RenderError, RenderResult};
use crate::render::canvas::FrameRGBA;

/// Status-line renderer: Parley shaping, `vello_cpu` glyph rasterization.
pub(crate) struct StatusText {
    engine: TextLayoutEngine,
    font: LoadedFont,
    font_data: vello_cpu::peniko::FontData,
    size_px: f32,
    color: Rgb8,
}

impl StatusText {
    /// Load the font once; it is reused for every frame.
    pub(crate) fn load(path: &Path, size_px: f32, color: Rgb8) -> RenderResult<Self> {
        let mut engine = TextLayoutEngine::new();
        let font = engine.load_font(path)?;
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes.clone()),
            0,
        );
        Ok(Self {
            engine,
            font,
            font_data,
            size_px,
            color,
        })
    }

    /// Draw `text` with its layout box anchored at `at`.
    pub(crate) fn draw(
        &mut self,
        frame: &mut FrameRGBA,
        text: &str,
        at: PixelPoint,
    ) -> RenderResult<()> {
        let layout = self
            .engine
            .layout_line(text, &self.font, self.size_px, self.color.into())?;

        let width: u16 = frame
            .width
            .try_into()
            .map_err(|_| RenderError::validation("frame width exceeds u16"))?;
        let height: u16 = frame
            .height
            .try_into()
            .map_err(|_| RenderError::validation("frame height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(at.x),
            f64::from(at.y),
        )));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        frame.composite_layer(pixmap.data_as_u8_slice())
    }
}

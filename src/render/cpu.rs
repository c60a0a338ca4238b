use std::path::Path;

use vello_cpu::kurbo::Shape as _;

use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, Canvas, MAX_CANVAS_EXTENT, Point};
use crate::foundation::error::{RiverGlyphError, RiverGlyphResult};
use crate::render::frame::FrameRGBA;
use crate::render::surface::{Surface, TextAlign, TextStyle, TransformStack};
use crate::render::text::TextLayoutEngine;

/// Options for the CPU surface.
#[derive(Debug, Clone, Copy)]
pub struct CpuSurfaceOpts {
    /// Flattening tolerance for circles, in pixels.
    pub tolerance: f64,
}

impl Default for CpuSurfaceOpts {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

/// Surface rasterizing with `vello_cpu` and shaping text with `parley`.
///
/// Text needs a font; without one, text primitives are skipped (logged once).
pub struct CpuSurface {
    opts: CpuSurfaceOpts,
    ctx: Option<vello_cpu::RenderContext>,
    width: u16,
    height: u16,
    transforms: TransformStack,
    text: TextLayoutEngine,
    warned_missing_font: bool,
}

impl CpuSurface {
    /// Create a surface without a font.
    pub fn new(opts: CpuSurfaceOpts) -> Self {
        Self {
            opts,
            ctx: None,
            width: 0,
            height: 0,
            transforms: TransformStack::default(),
            text: TextLayoutEngine::new(),
            warned_missing_font: false,
        }
    }

    /// Use a TrueType/OpenType font for all text.
    pub fn with_font_bytes(mut self, font_bytes: &[u8]) -> RiverGlyphResult<Self> {
        self.text.load_font(font_bytes)?;
        Ok(self)
    }

    /// Load a font file for all text.
    pub fn with_font_path(self, path: &Path) -> RiverGlyphResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            RiverGlyphError::render(format!("failed to read font '{}': {e}", path.display()))
        })?;
        self.with_font_bytes(&bytes)
    }

    /// `true` when a font is loaded and text will be drawn.
    pub fn has_font(&self) -> bool {
        self.text.font().is_some()
    }

    /// Rasterize everything drawn since [`Surface::begin_frame`] and read the frame back.
    pub fn finish(&mut self) -> RiverGlyphResult<FrameRGBA> {
        let ctx = self
            .ctx
            .as_mut()
            .ok_or_else(|| RiverGlyphError::render("finish called before begin_frame"))?;
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn ctx_mut(&mut self) -> RiverGlyphResult<&mut vello_cpu::RenderContext> {
        self.ctx
            .as_mut()
            .ok_or_else(|| RiverGlyphError::render("draw call before begin_frame"))
    }
}

impl Surface for CpuSurface {
    fn begin_frame(&mut self, canvas: Canvas, clear: Rgba8) -> RiverGlyphResult<()> {
        let too_large = |_: std::num::TryFromIntError| {
            RiverGlyphError::render(format!(
                "canvas {}x{} exceeds the {MAX_CANVAS_EXTENT} px limit per side",
                canvas.width, canvas.height
            ))
        };
        let width: u16 = canvas.width.try_into().map_err(too_large)?;
        let height: u16 = canvas.height.try_into().map_err(too_large)?;
        if width == 0 || height == 0 {
            return Err(RiverGlyphError::render("canvas must be at least 1x1"));
        }

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(clear));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        self.ctx = Some(ctx);
        self.width = width;
        self.height = height;
        self.transforms.reset();
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, diameter: f64, color: Rgba8) -> RiverGlyphResult<()> {
        if !diameter.is_finite() || diameter <= 0.0 {
            return Ok(());
        }
        let transform = self.transforms.current();
        let tolerance = self.opts.tolerance;
        let ctx = self.ctx_mut()?;
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(color_to_cpu(color));
        let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(center), diameter / 2.0);
        ctx.fill_path(&circle.to_path(tolerance));
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgba8,
        weight: f64,
    ) -> RiverGlyphResult<()> {
        let transform = self.transforms.current();
        let ctx = self.ctx_mut()?;
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(color_to_cpu(color));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(weight));

        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(from));
        path.line_to(point_to_cpu(to));
        ctx.stroke_path(&path);
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> RiverGlyphResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let Some(font) = self.text.font().map(|f| f.data.clone()) else {
            if !self.warned_missing_font {
                tracing::warn!("no font configured; skipping text primitives");
                self.warned_missing_font = true;
            }
            return Ok(());
        };

        let layout = self.text.layout_line(text, style.size as f32, style.color)?;
        let w = f64::from(layout.width());
        let h = f64::from(layout.height());
        let dx = match style.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -w / 2.0,
            TextAlign::Right => -w,
        };
        let transform = self.transforms.current()
            * Affine::translate(at.to_vec2())
            * Affine::translate((dx, -h / 2.0));

        let ctx = self.ctx_mut()?;
        ctx.set_transform(affine_to_cpu(transform));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(color_to_cpu(brush));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn push_transform(&mut self, local: Affine) {
        self.transforms.push(local);
    }

    fn pop_transform(&mut self) {
        self.transforms.pop();
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

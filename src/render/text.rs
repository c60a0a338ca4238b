use crate::foundation::color::Rgba8;
use crate::foundation::error::{RiverGlyphError, RiverGlyphResult};

/// Font bytes registered with the layout engine, plus the rasterizer handle for the same bytes.
#[derive(Clone)]
pub(crate) struct LoadedFont {
    pub(crate) family: String,
    pub(crate) data: vello_cpu::peniko::FontData,
}

/// Stateful helper for building Parley text layouts from one registered font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    font: Option<LoadedFont>,
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
            font: None,
        }
    }

    /// Register font bytes and make them the face used for every layout.
    pub(crate) fn load_font(&mut self, font_bytes: &[u8]) -> RiverGlyphResult<()> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            RiverGlyphError::validation("no font families registered from font bytes")
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| RiverGlyphError::validation("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
            0,
        );
        tracing::debug!(family = %family, bytes = font_bytes.len(), "registered font");
        self.font = Some(LoadedFont { family, data });
        Ok(())
    }

    pub(crate) fn font(&self) -> Option<&LoadedFont> {
        self.font.as_ref()
    }

    /// Shape a single unbroken line of text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgba8,
    ) -> RiverGlyphResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(RiverGlyphError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family = self
            .font
            .as_ref()
            .map(|f| f.family.clone())
            .ok_or_else(|| RiverGlyphError::render("no font loaded for text layout"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

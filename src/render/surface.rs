use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, Canvas, Point};
use crate::foundation::error::RiverGlyphResult;

/// Horizontal anchor of a text run. Text is always centered vertically on its anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Anchor at the start of the run.
    Left,
    /// Anchor at the middle of the run.
    #[default]
    Center,
    /// Anchor at the end of the run.
    Right,
}

/// Text styling for [`Surface::text`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f64,
    /// Fill color.
    pub color: Rgba8,
    /// Horizontal alignment.
    pub align: TextAlign,
}

/// Drawing primitives a glyph renderer needs.
///
/// Coordinates passed to draw calls are local to the current transform, which starts as the
/// identity at [`Surface::begin_frame`] and is changed with [`Surface::push_transform`] /
/// [`Surface::pop_transform`].
pub trait Surface {
    /// Start a new frame of the given size, filled with `clear`.
    fn begin_frame(&mut self, canvas: Canvas, clear: Rgba8) -> RiverGlyphResult<()>;

    /// Fill a circle of `diameter` centered on `center`.
    fn fill_circle(&mut self, center: Point, diameter: f64, color: Rgba8) -> RiverGlyphResult<()>;

    /// Stroke a straight segment.
    fn stroke_line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgba8,
        weight: f64,
    ) -> RiverGlyphResult<()>;

    /// Draw a single line of text anchored at `at`.
    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> RiverGlyphResult<()>;

    /// Compose `local` onto the current transform.
    fn push_transform(&mut self, local: Affine);

    /// Restore the transform active before the matching push.
    fn pop_transform(&mut self);
}

/// Run `f` with `local` pushed onto the surface transform; the transform is popped even when `f`
/// fails.
pub fn with_transform<S, R>(
    surface: &mut S,
    local: Affine,
    f: impl FnOnce(&mut S) -> RiverGlyphResult<R>,
) -> RiverGlyphResult<R>
where
    S: Surface + ?Sized,
{
    surface.push_transform(local);
    let out = f(surface);
    surface.pop_transform();
    out
}

/// Transform stack shared by surface implementations.
#[derive(Clone, Debug)]
pub(crate) struct TransformStack {
    stack: Vec<Affine>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            stack: vec![Affine::IDENTITY],
        }
    }
}

impl TransformStack {
    pub(crate) fn current(&self) -> Affine {
        self.stack.last().copied().unwrap_or(Affine::IDENTITY)
    }

    pub(crate) fn push(&mut self, local: Affine) {
        let next = self.current() * local;
        self.stack.push(next);
    }

    pub(crate) fn pop(&mut self) {
        // The identity at the bottom is never popped.
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub(crate) fn reset(&mut self) {
        self.stack.clear();
        self.stack.push(Affine::IDENTITY);
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len() - 1
    }
}

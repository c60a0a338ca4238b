use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, Canvas, Point};
use crate::foundation::error::RiverGlyphResult;
use crate::render::surface::{Surface, TextStyle, TransformStack};

/// A text draw with its fully resolved transform.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedText {
    /// Text content.
    pub text: String,
    /// Transform mapping the text anchor (local origin) to canvas space.
    pub transform: Affine,
    /// Style used for the draw.
    pub style: TextStyle,
}

impl RecordedText {
    /// Anchor position in canvas space.
    pub fn anchor(&self) -> Point {
        self.transform * Point::ORIGIN
    }

    /// Rotation of the text baseline in radians.
    pub fn rotation(&self) -> f64 {
        let [a, b, _, _, _, _] = self.transform.as_coeffs();
        b.atan2(a)
    }
}

/// A primitive recorded by [`RecordingSurface`]; geometry is in canvas space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// A frame was started.
    Begin {
        /// Canvas size.
        canvas: Canvas,
        /// Clear color.
        clear: Rgba8,
    },
    /// Filled circle.
    Circle {
        /// Center.
        center: Point,
        /// Diameter (scaled by the transform's uniform scale, if any).
        diameter: f64,
        /// Fill color.
        color: Rgba8,
    },
    /// Stroked segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        color: Rgba8,
        /// Stroke weight.
        weight: f64,
    },
    /// Text run.
    Text(RecordedText),
}

/// Surface that records primitives instead of rasterizing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    cmds: Vec<DrawCmd>,
    transforms: TransformStack,
}

impl RecordingSurface {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command recorded since the last [`Surface::begin_frame`].
    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// Recorded circles as `(center, diameter, color)`.
    pub fn circles(&self) -> Vec<(Point, f64, Rgba8)> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Circle {
                    center,
                    diameter,
                    color,
                } => Some((*center, *diameter, *color)),
                _ => None,
            })
            .collect()
    }

    /// Recorded segments as `(from, to)`.
    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// Recorded text runs.
    pub fn texts(&self) -> Vec<&RecordedText> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Number of transforms currently pushed.
    pub fn transform_depth(&self) -> usize {
        self.transforms.depth()
    }
}

impl Surface for RecordingSurface {
    fn begin_frame(&mut self, canvas: Canvas, clear: Rgba8) -> RiverGlyphResult<()> {
        self.cmds.clear();
        self.transforms.reset();
        self.cmds.push(DrawCmd::Begin { canvas, clear });
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, diameter: f64, color: Rgba8) -> RiverGlyphResult<()> {
        let t = self.transforms.current();
        let scale = t.determinant().abs().sqrt();
        self.cmds.push(DrawCmd::Circle {
            center: t * center,
            diameter: diameter * scale,
            color,
        });
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgba8,
        weight: f64,
    ) -> RiverGlyphResult<()> {
        let t = self.transforms.current();
        self.cmds.push(DrawCmd::Line {
            from: t * from,
            to: t * to,
            color,
            weight,
        });
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> RiverGlyphResult<()> {
        let transform = self.transforms.current() * Affine::translate(at.to_vec2());
        self.cmds.push(DrawCmd::Text(RecordedText {
            text: text.to_owned(),
            transform,
            style: *style,
        }));
        Ok(())
    }

    fn push_transform(&mut self, local: Affine) {
        self.transforms.push(local);
    }

    fn pop_transform(&mut self) {
        self.transforms.pop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;

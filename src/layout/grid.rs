use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::{RiverGlyphError, RiverGlyphResult};

/// Breakpoints and base sizes for the responsive grid.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutParams {
    /// Circle diameter on wide viewports.
    pub base_circle_size: f64,
    /// Gap between circles on wide viewports.
    pub base_padding: f64,
    /// Viewports strictly wider than this use three columns and full size.
    pub wide_breakpoint: f64,
    /// Viewports strictly wider than this (and not wide) use the medium tier.
    pub medium_breakpoint: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            base_circle_size: 250.0,
            base_padding: 100.0,
            wide_breakpoint: 1200.0,
            medium_breakpoint: 800.0,
        }
    }
}

impl LayoutParams {
    /// Validate parameter invariants.
    pub fn validate(&self) -> RiverGlyphResult<()> {
        if !self.base_circle_size.is_finite() || self.base_circle_size <= 0.0 {
            return Err(RiverGlyphError::validation(
                "layout.base_circle_size must be finite and > 0",
            ));
        }
        if !self.base_padding.is_finite() || self.base_padding < 0.0 {
            return Err(RiverGlyphError::validation(
                "layout.base_padding must be finite and >= 0",
            ));
        }
        if !(self.medium_breakpoint.is_finite()
            && self.wide_breakpoint.is_finite()
            && self.medium_breakpoint < self.wide_breakpoint)
        {
            return Err(RiverGlyphError::validation(
                "layout breakpoints must be finite with medium < wide",
            ));
        }
        Ok(())
    }
}

/// Size tier selected from the viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeTier {
    /// `width > wide_breakpoint`.
    Wide,
    /// `medium_breakpoint < width <= wide_breakpoint`.
    Medium,
    /// `width <= medium_breakpoint`.
    Narrow,
}

impl SizeTier {
    /// Pick the tier for a viewport width.
    pub fn for_width(width: f64, params: &LayoutParams) -> Self {
        if width > params.wide_breakpoint {
            Self::Wide
        } else if width > params.medium_breakpoint {
            Self::Medium
        } else {
            Self::Narrow
        }
    }

    /// `(circle factor, padding factor)`.
    pub fn factors(self) -> (f64, f64) {
        match self {
            Self::Wide => (1.0, 1.0),
            Self::Medium => (0.8, 0.6),
            Self::Narrow => (0.6, 0.4),
        }
    }

    /// Grid column count.
    pub fn columns(self) -> usize {
        match self {
            Self::Wide => 3,
            Self::Medium | Self::Narrow => 2,
        }
    }
}

/// Grid geometry for the current viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GlobalLayout {
    /// Column count, 2 or 3.
    pub columns: usize,
    /// `ceil(continent_count / columns)`.
    pub rows: usize,
    /// Number of glyphs laid out.
    pub count: usize,
    /// Circle diameter.
    pub circle_size: f64,
    /// Gap between neighbouring circles.
    pub padding: f64,
    /// Canvas width (equals the viewport width).
    pub canvas_width: f64,
    /// Canvas height (at least the viewport height).
    pub canvas_height: f64,
    /// Left edge of the centered grid.
    pub offset_x: f64,
    /// Top edge of the centered grid.
    pub offset_y: f64,
}

impl GlobalLayout {
    /// Distance between neighbouring circle centers.
    pub fn pitch(&self) -> f64 {
        self.circle_size + self.padding
    }

    /// Center of glyph `i` (row-major).
    pub fn center(&self, i: usize) -> Point {
        let col = i % self.columns;
        let row = i / self.columns;
        Point::new(
            self.offset_x + col as f64 * self.pitch() + self.circle_size / 2.0,
            self.offset_y + row as f64 * self.pitch() + self.circle_size / 2.0,
        )
    }

    /// Centers of every laid-out glyph, in continent order.
    pub fn grid_centers(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.count).map(|i| self.center(i))
    }

    /// `true` when there is nothing to lay out.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Derive grid geometry from the viewport and the number of continents.
pub fn compute_layout(viewport: Viewport, count: usize, params: &LayoutParams) -> GlobalLayout {
    let tier = SizeTier::for_width(viewport.width, params);
    let (circle_factor, padding_factor) = tier.factors();
    let circle_size = params.base_circle_size * circle_factor;
    let padding = params.base_padding * padding_factor;
    let columns = tier.columns();
    let rows = count.div_ceil(columns);
    let pitch = circle_size + padding;

    let canvas_width = viewport.width;
    let canvas_height = viewport.height.max(rows as f64 * pitch);

    let total_width = columns as f64 * pitch - padding;
    let total_height = if rows == 0 {
        0.0
    } else {
        rows as f64 * pitch - padding
    };

    let layout = GlobalLayout {
        columns,
        rows,
        count,
        circle_size,
        padding,
        canvas_width,
        canvas_height,
        offset_x: (canvas_width - total_width) / 2.0,
        offset_y: (canvas_height - total_height) / 2.0,
    };
    tracing::debug!(
        ?tier,
        columns,
        rows,
        circle_size,
        padding,
        canvas_width,
        canvas_height,
        "computed layout"
    );
    layout
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;

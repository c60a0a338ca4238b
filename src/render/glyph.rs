use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::animation::scheduler::{AnimationScheduler, AnimationState};
use crate::data::aggregate::Continent;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::error::{RiverGlyphError, RiverGlyphResult};
use crate::render::surface::{Surface, TextAlign, TextStyle, with_transform};

/// Colors used by the glyph renderer and the page background.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Page background.
    pub page: Rgba8,
    /// Glyph disc.
    pub circle: Rgba8,
    /// Dot at the glyph center.
    pub center_dot: Rgba8,
    /// River spokes.
    pub spoke: Rgba8,
    /// River labels.
    pub label: Rgba8,
    /// Continent name.
    pub name: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            page: Rgba8::rgb(0x00, 0x73, 0xe6),
            circle: Rgba8::rgb(0x00, 0x00, 0xff),
            center_dot: Rgba8::rgb(0x00, 0xff, 0xff),
            spoke: Rgba8::rgb(0x00, 0xff, 0xff),
            label: Rgba8::rgb(0xd6, 0xea, 0xf8),
            name: Rgba8::rgb(0xd6, 0xea, 0xf8),
        }
    }
}

/// Fixed glyph dimensions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlyphStyle {
    /// Diameter of the center dot.
    pub center_dot_diameter: f64,
    /// Gap between the circle top and the continent name.
    pub name_offset: f64,
    /// Continent name font size.
    pub name_size: f64,
    /// River label font size.
    pub label_size: f64,
    /// Spoke stroke weight.
    pub spoke_weight: f64,
    /// Distance kept between the longest spoke tip and the circle edge.
    pub spoke_inset: f64,
    /// Length of the shortest spoke.
    pub min_spoke_length: f64,
    /// Gap between a spoke tip and its label.
    pub label_gap: f64,
    /// Extra outward offset per label character.
    pub label_char_offset: f64,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            center_dot_diameter: 5.0,
            name_offset: 18.0,
            name_size: 12.0,
            label_size: 9.0,
            spoke_weight: 0.8,
            spoke_inset: 20.0,
            min_spoke_length: 10.0,
            label_gap: 8.0,
            label_char_offset: 2.5,
        }
    }
}

impl GlyphStyle {
    /// Validate style invariants.
    pub fn validate(&self) -> RiverGlyphResult<()> {
        let non_negative = [
            ("center_dot_diameter", self.center_dot_diameter),
            ("name_offset", self.name_offset),
            ("spoke_inset", self.spoke_inset),
            ("min_spoke_length", self.min_spoke_length),
            ("label_gap", self.label_gap),
            ("label_char_offset", self.label_char_offset),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(RiverGlyphError::validation(format!(
                    "glyph.{name} must be finite and >= 0"
                )));
            }
        }
        let positive = [
            ("name_size", self.name_size),
            ("label_size", self.label_size),
            ("spoke_weight", self.spoke_weight),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(RiverGlyphError::validation(format!(
                    "glyph.{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Everything the renderer needs besides per-frame data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Theme {
    /// Colors.
    pub palette: Palette,
    /// Dimensions.
    pub style: GlyphStyle,
}

/// Map `v` from `[in_min, in_max]` onto `[out_min, out_max]` without clamping.
///
/// A degenerate input range maps everything to `out_max`.
pub fn linear_map(v: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    if span.abs() <= f64::EPSILON {
        return out_max;
    }
    out_min + (v - in_min) / span * (out_max - out_min)
}

/// Longest spoke that fits inside a circle of `circle_size`.
pub fn max_line_length(circle_size: f64, style: &GlyphStyle) -> f64 {
    (circle_size / 2.0 - style.spoke_inset).max(style.min_spoke_length)
}

/// Spoke length for a river's combined metric.
pub fn spoke_length(metric: f64, max_metric: f64, max_line: f64, style: &GlyphStyle) -> f64 {
    linear_map(metric, 0.0, max_metric, style.min_spoke_length, max_line)
}

/// Angle of spoke `rank` among `count` evenly spaced spokes.
pub fn spoke_angle(rank: usize, count: usize) -> f64 {
    rank as f64 * (TAU / count as f64)
}

/// Tip of a spoke grown to `progress`.
pub fn spoke_endpoint(center: Point, angle: f64, length: f64, progress: f64) -> Point {
    center + Vec2::from_angle(angle) * (length * progress)
}

/// Text rotation for a label on a spoke at `angle`; labels on the left half are flipped so they
/// never read upside-down.
pub fn label_rotation(angle: f64) -> f64 {
    if angle > FRAC_PI_2 && angle < 3.0 * FRAC_PI_2 {
        angle + PI
    } else {
        angle
    }
}

/// Distance from the glyph center to a label anchor.
pub fn label_distance(line_length: f64, label: &str, style: &GlyphStyle) -> f64 {
    line_length + style.label_gap + label.chars().count() as f64 * style.label_char_offset
}

/// Draw one continent glyph for the current frame.
///
/// `flat_offset` is the flat index of the continent's first river; spokes whose flat index has not
/// been reached by `state` are skipped.
pub fn render_glyph<S>(
    surface: &mut S,
    center: Point,
    circle_size: f64,
    continent: &Continent,
    state: &AnimationState,
    flat_offset: usize,
    theme: &Theme,
) -> RiverGlyphResult<()>
where
    S: Surface + ?Sized,
{
    let Theme { palette, style } = theme;

    surface.fill_circle(center, circle_size, palette.circle)?;
    surface.text(
        &continent.name,
        Point::new(center.x, center.y - circle_size / 2.0 - style.name_offset),
        &TextStyle {
            size: style.name_size,
            color: palette.name,
            align: TextAlign::Center,
        },
    )?;
    surface.fill_circle(center, style.center_dot_diameter, palette.center_dot)?;

    let count = continent.rivers.len();
    if count == 0 {
        return Ok(());
    }

    let max_line = max_line_length(circle_size, style);
    let max_metric = continent
        .rivers
        .iter()
        .map(|r| r.combined_metric())
        .fold(f64::NEG_INFINITY, f64::max);
    let label_style = TextStyle {
        size: style.label_size,
        color: palette.label,
        align: TextAlign::Center,
    };

    for (rank, river) in continent.rivers.iter().enumerate() {
        let stage = AnimationScheduler::spoke_stage(state, flat_offset + rank);
        let Some(progress) = stage.progress() else {
            continue;
        };

        let angle = spoke_angle(rank, count);
        let length = spoke_length(river.combined_metric(), max_metric, max_line, style);
        let tip = spoke_endpoint(center, angle, length, progress);
        surface.stroke_line(center, tip, palette.spoke, style.spoke_weight)?;

        if progress < 1.0 {
            continue;
        }
        let anchor = center + Vec2::from_angle(angle) * label_distance(length, &river.name, style);
        let local = Affine::translate(anchor.to_vec2()) * Affine::rotate(label_rotation(angle));
        with_transform(surface, local, |s| {
            s.text(&river.name, Point::ORIGIN, &label_style)
        })?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/glyph.rs"]
mod tests;

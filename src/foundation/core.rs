use crate::foundation::error::{RiverGlyphError, RiverGlyphResult};

pub use kurbo::{Affine, Point, Vec2};

/// Absolute 0-based index of a rendered frame (one per clock tick).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Largest canvas side, in pixels, the CPU rasterizer accepts.
pub const MAX_CANVAS_EXTENT: u32 = u16::MAX as u32;

/// Host viewport dimensions in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with finite, positive dimensions of at most
    /// [`MAX_CANVAS_EXTENT`] pixels.
    ///
    /// The canvas height grows with the number of grid rows, so a valid viewport can still produce
    /// a canvas taller than the limit; rendering such a frame is a render error.
    pub fn new(width: f64, height: f64) -> RiverGlyphResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(RiverGlyphError::validation(
                "viewport width must be finite and > 0",
            ));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(RiverGlyphError::validation(
                "viewport height must be finite and > 0",
            ));
        }
        let max = f64::from(MAX_CANVAS_EXTENT);
        if width > max || height > max {
            return Err(RiverGlyphError::validation(format!(
                "viewport {width}x{height} exceeds the {MAX_CANVAS_EXTENT} px limit per side"
            )));
        }
        Ok(Self { width, height })
    }

    /// Parse a `WIDTHxHEIGHT` string such as `1280x720`.
    pub fn parse(s: &str) -> RiverGlyphResult<Self> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| RiverGlyphError::validation(format!("viewport '{s}' is not WxH")))?;
        let w: f64 = w
            .trim()
            .parse()
            .map_err(|_| RiverGlyphError::validation(format!("invalid viewport width '{w}'")))?;
        let h: f64 = h
            .trim()
            .parse()
            .map_err(|_| RiverGlyphError::validation(format!("invalid viewport height '{h}'")))?;
        Self::new(w, h)
    }
}

/// Output canvas dimensions in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Round a floating-point extent up to whole pixels.
    pub fn from_extent(width: f64, height: f64) -> Self {
        fn px(v: f64) -> u32 {
            if v.is_finite() && v > 0.0 {
                v.ceil().min(f64::from(u32::MAX)) as u32
            } else {
                0
            }
        }
        Self {
            width: px(width),
            height: px(height),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

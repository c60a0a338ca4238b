use std::path::{Path, PathBuf};

use crate::data::aggregate::AggregateOpts;
use crate::foundation::error::{RiverGlyphError, RiverGlyphResult};
use crate::layout::grid::LayoutParams;
use crate::render::glyph::{GlyphStyle, Palette, Theme};

/// Animation tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationParams {
    /// Progress added to the growing spoke per tick.
    pub speed: f64,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self { speed: 0.08 }
    }
}

/// Complete infographic configuration. Every field has a default, so `{}` is a valid document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InfographicConfig {
    /// Grid breakpoints and base sizes.
    pub layout: LayoutParams,
    /// Animation tuning.
    pub animation: AnimationParams,
    /// Aggregation knobs.
    pub aggregate: AggregateOpts,
    /// Colors.
    pub palette: Palette,
    /// Glyph dimensions.
    pub glyph: GlyphStyle,
    /// Font file used for text. Relative paths resolve against the config file's directory.
    pub font: Option<PathBuf>,
}

impl InfographicConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> RiverGlyphResult<Self> {
        let f = std::fs::File::open(path).map_err(|e| {
            RiverGlyphError::validation(format!("failed to open config '{}': {e}", path.display()))
        })?;
        let mut cfg: Self = serde_json::from_reader(std::io::BufReader::new(f))
            .map_err(|e| RiverGlyphError::serde(format!("config '{}': {e}", path.display())))?;

        if let (Some(font), Some(dir)) = (cfg.font.as_ref(), path.parent())
            && font.is_relative()
        {
            let resolved = dir.join(font);
            cfg.font = Some(resolved);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON configuration string.
    pub fn from_json_str(s: &str) -> RiverGlyphResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| RiverGlyphError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate every section.
    pub fn validate(&self) -> RiverGlyphResult<()> {
        self.layout.validate()?;
        self.aggregate.validate()?;
        self.glyph.validate()?;
        if !self.animation.speed.is_finite() || self.animation.speed <= 0.0 {
            return Err(RiverGlyphError::validation(
                "animation.speed must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Renderer theme derived from the palette and glyph style.
    pub fn theme(&self) -> Theme {
        Theme {
            palette: self.palette,
            style: self.glyph,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

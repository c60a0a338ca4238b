//! Riverglyph renders an animated river infographic.
//!
//! Each continent becomes a circular glyph whose radial spokes encode its longest rivers. The
//! pipeline is:
//!
//! - Load a tabular dataset ([`CsvTable`]) and aggregate it into ranked [`Continent`]s
//! - Lay the glyphs out on a responsive grid ([`compute_layout`])
//! - Drive an [`Infographic`] session frame by frame onto a [`Surface`], growing one spoke at a
//!   time until the picture is complete
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod data;
pub(crate) mod encode;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod session;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{
    Affine, Canvas, FrameIndex, MAX_CANVAS_EXTENT, Point, Vec2, Viewport,
};
pub use crate::foundation::error::{RiverGlyphError, RiverGlyphResult};

pub use crate::animation::scheduler::{AnimationScheduler, AnimationState, SpokeStage};
pub use crate::config::{AnimationParams, InfographicConfig};
pub use crate::data::aggregate::{
    AggregateOpts, Continent, DedupPolicy, River, aggregate, flat_offsets, normalize_continent,
    split_river_name, total_spokes,
};
pub use crate::data::row::{RiverRow, parse_metric, parse_rows};
pub use crate::data::table::{CsvTable, TabularSource};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use crate::layout::grid::{GlobalLayout, LayoutParams, SizeTier, compute_layout};
pub use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::glyph::{
    GlyphStyle, Palette, Theme, label_distance, label_rotation, linear_map, max_line_length,
    render_glyph, spoke_angle, spoke_endpoint, spoke_length,
};
pub use crate::render::recording::{DrawCmd, RecordedText, RecordingSurface};
pub use crate::render::surface::{Surface, TextAlign, TextStyle, with_transform};
pub use crate::session::infographic::{ClockState, Infographic, RunStats, ScheduledResize};

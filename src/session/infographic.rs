use std::path::Path;

use crate::animation::scheduler::{AnimationScheduler, AnimationState};
use crate::config::InfographicConfig;
use crate::data::aggregate::{Continent, aggregate, flat_offsets, total_spokes};
use crate::data::row::parse_rows;
use crate::data::table::{CsvTable, TabularSource};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex, Viewport};
use crate::foundation::error::RiverGlyphResult;
use crate::layout::grid::{GlobalLayout, compute_layout};
use crate::render::cpu::CpuSurface;
use crate::render::frame::FrameRGBA;
use crate::render::glyph::{Theme, render_glyph};
use crate::render::surface::Surface;

/// Whether the host should keep ticking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    /// More frames will change the picture.
    Running,
    /// The picture is static until the next resize.
    Stopped,
}

/// A resize notification scheduled before a given tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledResize {
    /// Applied before drawing the frame with this index.
    pub before_frame: u64,
    /// New viewport.
    pub viewport: Viewport,
}

/// Outcome of [`Infographic::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunStats {
    /// Frames drawn and pushed to the sink (idle ticks are not drawn).
    pub frames: u64,
    /// Resizes applied.
    pub resizes: usize,
    /// `true` when the clock stopped before the frame limit.
    pub completed: bool,
}

/// Live infographic: immutable river data plus the layout and animation state for the current
/// viewport.
#[derive(Debug)]
pub struct Infographic {
    continents: Vec<Continent>,
    offsets: Vec<usize>,
    config: InfographicConfig,
    theme: Theme,
    viewport: Viewport,
    layout: GlobalLayout,
    scheduler: AnimationScheduler,
    state: AnimationState,
    clock: ClockState,
}

impl Infographic {
    /// Build a session over already aggregated continents.
    pub fn new(
        continents: Vec<Continent>,
        viewport: Viewport,
        config: InfographicConfig,
    ) -> RiverGlyphResult<Self> {
        config.validate()?;
        let spokes = total_spokes(&continents);
        let scheduler = AnimationScheduler::new(config.animation.speed, spokes)?;
        let layout = compute_layout(viewport, continents.len(), &config.layout);
        let offsets = flat_offsets(&continents);
        tracing::info!(
            continents = continents.len(),
            spokes,
            width = viewport.width,
            height = viewport.height,
            "infographic ready"
        );
        Ok(Self {
            offsets,
            theme: config.theme(),
            state: scheduler.initial(),
            continents,
            config,
            viewport,
            layout,
            scheduler,
            clock: ClockState::Running,
        })
    }

    /// Parse, aggregate and build a session from a tabular source.
    pub fn from_source(
        source: &dyn TabularSource,
        viewport: Viewport,
        config: InfographicConfig,
    ) -> RiverGlyphResult<Self> {
        config.validate()?;
        let rows = parse_rows(source)?;
        let continents = aggregate(&rows, &config.aggregate);
        Self::new(continents, viewport, config)
    }

    /// Load a CSV dataset and build a session. A missing dataset is fatal.
    pub fn from_csv_path(
        path: &Path,
        viewport: Viewport,
        config: InfographicConfig,
    ) -> RiverGlyphResult<Self> {
        let table = CsvTable::from_path(path)?;
        Self::from_source(&table, viewport, config)
    }

    /// Aggregated continents in display order.
    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    /// Active configuration.
    pub fn config(&self) -> &InfographicConfig {
        &self.config
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Geometry for the current viewport.
    pub fn layout(&self) -> &GlobalLayout {
        &self.layout
    }

    /// Animation state the next frame will be drawn with.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Terminal phase of the animation.
    pub fn total_spokes(&self) -> usize {
        self.scheduler.total_spokes()
    }

    /// `true` once every spoke has been drawn.
    pub fn is_complete(&self) -> bool {
        self.state.complete
    }

    /// Whether the host should keep ticking.
    pub fn clock(&self) -> ClockState {
        self.clock
    }

    /// Canvas for the current layout, in whole pixels.
    pub fn canvas(&self) -> Canvas {
        Canvas::from_extent(self.layout.canvas_width, self.layout.canvas_height)
    }

    /// Handle a resize notification: relayout and restart the animation.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.layout = compute_layout(viewport, self.continents.len(), &self.config.layout);
        self.state = self.scheduler.reset();
        self.clock = ClockState::Running;
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "resized; animation restarted"
        );
    }

    /// Draw one frame with the current state, then advance the animation.
    ///
    /// Once the state is complete the frame drawn is the final static picture and the clock stops.
    #[tracing::instrument(level = "trace", skip(self, surface), fields(phase = self.state.phase))]
    pub fn draw_frame<S>(&mut self, surface: &mut S) -> RiverGlyphResult<ClockState>
    where
        S: Surface + ?Sized,
    {
        surface.begin_frame(self.canvas(), self.theme.palette.page)?;
        for (i, continent) in self.continents.iter().enumerate() {
            render_glyph(
                surface,
                self.layout.center(i),
                self.layout.circle_size,
                continent,
                &self.state,
                self.offsets[i],
                &self.theme,
            )?;
        }

        if self.state.complete {
            self.clock = ClockState::Stopped;
        } else {
            self.state = self.scheduler.advance(self.state);
            self.clock = ClockState::Running;
        }
        Ok(self.clock)
    }

    /// Draw one frame on a CPU surface and read it back.
    pub fn render_cpu_frame(
        &mut self,
        surface: &mut CpuSurface,
    ) -> RiverGlyphResult<(ClockState, FrameRGBA)> {
        let clock = self.draw_frame(surface)?;
        let frame = surface.finish()?;
        Ok((clock, frame))
    }

    /// Advance `ticks` frames without rasterizing anything.
    pub fn skip_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            if self.state.complete {
                self.clock = ClockState::Stopped;
                break;
            }
            self.state = self.scheduler.advance(self.state);
        }
    }

    /// Simulate a host: tick until the clock stops or tick `max_frames` is reached, applying resizes
    /// between frames and streaming every frame into `sink`.
    pub fn run(
        &mut self,
        surface: &mut CpuSurface,
        sink: &mut dyn FrameSink,
        max_frames: u64,
        resizes: &[ScheduledResize],
    ) -> RiverGlyphResult<RunStats> {
        let mut pending = resizes.to_vec();
        pending.sort_by_key(|r| r.before_frame);
        let mut pending = pending.into_iter().peekable();

        sink.begin(SinkConfig {
            canvas: self.canvas(),
            total_spokes: self.total_spokes(),
        })?;

        let mut stats = RunStats {
            frames: 0,
            resizes: 0,
            completed: false,
        };
        let mut tick = 0u64;
        while tick < max_frames {
            while let Some(r) = pending.next_if(|r| r.before_frame <= tick) {
                self.resize(r.viewport);
                stats.resizes += 1;
            }

            if self.clock == ClockState::Stopped {
                // Idle until the next scheduled resize wakes the clock.
                match pending.peek() {
                    Some(next) => {
                        tick = next.before_frame;
                        continue;
                    }
                    None => break,
                }
            }

            let (_, frame) = self.render_cpu_frame(surface)?;
            sink.push_frame(FrameIndex(tick), &frame)?;
            stats.frames += 1;
            tick += 1;
        }
        stats.completed = self.clock == ClockState::Stopped && pending.peek().is_none();

        sink.end()?;
        tracing::info!(
            frames = stats.frames,
            resizes = stats.resizes,
            completed = stats.completed,
            "run finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/infographic.rs"]
mod tests;

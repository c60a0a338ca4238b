use crate::foundation::error::{RiverGlyphError, RiverGlyphResult};

/// Global spoke animation state.
///
/// `phase` is the flat index of the spoke currently growing; `progress` is how far it has grown.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationState {
    /// Flat index of the growing spoke.
    pub phase: usize,
    /// Growth of the current spoke in `[0, 1]`; pinned to `1` once complete.
    pub progress: f64,
    /// Every spoke has been drawn.
    pub complete: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            phase: 0,
            progress: 0.0,
            complete: false,
        }
    }
}

/// How a single spoke should be drawn in the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpokeStage {
    /// Not reached yet.
    Hidden,
    /// The spoke currently growing, with its progress.
    Growing(f64),
    /// Fully drawn.
    Grown,
}

impl SpokeStage {
    /// Growth factor to apply to the spoke length, `None` when hidden.
    pub fn progress(self) -> Option<f64> {
        match self {
            Self::Hidden => None,
            Self::Growing(p) => Some(p),
            Self::Grown => Some(1.0),
        }
    }
}

/// Pure phase/progress state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationScheduler {
    speed: f64,
    total_spokes: usize,
}

impl AnimationScheduler {
    /// `speed` is the progress added per tick; `total_spokes` is the terminal phase.
    pub fn new(speed: f64, total_spokes: usize) -> RiverGlyphResult<Self> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(RiverGlyphError::validation(
                "animation speed must be finite and > 0",
            ));
        }
        Ok(Self {
            speed,
            total_spokes,
        })
    }

    /// Progress added per tick.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Number of phases before completion.
    pub fn total_spokes(&self) -> usize {
        self.total_spokes
    }

    /// Growing, phase 0, no progress.
    pub fn initial(&self) -> AnimationState {
        AnimationState::default()
    }

    /// State after a resize: always back to [`Self::initial`].
    pub fn reset(&self) -> AnimationState {
        self.initial()
    }

    /// Advance by one tick.
    ///
    /// Completion is sticky: once complete, the state is returned unchanged.
    pub fn advance(&self, state: AnimationState) -> AnimationState {
        if state.complete {
            return state;
        }
        if state.phase >= self.total_spokes {
            return Self::completed(state.phase);
        }

        let progress = state.progress + self.speed;
        if progress < 1.0 {
            return AnimationState { progress, ..state };
        }

        let phase = state.phase + 1;
        if phase >= self.total_spokes {
            Self::completed(phase)
        } else {
            AnimationState {
                phase,
                progress: 0.0,
                complete: false,
            }
        }
    }

    /// Stage of the spoke at `flat_index` under `state`.
    pub fn spoke_stage(state: &AnimationState, flat_index: usize) -> SpokeStage {
        if state.complete || flat_index < state.phase {
            SpokeStage::Grown
        } else if flat_index == state.phase {
            SpokeStage::Growing(state.progress)
        } else {
            SpokeStage::Hidden
        }
    }

    fn completed(phase: usize) -> AnimationState {
        AnimationState {
            phase,
            progress: 1.0,
            complete: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;

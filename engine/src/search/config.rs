// engine/src/search/config.rs
#![forbid(unsafe_code)]

use std::time::Duration;

use crate::engine::LOOKAHEAD;

/**
 * Beam pruning configuration for the layered search.
 *
 * Depth meaning:
 * - 0 = the root (always fully expanded)
 * - 1 = states after the current pair
 * - 2+ = deeper layers
 */
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BeamConfig {
    /// Start capping from this layer onward.
    pub beam_from_depth: u8,
    /// Expand at most this many states per capped layer.
    pub beam_width: usize,
}

impl BeamConfig {
    pub fn new(beam_from_depth: u8, beam_width: usize) -> Self {
        Self {
            beam_from_depth,
            beam_width: beam_width.max(1),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    /// Pairs searched ahead, clamped to `1..=LOOKAHEAD`.
    pub depth: usize,
    /// Wall-clock budget for one search.
    pub time_budget: Duration,
    /// Expansions between two deadline polls.
    pub check_every: u32,
    /// Per-layer expansion cap. None = layers are only bounded by time.
    pub beam: Option<BeamConfig>,
    /// Drop children whose (grid, score) already appeared in the same layer.
    pub dedupe: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: LOOKAHEAD,
            time_budget: Duration::from_millis(40),
            check_every: 32,
            beam: None,
            dedupe: true,
        }
    }
}

impl SearchConfig {
    #[inline]
    pub fn effective_depth(&self) -> usize {
        self.depth.clamp(1, LOOKAHEAD)
    }

    #[inline]
    pub(crate) fn poll_every(&self) -> u64 {
        u64::from(self.check_every.max(1))
    }

    /// Expansion cap for `layer`, None if uncapped.
    #[inline]
    pub(crate) fn layer_cap(&self, layer: usize) -> Option<usize> {
        let b = self.beam?;
        (layer >= b.beam_from_depth as usize).then_some(b.beam_width.max(1))
    }
}

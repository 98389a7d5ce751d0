// engine/src/engine/area.rs
#![forbid(unsafe_code)]

use crate::engine::constants::ACTION_DIM;
use crate::engine::grid::{Coord, Grid, fits_on_grid, lock_on_grid};
use crate::engine::pair::{Move, Pair};
use crate::engine::potential::potential;
use crate::engine::resolve::{ResolveStats, resolve_inplace};

#[derive(Clone, Copy, Debug)]
pub struct SimPlacement {
    pub grid_after_lock: Grid,
    pub grid_after_resolve: Grid,
    /// Landing cells (first block, second block).
    pub landing: [Coord; 2],
    pub stats: ResolveStats,
}

/// One player's side of the table.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerArea {
    pub grid: Grid,
    /// Cumulative score (relative to the search root while searching).
    pub score: u32,
    pub last_move: Option<Move>,
    /// Cached `potential(grid)`.
    pub potential: u32,
}

impl PlayerArea {
    pub fn new(grid: Grid, score: u32) -> Self {
        Self {
            grid,
            score,
            last_move: None,
            potential: potential(&grid),
        }
    }

    // -------------------------------------------------------------------------
    // Fixed move space mask
    // -------------------------------------------------------------------------

    pub fn move_mask(&self) -> [bool; ACTION_DIM] {
        Self::move_mask_for_grid(&self.grid)
    }

    pub fn move_mask_for_grid(grid: &Grid) -> [bool; ACTION_DIM] {
        let mut m = [false; ACTION_DIM];
        for mv in Move::all() {
            m[mv.action_id()] = fits_on_grid(grid, mv);
        }
        m
    }

    /// Legal moves in enumeration order (orientation-major, then column).
    pub fn legal_moves(&self) -> Vec<Move> {
        Move::all().filter(|&mv| fits_on_grid(&self.grid, mv)).collect()
    }

    pub fn has_legal_move(&self) -> bool {
        Move::all().any(|mv| fits_on_grid(&self.grid, mv))
    }

    // -------------------------------------------------------------------------
    // Pure transition kernel
    // -------------------------------------------------------------------------

    /// Drop `pair` with `mv` and resolve. None if the pair does not fit.
    pub fn simulate_move(grid: &Grid, pair: Pair, mv: Move) -> Option<SimPlacement> {
        let mut locked = *grid;
        let landing = lock_on_grid(&mut locked, pair, mv)?;

        let mut resolved = locked;
        let stats = resolve_inplace(&mut resolved, &landing);

        Some(SimPlacement {
            grid_after_lock: locked,
            grid_after_resolve: resolved,
            landing,
            stats,
        })
    }

    /// Child area after playing `mv`; the score carries forward additively.
    pub fn after_move(&self, pair: Pair, mv: Move) -> Option<(PlayerArea, ResolveStats)> {
        let sim = Self::simulate_move(&self.grid, pair, mv)?;
        let next = PlayerArea {
            grid: sim.grid_after_resolve,
            score: self.score.saturating_add(sim.stats.score),
            last_move: Some(mv),
            potential: potential(&sim.grid_after_resolve),
        };
        Some((next, sim.stats))
    }

    // -------------------------------------------------------------------------
    // Mutating step
    // -------------------------------------------------------------------------

    /// Applies `mv` for `pair`. Illegal moves are a no-op and return None.
    pub fn apply_move(&mut self, pair: Pair, mv: Move) -> Option<ResolveStats> {
        let (next, stats) = self.after_move(pair, mv)?;
        *self = next;
        Some(stats)
    }
}

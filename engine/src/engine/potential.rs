// engine/src/engine/potential.rs
#![forbid(unsafe_code)]

use crate::engine::cell::Cell;
use crate::engine::constants::{COLS, ROWS};
use crate::engine::grid::Grid;

/// Per-feature breakdown of `potential`. The sum is the ranking value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PotentialFeatures {
    pub vertical: u32,
    pub horizontal: u32,
    pub diagonal: u32,
    pub open_columns: u32,
}

impl PotentialFeatures {
    #[inline]
    pub fn total(&self) -> u32 {
        self.vertical + self.horizontal + self.diagonal + self.open_columns
    }
}

/// Proximity-to-match score of a board that produced no clear.
///
/// Only meaningful for ordering: the scale is stable across calls but has no unit.
#[inline]
pub fn potential(grid: &Grid) -> u32 {
    compute_potential_features(grid).total()
}

/// Complexity: O(ROWS*COLS), no allocations.
pub fn compute_potential_features(grid: &Grid) -> PotentialFeatures {
    let mut f = PotentialFeatures::default();

    for r in 0..ROWS {
        for c in 0..COLS {
            let Some(color) = grid.get(r, c).color_id() else {
                continue;
            };
            let same = |rr: usize, cc: usize| grid.get(rr, cc) == Cell::Color(color);

            // vertical pair (and triple) below this cell
            if r + 1 < ROWS && same(r + 1, c) {
                f.vertical += 2;
                if r + 2 < ROWS && same(r + 2, c) {
                    f.vertical += 2;
                }
            }

            // horizontal pair (and triple) to the right
            if c + 1 < COLS && same(r, c + 1) {
                f.horizontal += 2;
                if c + 2 < COLS && same(r, c + 2) {
                    f.horizontal += 2;
                }
            }

            // diagonals towards the next row; skipped when an orthogonal neighbor of the
            // same color already links the two cells (L-shape)
            if r + 1 < ROWS {
                let below = same(r + 1, c);
                if c + 1 < COLS && same(r + 1, c + 1) && !below && !same(r, c + 1) {
                    f.diagonal += 1;
                }
                if c >= 1 && same(r + 1, c - 1) && !below && !same(r, c - 1) {
                    f.diagonal += 1;
                }
            }
        }
    }

    f.open_columns = (0..COLS).filter(|&c| column_is_open(grid, c)).count() as u32;
    f
}

/// A column is open when, reading from the top, nothing but empty cells sits above its
/// first colored block (skulls on top bury it). Empty columns are open too.
fn column_is_open(grid: &Grid, col: usize) -> bool {
    for r in 0..ROWS {
        match grid.get(r, col) {
            Cell::Empty => continue,
            Cell::Color(_) => return true,
            Cell::Skull => return false,
        }
    }
    true
}

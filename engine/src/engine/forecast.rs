// engine/src/engine/forecast.rs
#![forbid(unsafe_code)]

/*
Loss forecast
-------------

Estimates how many full skull lines the opponent can absorb before its board is beyond
recovery, and converts that into the score we must produce to bury it.

A board is "salvageable" when, counting only empty cells reachable from the top row:
- some connected region has room for at least one more pair (>= MIN_GROUP cells), and
- the reachable total can hold every remaining known pair.

This over-approximates survival: colors are ignored and placements are not checked.
*/

use crate::engine::constants::{COLS, MIN_GROUP, NUISANCE_POINTS, ROWS};
use crate::engine::grid::Grid;

/// Score needed this turn to bury the opponent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WinThreshold {
    pub skull_lines: u32,
    pub min_score: u32,
}

impl WinThreshold {
    pub fn from_skull_lines(skull_lines: u32) -> Self {
        Self {
            skull_lines,
            min_score: skull_lines * COLS as u32 * NUISANCE_POINTS,
        }
    }

    /// Threshold for this turn's search, given the score remainder already banked
    /// towards the next skull.
    pub fn relative_to(self, banked: u32) -> u32 {
        self.min_score.saturating_sub(banked % NUISANCE_POINTS)
    }

    #[inline]
    pub fn reached(self, score: u32) -> bool {
        score >= self.min_score
    }
}

/// Empty-cell reachability from the top row: (largest region, total reachable).
pub fn reachable_empty(grid: &Grid) -> (usize, usize) {
    let mut visited = [[false; COLS]; ROWS];
    let mut stack: Vec<(usize, usize)> = Vec::with_capacity(ROWS * COLS);
    let mut largest = 0usize;
    let mut total = 0usize;

    for start_c in 0..COLS {
        if visited[0][start_c] || !grid.get(0, start_c).is_empty() {
            continue;
        }

        let mut size = 0usize;
        visited[0][start_c] = true;
        stack.push((0, start_c));

        while let Some((r, c)) = stack.pop() {
            size += 1;
            let mut push = |nr: usize, nc: usize| {
                if !visited[nr][nc] && grid.get(nr, nc).is_empty() {
                    visited[nr][nc] = true;
                    stack.push((nr, nc));
                }
            };
            if r + 1 < ROWS {
                push(r + 1, c);
            }
            if r > 0 {
                push(r - 1, c);
            }
            if c + 1 < COLS {
                push(r, c + 1);
            }
            if c > 0 {
                push(r, c - 1);
            }
        }

        largest = largest.max(size);
        total += size;
    }

    (largest, total)
}

#[inline]
pub fn is_salvageable(grid: &Grid, remaining_pairs: usize) -> bool {
    let (largest, total) = reachable_empty(grid);
    largest >= MIN_GROUP && total >= 2 * remaining_pairs
}

/// Number of forced skull lines after which the board is no longer salvageable.
/// 0 means the board is already lost.
pub fn will_survive_with_skull_lines(grid: &Grid, remaining_pairs: usize) -> u32 {
    let mut g = *grid;
    let mut lines = 0u32;

    // Each line fills one cell per column; ROWS lines saturate any board.
    while (lines as usize) < ROWS && is_salvageable(&g, remaining_pairs) {
        g.drop_skull_line();
        lines += 1;
    }

    lines
}

pub fn win_threshold(opponent: &Grid, remaining_pairs: usize) -> WinThreshold {
    WinThreshold::from_skull_lines(will_survive_with_skull_lines(opponent, remaining_pairs))
}

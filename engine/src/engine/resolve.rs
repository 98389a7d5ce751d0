// engine/src/engine/resolve.rs
#![forbid(unsafe_code)]

/*
Resolution engine
-----------------

One call resolves a board after a pair has been locked:

  pass i:
    1. flood-fill same-color groups (from the dropped cells on pass 0 when a hint is
       given, from every colored cell otherwise)
    2. clear every group of >= MIN_GROUP cells, plus skulls orthogonally adjacent to a
       cleared colored cell
    3. score = 10 * cleared * clamp(CP(i) + CB(colors) + sum GB(group), 1, 999)
    4. gravity
  until a pass clears nothing.

Skulls never seed or extend groups. Only colored cells count towards `cleared`.
*/

use crate::engine::cell::Cell;
use crate::engine::constants::{COLS, MIN_GROUP, NB_COLORS, ROWS};
use crate::engine::grid::{Coord, Grid};

const COLOR_BONUS: [u32; NB_COLORS as usize] = [0, 2, 4, 8, 16];
const MAX_COEFFICIENT: u32 = 999;
const NEIGHBORS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A connected same-color set eligible for clearing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BigGroup {
    pub color: u8,
    pub cells: Vec<Coord>,
}

impl BigGroup {
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResolveStats {
    /// Score delta accumulated over every pass.
    pub score: u32,
    /// Passes that cleared at least one group (1 = no combo).
    pub chains: u32,
    /// Colored cells cleared.
    pub cleared: u32,
    pub skulls_cleared: u32,
}

impl ResolveStats {
    #[inline]
    pub fn matched(&self) -> bool {
        self.chains > 0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Resolution {
    pub grid: Grid,
    pub stats: ResolveStats,
}

/// Chain power for pass `iteration` (0-based): 0, 8, 16, 32, ...
#[inline]
pub fn chain_power(iteration: u32) -> u32 {
    if iteration == 0 {
        return 0;
    }
    8u32.saturating_mul(1u32.checked_shl(iteration - 1).unwrap_or(u32::MAX))
}

/// Bonus for the number of distinct colors cleared in one pass (1 color = 0).
#[inline]
pub fn color_bonus(distinct_colors: usize) -> u32 {
    match distinct_colors {
        0 => 0,
        n => COLOR_BONUS[(n - 1).min(COLOR_BONUS.len() - 1)],
    }
}

#[inline]
pub fn group_bonus(size: usize) -> u32 {
    if size >= 11 {
        8
    } else {
        size.saturating_sub(MIN_GROUP) as u32
    }
}

/// Score of a single pass.
pub fn pass_score(iteration: u32, groups: &[BigGroup]) -> u32 {
    let cleared: usize = groups.iter().map(BigGroup::size).sum();

    let mut seen = [false; NB_COLORS as usize + 1];
    let mut distinct = 0usize;
    let mut gb = 0u32;
    for g in groups {
        let slot = g.color as usize;
        if slot < seen.len() && !seen[slot] {
            seen[slot] = true;
            distinct += 1;
        }
        gb += group_bonus(g.size());
    }

    let coefficient = chain_power(iteration)
        .saturating_add(color_bonus(distinct))
        .saturating_add(gb)
        .clamp(1, MAX_COEFFICIENT);

    10 * cleared as u32 * coefficient
}

#[inline]
fn neighbor(r: usize, c: usize, dr: isize, dc: isize) -> Option<Coord> {
    let nr = r.checked_add_signed(dr)?;
    let nc = c.checked_add_signed(dc)?;
    (nr < ROWS && nc < COLS).then_some((nr, nc))
}

/// Flood-fill group detection.
///
/// `seeds = Some(..)` explores only the groups containing those cells; `None` scans the
/// whole board. Each cell is assigned to at most one group.
pub fn find_big_groups(grid: &Grid, seeds: Option<&[Coord]>) -> Vec<BigGroup> {
    let mut visited = [[false; COLS]; ROWS];
    let mut stack: Vec<Coord> = Vec::with_capacity(ROWS * COLS);
    let mut groups = Vec::new();

    let mut explore = |start: Coord, visited: &mut [[bool; COLS]; ROWS]| {
        let (sr, sc) = start;
        if visited[sr][sc] {
            return;
        }
        let Some(color) = grid.get(sr, sc).color_id() else {
            return;
        };

        let mut cells = Vec::new();
        visited[sr][sc] = true;
        stack.clear();
        stack.push(start);

        while let Some((r, c)) = stack.pop() {
            cells.push((r, c));
            for (dr, dc) in NEIGHBORS {
                let Some((nr, nc)) = neighbor(r, c, dr, dc) else {
                    continue;
                };
                if !visited[nr][nc] && grid.get(nr, nc) == Cell::Color(color) {
                    visited[nr][nc] = true;
                    stack.push((nr, nc));
                }
            }
        }

        if cells.len() >= MIN_GROUP {
            groups.push(BigGroup { color, cells });
        }
    };

    match seeds {
        Some(seeds) => {
            for &seed in seeds {
                explore(seed, &mut visited);
            }
        }
        None => {
            for r in 0..ROWS {
                for c in 0..COLS {
                    explore((r, c), &mut visited);
                }
            }
        }
    }

    groups
}

/// Clear groups and the skulls touching them. Returns the number of skulls removed.
fn clear_groups(grid: &mut Grid, groups: &[BigGroup]) -> u32 {
    let mut cleared = [[false; COLS]; ROWS];
    for g in groups {
        for &(r, c) in &g.cells {
            grid.set(r, c, Cell::Empty);
            cleared[r][c] = true;
        }
    }

    let mut skulls = 0u32;
    for r in 0..ROWS {
        for c in 0..COLS {
            if !cleared[r][c] {
                continue;
            }
            for (dr, dc) in NEIGHBORS {
                let Some((nr, nc)) = neighbor(r, c, dr, dc) else {
                    continue;
                };
                if grid.get(nr, nc).is_skull() {
                    grid.set(nr, nc, Cell::Empty);
                    skulls += 1;
                }
            }
        }
    }
    skulls
}

/// Resolve the board in place until stable.
///
/// `hint` holds the freshly dropped cells; pass 0 only explores their groups when it is
/// non-empty. A board without any group of `MIN_GROUP` cells is left untouched and
/// scores 0 (callers fall back to `potential` for ranking).
pub fn resolve_inplace(grid: &mut Grid, hint: &[Coord]) -> ResolveStats {
    let mut stats = ResolveStats::default();
    let mut iteration = 0u32;

    loop {
        let seeds = (iteration == 0 && !hint.is_empty()).then_some(hint);
        let groups = find_big_groups(grid, seeds);
        if groups.is_empty() {
            break;
        }

        stats.score = stats.score.saturating_add(pass_score(iteration, &groups));
        stats.cleared += groups.iter().map(BigGroup::size).sum::<usize>() as u32;
        stats.skulls_cleared += clear_groups(grid, &groups);
        stats.chains += 1;

        grid.apply_gravity();
        iteration += 1;
    }

    stats
}

/// Pure variant of `resolve_inplace`.
pub fn resolve(grid: &Grid, hint: &[Coord]) -> Resolution {
    let mut out = *grid;
    let stats = resolve_inplace(&mut out, hint);
    Resolution { grid: out, stats }
}

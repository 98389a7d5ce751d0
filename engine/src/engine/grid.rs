// engine/src/engine/grid.rs
#![forbid(unsafe_code)]

use std::fmt;

use crate::engine::cell::Cell;
use crate::engine::constants::{COLS, ROWS};
use crate::engine::pair::{Move, Orientation, Pair};
use crate::error::{Error, Result};

/// Playfield: row 0 is the top row, `ROWS - 1` the floor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Grid {
    cells: [[Cell; COLS]; ROWS],
}

/// Board coordinate `(row, col)`.
pub type Coord = (usize, usize);

impl Grid {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse `ROWS` strings of `COLS` glyphs each (top row first).
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        if rows.len() != ROWS {
            return Err(Error::GridRowCount {
                expected: ROWS,
                got: rows.len(),
            });
        }

        let mut cells = [[Cell::Empty; COLS]; ROWS];
        for (r, line) in rows.iter().enumerate() {
            let line = line.as_ref().trim();
            let width = line.chars().count();
            if width != COLS {
                return Err(Error::GridRowWidth {
                    row: r,
                    expected: COLS,
                    got: width,
                });
            }
            for (c, ch) in line.chars().enumerate() {
                cells[r][c] = Cell::from_char(ch).ok_or(Error::InvalidCell { ch, row: r, col: c })?;
            }
        }

        Ok(Self { cells })
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> Cell {
        self.cells[r][c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, cell: Cell) {
        self.cells[r][c] = cell;
    }

    /// Row where a block dropped into `col` comes to rest, None if the column is full.
    #[inline]
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        for r in 0..ROWS {
            if !self.cells[r][col].is_empty() {
                return r.checked_sub(1);
            }
        }
        Some(ROWS - 1)
    }

    pub fn count_empty(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|c| c.is_empty())
            .count()
    }

    /// Let every block fall to the lowest free cell of its column, keeping order.
    /// Returns true if any block moved.
    pub fn apply_gravity(&mut self) -> bool {
        let mut moved = false;
        for c in 0..COLS {
            let mut write_row = ROWS;
            for r in (0..ROWS).rev() {
                let v = self.cells[r][c];
                if v.is_empty() {
                    continue;
                }
                write_row -= 1;
                if write_row != r {
                    self.cells[write_row][c] = v;
                    self.cells[r][c] = Cell::Empty;
                    moved = true;
                }
            }
        }
        moved
    }

    /// True iff no empty cell has an occupied cell above it.
    pub fn is_stable(&self) -> bool {
        (0..COLS).all(|c| {
            let mut seen_block = false;
            for r in 0..ROWS {
                if self.cells[r][c].is_empty() {
                    if seen_block {
                        return false;
                    }
                } else {
                    seen_block = true;
                }
            }
            true
        })
    }

    /// Drop one skull into every column that still has room.
    /// Returns false if at least one column was already full.
    pub fn drop_skull_line(&mut self) -> bool {
        let mut all_fit = true;
        for c in 0..COLS {
            match self.landing_row(c) {
                Some(r) => self.cells[r][c] = Cell::Skull,
                None => all_fit = false,
            }
        }
        all_fit
    }

    /// Cheap 64-bit fingerprint of the grid (FNV-1a).
    #[inline]
    pub fn hash64(&self) -> u64 {
        let mut h: u64 = 1469598103934665603;
        for r in 0..ROWS {
            for c in 0..COLS {
                h ^= self.cells[r][c].code() as u64;
                h = h.wrapping_mul(1099511628211);
            }
        }
        h
    }

    pub fn render_ascii(&self) -> String {
        let mut s = String::with_capacity((COLS + 3) * (ROWS + 2));
        s.push('+');
        s.push_str(&"-".repeat(COLS));
        s.push_str("+\n");
        for row in &self.cells {
            s.push('|');
            for &v in row {
                s.push(if v.is_empty() { ' ' } else { v.glyph() });
            }
            s.push_str("|\n");
        }
        s.push('+');
        s.push_str(&"-".repeat(COLS));
        s.push_str("+\n");
        s
    }
}

impl fmt::Display for Grid {
    /// Wire format: one line per row, top row first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for &v in row {
                write!(f, "{}", v.glyph())?;
            }
        }
        Ok(())
    }
}

/// Landing cells of both blocks of `mv` as `[first, second]`, or None if the pair does
/// not fit (column out of range or not enough room).
pub fn pair_landing(grid: &Grid, mv: Move) -> Option<[Coord; 2]> {
    let col = mv.col;
    if col >= COLS {
        return None;
    }
    match mv.orientation {
        Orientation::Right | Orientation::Left => {
            let other = mv.second_col()?;
            let ra = grid.landing_row(col)?;
            let rb = grid.landing_row(other)?;
            Some([(ra, col), (rb, other)])
        }
        Orientation::Up => {
            let r = grid.landing_row(col)?;
            let above = r.checked_sub(1)?;
            Some([(r, col), (above, col)])
        }
        Orientation::Down => {
            let r = grid.landing_row(col)?;
            let above = r.checked_sub(1)?;
            Some([(above, col), (r, col)])
        }
    }
}

#[inline]
pub fn fits_on_grid(grid: &Grid, mv: Move) -> bool {
    pair_landing(grid, mv).is_some()
}

/// Lock `pair` onto the grid. Caller guarantees `fits_on_grid(grid, mv)`.
/// Returns the two landing coordinates (first block, second block).
pub fn lock_on_grid(grid: &mut Grid, pair: Pair, mv: Move) -> Option<[Coord; 2]> {
    let coords = pair_landing(grid, mv)?;
    let [(ra, ca), (rb, cb)] = coords;
    grid.set(ra, ca, Cell::Color(pair.first));
    grid.set(rb, cb, Cell::Color(pair.second));
    Some(coords)
}

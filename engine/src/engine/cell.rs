// engine/src/engine/cell.rs
#![forbid(unsafe_code)]

use crate::engine::constants::NB_COLORS;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Skull,
    /// Strict 1..=NB_COLORS.
    Color(u8),
}

impl Cell {
    /// Wire glyph: `.` empty, `0` skull, `1`..`5` color.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Cell::Empty),
            '0' => Some(Cell::Skull),
            _ => {
                let d = ch.to_digit(10)? as u8;
                Self::color(d)
            }
        }
    }

    /// Color cell for `1..=NB_COLORS`, None otherwise.
    pub fn color(c: u8) -> Option<Self> {
        (1..=NB_COLORS).contains(&c).then_some(Cell::Color(c))
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Skull => '0',
            Cell::Color(c) => char::from(b'0' + c),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[inline]
    pub fn is_skull(self) -> bool {
        self == Cell::Skull
    }

    #[inline]
    pub fn color_id(self) -> Option<u8> {
        match self {
            Cell::Color(c) => Some(c),
            _ => None,
        }
    }

    /// Compact code used for hashing (0 = empty, 6 = skull, colors as-is).
    #[inline]
    pub(crate) fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Skull => NB_COLORS + 1,
            Cell::Color(c) => c,
        }
    }
}

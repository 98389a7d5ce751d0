// engine/src/engine/pair.rs
#![forbid(unsafe_code)]

use std::fmt;

use crate::engine::cell::Cell;
use crate::engine::constants::{ACTION_DIM, COLS, LOOKAHEAD, decode_action_id, encode_action_id};
use crate::error::{Error, Result};

/// One falling piece: two colored blocks, `first` is the pivot the move column refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Pair {
    pub first: u8,
    pub second: u8,
}

impl Pair {
    pub fn new(first: u8, second: u8) -> Option<Self> {
        Cell::color(first)?;
        Cell::color(second)?;
        Some(Self { first, second })
    }

    /// Parse "A B" (or "AB") where A and B are color digits.
    pub fn parse(text: &str) -> Result<Self> {
        let digits: Vec<char> = text.chars().filter(|ch| !ch.is_whitespace()).collect();
        if digits.len() != 2 {
            return Err(Error::InvalidPair {
                text: text.to_string(),
                reason: "expected exactly two color tokens",
            });
        }

        let color = |ch: char| {
            Cell::from_char(ch)
                .and_then(Cell::color_id)
                .ok_or_else(|| Error::InvalidPair {
                    text: text.to_string(),
                    reason: "color must be 1..5",
                })
        };

        Ok(Self {
            first: color(digits[0])?,
            second: color(digits[1])?,
        })
    }
}

/// The known upcoming pairs, nearest first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PairQueue {
    pairs: [Pair; LOOKAHEAD],
}

impl PairQueue {
    pub fn new(pairs: [Pair; LOOKAHEAD]) -> Self {
        Self { pairs }
    }

    pub fn from_slice(pairs: &[Pair]) -> Result<Self> {
        let arr: [Pair; LOOKAHEAD] = pairs.try_into().map_err(|_| Error::PairQueueLength {
            expected: LOOKAHEAD,
            got: pairs.len(),
        })?;
        Ok(Self { pairs: arr })
    }

    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        if lines.len() != LOOKAHEAD {
            return Err(Error::PairQueueLength {
                expected: LOOKAHEAD,
                got: lines.len(),
            });
        }
        let pairs = lines
            .iter()
            .map(|l| Pair::parse(l.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::from_slice(&pairs)
    }

    #[inline]
    pub fn get(&self, step: usize) -> Pair {
        self.pairs[step]
    }

    #[inline]
    pub fn current(&self) -> Pair {
        self.pairs[0]
    }

    pub fn as_slice(&self) -> &[Pair] {
        &self.pairs
    }

    /// Shift the queue by one and append `next` at the far end.
    pub fn advance(&mut self, next: Pair) {
        self.pairs.rotate_left(1);
        self.pairs[LOOKAHEAD - 1] = next;
    }
}

/// Position of the second block relative to the first.
/// Discriminants are the wire rotation codes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Orientation {
    Right = 0,
    Up = 1,
    Left = 2,
    Down = 3,
}

impl Orientation {
    /// Enumeration order used everywhere moves are listed.
    pub const ALL: [Orientation; 4] = [
        Orientation::Right,
        Orientation::Up,
        Orientation::Left,
        Orientation::Down,
    ];

    #[inline]
    pub fn rotation(self) -> usize {
        self as usize
    }

    pub fn from_rotation(rot: usize) -> Option<Self> {
        Self::ALL.get(rot).copied()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    /// Column of the first block.
    pub col: usize,
    pub orientation: Orientation,
}

impl Move {
    /// Emitted when nothing legal was found.
    pub const FALLBACK: Move = Move {
        col: 0,
        orientation: Orientation::Right,
    };

    pub fn new(col: usize, orientation: Orientation) -> Self {
        Self { col, orientation }
    }

    #[inline]
    pub fn action_id(self) -> usize {
        encode_action_id(self.orientation.rotation(), self.col)
    }

    pub fn from_action_id(aid: usize) -> Option<Self> {
        if aid >= ACTION_DIM {
            return None;
        }
        let (rot, col) = decode_action_id(aid);
        Some(Self {
            col,
            orientation: Orientation::from_rotation(rot)?,
        })
    }

    /// Column of the second block, None if it would leave the board.
    #[inline]
    pub fn second_col(self) -> Option<usize> {
        match self.orientation {
            Orientation::Up | Orientation::Down => Some(self.col),
            Orientation::Right => (self.col + 1 < COLS).then_some(self.col + 1),
            Orientation::Left => self.col.checked_sub(1),
        }
    }

    /// All `ACTION_DIM` slots in enumeration order (orientation-major).
    pub fn all() -> impl Iterator<Item = Move> {
        (0..ACTION_DIM).filter_map(Move::from_action_id)
    }
}

impl fmt::Display for Move {
    /// Wire format: `column rotation`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.col, self.orientation.rotation())
    }
}

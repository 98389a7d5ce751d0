// engine/src/engine/constants.rs
#![forbid(unsafe_code)]

pub const ROWS: usize = 12;
pub const COLS: usize = 6;

/// Number of upcoming pairs known in advance (the pair queue length).
pub const LOOKAHEAD: usize = 8;

/// Distinct block colors, encoded `1..=NB_COLORS`.
pub const NB_COLORS: u8 = 5;

/// Minimum connected same-color cells that clear.
pub const MIN_GROUP: usize = 4;

/// Score points converted into one skull sent to the opponent.
pub const NUISANCE_POINTS: u32 = 70;

pub const MAX_ROTS: usize = 4;
pub const ACTION_DIM: usize = MAX_ROTS * COLS;

#[inline]
pub fn encode_action_id(rot: usize, col: usize) -> usize {
    debug_assert!(rot < MAX_ROTS);
    debug_assert!(col < COLS);
    rot * COLS + col
}

#[inline]
pub fn decode_action_id(aid: usize) -> (usize, usize) {
    (aid / COLS, aid % COLS)
}

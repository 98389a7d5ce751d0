// engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod area;
mod cell;
mod constants;
mod forecast;
mod grid;
mod pair;
mod pair_rule;
mod potential;
mod resolve;
mod versus;

/**
 * Curated engine public API.
 *
 * Internal implementation modules remain private; only stable items are re-exported here.
 */
pub use area::{PlayerArea, SimPlacement};
pub use cell::Cell;
pub use constants::{
    ACTION_DIM, COLS, LOOKAHEAD, MAX_ROTS, MIN_GROUP, NB_COLORS, NUISANCE_POINTS, ROWS,
    decode_action_id, encode_action_id,
};
pub use forecast::{
    WinThreshold, is_salvageable, reachable_empty, will_survive_with_skull_lines, win_threshold,
};
pub use grid::{Coord, Grid, fits_on_grid, lock_on_grid, pair_landing};
pub use pair::{Move, Orientation, Pair, PairQueue};
pub use pair_rule::PairRule;
pub use potential::{PotentialFeatures, compute_potential_features, potential};
pub use resolve::{
    BigGroup, Resolution, ResolveStats, chain_power, color_bonus, find_big_groups, group_bonus,
    pass_score, resolve, resolve_inplace,
};
pub use versus::{Outcome, Versus, VersusStep};

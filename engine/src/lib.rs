// engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod bot;
pub mod engine;
pub mod error;
pub mod inference;
pub mod policy;
pub mod search;
pub mod session;

// Flat re-exports for the CLI and the tests:
pub use bot::{Bot, annotation_for};
pub use engine::{
    ACTION_DIM, COLS, Cell, Grid, LOOKAHEAD, Move, NUISANCE_POINTS, Orientation, Pair,
    PairQueue, PairRule, PlayerArea, ROWS, ResolveStats, Versus, WinThreshold,
};
pub use error::{Error, Result};
pub use inference::{infer_opponent_score, relaxed_matches, update_opponent_score};
pub use policy::{Decision, GreedyPolicy, Policy, RandomPolicy};
pub use search::{BeamConfig, SearchConfig, SearchOutcome, search};
pub use session::{GameSession, SessionConfig, TurnInput, TurnSnapshot};

// engine/src/search/mod.rs
#![forbid(unsafe_code)]

mod arena;
mod best_first;
mod config;
mod layers;

pub use arena::{Arena, NodeId, SearchState};
pub use best_first::{BestFirstSearch, SearchOutcome, compare_states, is_better_than, search};
pub use config::{BeamConfig, SearchConfig};
pub use layers::{LayeredQueues, RankKey};

// engine/src/policy/mod.rs
#![forbid(unsafe_code)]

mod base;
mod greedy;
mod random;

/**
 * Curated policy public API.
 *
 * Internal implementation modules remain private; only stable policy entrypoints are re-exported.
 * The searching policy is `crate::Bot`.
 */
pub use base::{Decision, Policy};
pub use greedy::GreedyPolicy;
pub use random::RandomPolicy;

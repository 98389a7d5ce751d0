// engine/src/engine/pair_rule.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::constants::{LOOKAHEAD, NB_COLORS};
use crate::engine::pair::{Pair, PairQueue};

/// Seeded pair stream for simulated games: both colors uniform over `1..=NB_COLORS`.
#[derive(Clone, Debug)]
pub struct PairRule {
    // RNG lives here (spawn stream responsibility)
    rng: StdRng,
    drawn: u64,
}

impl PairRule {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            drawn: 0,
        }
    }

    pub fn draw(&mut self) -> Pair {
        self.drawn += 1;
        Pair {
            first: self.rng.random_range(1..=NB_COLORS),
            second: self.rng.random_range(1..=NB_COLORS),
        }
    }

    /// A full queue of `LOOKAHEAD` fresh pairs.
    pub fn draw_queue(&mut self) -> PairQueue {
        PairQueue::new(std::array::from_fn::<_, LOOKAHEAD, _>(|_| self.draw()))
    }

    pub fn drawn(&self) -> u64 {
        self.drawn
    }
}

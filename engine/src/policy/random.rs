// engine/src/policy/random.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::{Move, PlayerArea};
use crate::error::Result;
use crate::session::{GameSession, TurnInput};

use super::base::{Decision, Policy};

pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn decide(&mut self, _session: &mut GameSession, input: &TurnInput) -> Result<Decision> {
        let moves = PlayerArea::new(input.own, 0).legal_moves();
        let mv = moves.choose(&mut self.rng).copied().unwrap_or(Move::FALLBACK);
        Ok(Decision::plain(mv))
    }
}

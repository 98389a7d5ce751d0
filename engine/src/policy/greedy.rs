// engine/src/policy/greedy.rs
#![forbid(unsafe_code)]

use crate::engine::{Move, PlayerArea};
use crate::error::Result;
use crate::session::{GameSession, TurnInput};

use super::base::{Decision, Policy};

/// One-ply baseline: maximize (score delta, potential) of the current pair only.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn best_move(area: &PlayerArea, input: &TurnInput) -> Option<Move> {
        let pair = input.pairs.current();
        let mut best: Option<(Move, (u32, u32))> = None;

        for mv in Move::all() {
            let Some((next, stats)) = area.after_move(pair, mv) else {
                continue;
            };
            let v = (stats.score, next.potential);
            match best {
                None => best = Some((mv, v)),
                Some((_bm, bv)) if v > bv => best = Some((mv, v)),
                _ => {}
            }
        }

        best.map(|(mv, _)| mv)
    }
}

impl Policy for GreedyPolicy {
    fn decide(&mut self, _session: &mut GameSession, input: &TurnInput) -> Result<Decision> {
        let area = PlayerArea::new(input.own, 0);
        let mv = Self::best_move(&area, input).unwrap_or(Move::FALLBACK);
        Ok(Decision::plain(mv))
    }
}

// engine/src/engine/versus.rs
#![forbid(unsafe_code)]

/*
Two-player match simulator (self-play only; the live game is driven by the referee).

Per turn both players receive the same pair. After both moves resolve:
- each score delta is converted into skulls for the other side
  (`NUISANCE_POINTS` per skull, remainder carried over),
- pending skulls fall in full lines of `COLS`; partial lines stay pending.
A player that cannot place the current pair loses; both at once is a draw.
*/

use crate::engine::area::PlayerArea;
use crate::engine::constants::{COLS, NUISANCE_POINTS};
use crate::engine::grid::Grid;
use crate::engine::pair::{Move, PairQueue};
use crate::engine::pair_rule::PairRule;
use crate::engine::potential::potential;
use crate::engine::resolve::ResolveStats;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Won(usize),
    Draw,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct VersusStep {
    /// Per side; None when the move was illegal (that side lost).
    pub stats: [Option<ResolveStats>; 2],
    pub outcome: Option<Outcome>,
}

#[derive(Clone, Debug)]
pub struct Versus {
    pub areas: [PlayerArea; 2],
    pub queue: PairQueue,
    /// Skulls waiting to fall on each side.
    pub pending_skulls: [u32; 2],
    pub turn: u32,
    pub outcome: Option<Outcome>,

    rule: PairRule,
    carry: [u32; 2],
}

impl Versus {
    pub fn new(seed: u64) -> Self {
        let mut rule = PairRule::new(seed);
        let queue = rule.draw_queue();
        let area = PlayerArea::new(Grid::empty(), 0);
        Self {
            areas: [area, area],
            queue,
            pending_skulls: [0, 0],
            turn: 0,
            outcome: None,
            rule,
            carry: [0, 0],
        }
    }

    /// `(own, opponent)` areas from `side`'s point of view.
    pub fn view(&self, side: usize) -> (&PlayerArea, &PlayerArea) {
        (&self.areas[side], &self.areas[1 - side])
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn step(&mut self, moves: [Move; 2]) -> VersusStep {
        if let Some(outcome) = self.outcome {
            return VersusStep {
                stats: [None, None],
                outcome: Some(outcome),
            };
        }

        let pair = self.queue.current();
        let mut stats = [None, None];
        for side in 0..2 {
            stats[side] = self.areas[side].apply_move(pair, moves[side]);
        }

        self.outcome = match (stats[0].is_none(), stats[1].is_none()) {
            (true, true) => Some(Outcome::Draw),
            (true, false) => Some(Outcome::Won(1)),
            (false, true) => Some(Outcome::Won(0)),
            (false, false) => None,
        };

        for side in 0..2 {
            let delta = stats[side].map_or(0, |s| s.score);
            let total = self.carry[side] + delta;
            self.carry[side] = total % NUISANCE_POINTS;
            self.pending_skulls[1 - side] += total / NUISANCE_POINTS;
        }

        self.queue.advance(self.rule.draw());
        self.turn += 1;

        if self.outcome.is_none() {
            self.drop_pending_lines();
            // The next pair must fit somewhere, otherwise the game ends now.
            let stuck = [
                !self.areas[0].has_legal_move(),
                !self.areas[1].has_legal_move(),
            ];
            self.outcome = match stuck {
                [true, true] => Some(Outcome::Draw),
                [true, false] => Some(Outcome::Won(1)),
                [false, true] => Some(Outcome::Won(0)),
                [false, false] => None,
            };
        }

        VersusStep {
            stats,
            outcome: self.outcome,
        }
    }

    fn drop_pending_lines(&mut self) {
        let cols = COLS as u32;
        for side in 0..2 {
            let lines = self.pending_skulls[side] / cols;
            for _ in 0..lines {
                self.areas[side].grid.drop_skull_line();
            }
            self.pending_skulls[side] -= lines * cols;
            if lines > 0 {
                self.areas[side].potential = potential(&self.areas[side].grid);
            }
        }
    }
}

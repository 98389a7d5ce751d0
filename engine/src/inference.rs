// engine/src/inference.rs
#![forbid(unsafe_code)]

/*
Opponent inference
------------------

The opponent's score is hidden; its board is not. Replaying every placement of the
pair it received last turn over its previous board and matching the result against
the board observed now recovers the move it played, hence its score delta.

Garbage that fell since the last observation shows up as extra skulls on top of the
stacks, so a skull/empty disagreement is tolerated as long as nothing but skulls and
empties sits above it in both grids. The first matching candidate in move enumeration
order wins.
*/

use log::{debug, warn};

use crate::engine::{COLS, Cell, Grid, Move, Pair, PlayerArea, ROWS, ResolveStats};
use crate::session::{GameSession, OPPONENT};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InferredTurn {
    pub mv: Move,
    pub stats: ResolveStats,
    /// Opponent score after the inferred move.
    pub score: u32,
}

#[inline]
fn is_garbage_zone(cell: Cell) -> bool {
    !matches!(cell, Cell::Color(_))
}

/// Cell-wise equality, except that skull vs empty at the top of a column is accepted.
pub fn relaxed_matches(candidate: &Grid, observed: &Grid) -> bool {
    for c in 0..COLS {
        // Both columns only hold skulls/empties from the top down to row `r`.
        let mut top_zone = true;
        for r in 0..ROWS {
            let a = candidate.get(r, c);
            let b = observed.get(r, c);

            if a != b {
                let skull_vs_empty = matches!(
                    (a, b),
                    (Cell::Skull, Cell::Empty) | (Cell::Empty, Cell::Skull)
                );
                if !(skull_vs_empty && top_zone) {
                    return false;
                }
            }

            top_zone = top_zone && is_garbage_zone(a) && is_garbage_zone(b);
        }
    }
    true
}

/// Candidate placements of `pair` on `previous` that explain `observed`, in enumeration
/// order.
pub fn matching_moves(previous: &Grid, pair: Pair, observed: &Grid) -> Vec<(Move, ResolveStats)> {
    Move::all()
        .filter_map(|mv| {
            let sim = PlayerArea::simulate_move(previous, pair, mv)?;
            relaxed_matches(&sim.grid_after_resolve, observed).then_some((mv, sim.stats))
        })
        .collect()
}

/// First candidate explaining the observed board, None if nothing matches.
pub fn infer_opponent_move(
    previous: &Grid,
    pair: Pair,
    observed: &Grid,
) -> Option<(Move, ResolveStats)> {
    Move::all().find_map(|mv| {
        let sim = PlayerArea::simulate_move(previous, pair, mv)?;
        relaxed_matches(&sim.grid_after_resolve, observed).then_some((mv, sim.stats))
    })
}

pub fn infer_opponent_score(
    previous: &Grid,
    previous_score: u32,
    pair: Pair,
    observed: &Grid,
) -> Option<InferredTurn> {
    let (mv, stats) = infer_opponent_move(previous, pair, observed)?;
    Some(InferredTurn {
        mv,
        stats,
        score: previous_score.saturating_add(stats.score),
    })
}

/// Update the session's opponent score from the newly observed opponent board.
/// On a miss the previous score is kept. Returns the opponent score now in effect.
pub fn update_opponent_score(session: &mut GameSession, observed: &Grid) -> u32 {
    let Some(last) = session.last() else {
        return session.opponent_score();
    };
    let previous = last.areas[OPPONENT].grid;
    let pair = last.pairs.current();
    let turn = last.turn;

    match infer_opponent_score(&previous, session.opponent_score(), pair, observed) {
        Some(inferred) => {
            debug!(
                "inference: turn={} opponent move={} delta={} score={}",
                turn, inferred.mv, inferred.stats.score, inferred.score
            );
            session.set_opponent_score(inferred.score);
        }
        None => {
            warn!("inference: turn={turn} no candidate matches the observed opponent board");
        }
    }

    session.opponent_score()
}

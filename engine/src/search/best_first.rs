// engine/src/search/best_first.rs
#![forbid(unsafe_code)]

/*
Layered best-first search
-------------------------

Anytime search over the known pair queue:

- the root is the current area with its score rebased to 0;
- expanding a state plays the pair of its step in every fitting (orientation, column)
  and resolves the result, creating children at `step + 1`;
- one heap per depth, always served shallowest first, so every layer is explored
  breadth-wise before the search dives (see `LayeredQueues`);
- the best state seen is tracked on every child creation (`is_better_than`);
- the deadline is polled every `check_every` expansions; the root is always fully
  expanded first, so a move is available however short the budget.

The emitted move is the first ply on the path to the best state.
*/

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use rustc_hash::FxHashSet;

use crate::engine::{Move, PairQueue, PlayerArea};

use super::arena::{Arena, NodeId, SearchState};
use super::config::SearchConfig;
use super::layers::{LayeredQueues, RankKey};

#[derive(Clone, Copy, Debug)]
pub struct SearchOutcome {
    pub mv: Move,
    /// False when no legal move existed and `Move::FALLBACK` was emitted.
    pub found: bool,
    /// Score (relative to the root) of the best state.
    pub best_score: u32,
    pub best_step: u8,
    pub won: bool,
    /// Score delta of the emitted move alone.
    pub first_delta: u32,
    pub expansions: u64,
    pub nodes: usize,
    pub timed_out: bool,
    pub elapsed: Duration,
}

/// Total order used for the global best state.
///
/// Priority: win threshold reached, then (won) fewer steps to the win / (not won) higher
/// score, then the remaining one of those two, then higher potential.
pub fn compare_states(a: &SearchState, b: &SearchState) -> Ordering {
    match (a.won_at, b.won_at) {
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (Some(x), Some(y)) => y
            .cmp(&x)
            .then(a.area.score.cmp(&b.area.score))
            .then(a.area.potential.cmp(&b.area.potential)),
        (None, None) => a
            .area
            .score
            .cmp(&b.area.score)
            .then(b.step.cmp(&a.step))
            .then(a.area.potential.cmp(&b.area.potential)),
    }
}

#[inline]
pub fn is_better_than(a: &SearchState, b: &SearchState) -> bool {
    compare_states(a, b) == Ordering::Greater
}

/// Polls the wall clock only every `every` ticks.
#[derive(Clone, Copy, Debug)]
struct Deadline {
    at: Instant,
    every: u64,
}

impl Deadline {
    #[inline]
    fn expired(&self, ticks: u64) -> bool {
        ticks % self.every == 0 && Instant::now() >= self.at
    }
}

pub struct BestFirstSearch<'a> {
    pairs: &'a PairQueue,
    config: &'a SearchConfig,
    threshold: u32,
    depth: usize,

    arena: Arena,
    layers: LayeredQueues,
    seen: Vec<FxHashSet<u64>>,
    best: Option<NodeId>,
}

impl<'a> BestFirstSearch<'a> {
    /// `threshold` is the score (relative to this turn) that guarantees the win.
    pub fn new(
        root: &PlayerArea,
        pairs: &'a PairQueue,
        threshold: u32,
        config: &'a SearchConfig,
    ) -> Self {
        let depth = config.effective_depth();
        let root_area = PlayerArea {
            score: 0,
            last_move: None,
            ..*root
        };
        Self {
            pairs,
            config,
            threshold,
            depth,
            arena: Arena::with_root(root_area),
            layers: LayeredQueues::new(depth),
            seen: (0..=depth).map(|_| FxHashSet::default()).collect(),
            best: None,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn best(&self) -> Option<NodeId> {
        self.best
    }

    /// Dedupe key: states only merge when grid, score and win step all agree.
    #[inline]
    fn fingerprint(area: &PlayerArea, won_at: Option<u8>) -> u64 {
        let won = u64::from(won_at.map_or(0, |w| w.saturating_add(1)));
        area.grid.hash64()
            ^ u64::from(area.score).wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ won.wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
    }

    /// Create every child of `id`. Returns the number of children kept.
    fn expand(&mut self, id: NodeId) -> usize {
        let parent = *self.arena.get(id);
        let step = parent.step as usize;
        debug_assert!(step < self.depth);

        let pair = self.pairs.get(step);
        let child_step = step + 1;
        let mut kept = 0usize;

        for mv in Move::all() {
            let Some((area, _stats)) = parent.area.after_move(pair, mv) else {
                continue;
            };

            let won_at = parent
                .won_at
                .or_else(|| (area.score >= self.threshold).then_some(child_step as u8));

            if self.config.dedupe
                && !self.seen[child_step].insert(Self::fingerprint(&area, won_at))
            {
                continue;
            }
            let child = SearchState {
                area,
                step: child_step as u8,
                parent: Some(id),
                won_at,
            };

            let cid = self.arena.push(child);
            kept += 1;

            let improves = match self.best {
                None => true,
                Some(b) => is_better_than(&child, self.arena.get(b)),
            };
            if improves {
                self.best = Some(cid);
            }

            if child_step < self.depth {
                self.layers.push(child_step, RankKey::of(&child), cid);
            }
        }

        kept
    }

    pub fn run(&mut self) -> SearchOutcome {
        let started = Instant::now();
        let deadline = Deadline {
            at: started + self.config.time_budget,
            every: self.config.poll_every(),
        };

        // Root first, unconditionally.
        self.expand(NodeId::ROOT);
        let mut expansions: u64 = 1;
        let mut timed_out = false;

        loop {
            if deadline.expired(expansions) {
                timed_out = true;
                break;
            }
            let config = self.config;
            let Some((layer, id)) = self.layers.pop_shallowest(|l| config.layer_cap(l)) else {
                break;
            };
            let kept = self.expand(id);
            trace!("expand layer={layer} node={} children={kept}", id.index());
            expansions += 1;
        }

        let elapsed = started.elapsed();
        let outcome = self.outcome(expansions, timed_out, elapsed);

        debug!(
            "search: move={} found={} best_score={} best_step={} won={} expansions={} nodes={} pending={} timed_out={} elapsed={:.2}ms",
            outcome.mv,
            outcome.found,
            outcome.best_score,
            outcome.best_step,
            outcome.won,
            outcome.expansions,
            outcome.nodes,
            self.layers.len(),
            outcome.timed_out,
            elapsed.as_secs_f64() * 1000.0
        );

        outcome
    }

    fn outcome(&self, expansions: u64, timed_out: bool, elapsed: Duration) -> SearchOutcome {
        let first = self.best.and_then(|b| self.arena.first_ply(b));

        match (self.best, first) {
            (Some(best), Some(first)) => {
                let best_state = self.arena.get(best);
                let first_state = self.arena.get(first);
                SearchOutcome {
                    mv: first_state.area.last_move.unwrap_or(Move::FALLBACK),
                    found: true,
                    best_score: best_state.area.score,
                    best_step: best_state.step,
                    won: best_state.is_won(),
                    first_delta: first_state.area.score,
                    expansions,
                    nodes: self.arena.len(),
                    timed_out,
                    elapsed,
                }
            }
            _ => {
                warn!("search: no legal move, emitting fallback {}", Move::FALLBACK);
                SearchOutcome {
                    mv: Move::FALLBACK,
                    found: false,
                    best_score: 0,
                    best_step: 0,
                    won: false,
                    first_delta: 0,
                    expansions,
                    nodes: self.arena.len(),
                    timed_out,
                    elapsed,
                }
            }
        }
    }
}

/// One-shot search from `root` over `pairs`.
pub fn search(
    root: &PlayerArea,
    pairs: &PairQueue,
    threshold: u32,
    config: &SearchConfig,
) -> SearchOutcome {
    BestFirstSearch::new(root, pairs, threshold, config).run()
}

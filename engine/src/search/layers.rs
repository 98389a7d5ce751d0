// engine/src/search/layers.rs
#![forbid(unsafe_code)]

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::arena::{NodeId, SearchState};

/// Expansion priority inside one layer (greater = expanded first).
///
/// - States past the win threshold come first, ordered by fewer steps used, then score.
/// - Other states are ordered by potential, then score.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct RankKey {
    won: bool,
    primary: u32,
    secondary: u32,
}

impl RankKey {
    pub fn of(state: &SearchState) -> Self {
        match state.won_at {
            Some(at) => Self {
                won: true,
                primary: u32::from(u8::MAX - at),
                secondary: state.area.score,
            },
            None => Self {
                won: false,
                primary: state.area.potential,
                secondary: state.area.score,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Ranked {
    key: RankKey,
    id: NodeId,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ties go to the state created first.
        self.key
            .cmp(&other.key)
            .then_with(|| Reverse(self.id).cmp(&Reverse(other.id)))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One max-heap per depth; the shallowest non-exhausted layer is always served first.
#[derive(Clone, Debug)]
pub struct LayeredQueues {
    heaps: Vec<BinaryHeap<Ranked>>,
    popped: Vec<usize>,
}

impl LayeredQueues {
    pub fn new(depth: usize) -> Self {
        Self {
            heaps: (0..depth).map(|_| BinaryHeap::new()).collect(),
            popped: vec![0; depth],
        }
    }

    pub fn push(&mut self, layer: usize, key: RankKey, id: NodeId) {
        self.heaps[layer].push(Ranked { key, id });
    }

    /// Pop the best state of the shallowest layer that still has states and has not hit
    /// its cap. Returns `(layer, id)`.
    pub fn pop_shallowest<F>(&mut self, cap: F) -> Option<(usize, NodeId)>
    where
        F: Fn(usize) -> Option<usize>,
    {
        for (layer, heap) in self.heaps.iter_mut().enumerate() {
            if cap(layer).is_some_and(|n| self.popped[layer] >= n) {
                continue;
            }
            if let Some(r) = heap.pop() {
                self.popped[layer] += 1;
                return Some((layer, r.id));
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.heaps.iter().map(BinaryHeap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.heaps.iter().all(BinaryHeap::is_empty)
    }

    /// States popped so far from `layer`.
    pub fn expanded(&self, layer: usize) -> usize {
        self.popped.get(layer).copied().unwrap_or(0)
    }
}

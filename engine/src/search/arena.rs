// engine/src/search/arena.rs
#![forbid(unsafe_code)]

use crate::engine::{Move, PlayerArea};

/// Index of a state in the arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One node of the move tree. Written once at creation, never mutated.
#[derive(Clone, Copy, Debug)]
pub struct SearchState {
    /// Owned snapshot; children never alias their parent's grid.
    pub area: PlayerArea,
    /// Pairs already placed on the path from the root (0 for the root).
    pub step: u8,
    /// None only for the root.
    pub parent: Option<NodeId>,
    /// Step at which the cumulative score first reached the win threshold.
    pub won_at: Option<u8>,
}

impl SearchState {
    pub fn root(area: PlayerArea) -> Self {
        Self {
            area,
            step: 0,
            parent: None,
            won_at: None,
        }
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.won_at.is_some()
    }
}

/// Append-only store of the search tree. Parent links are indices, so the tree can only
/// be walked backwards.
#[derive(Clone, Debug)]
pub struct Arena {
    nodes: Vec<SearchState>,
}

impl Arena {
    pub fn with_root(area: PlayerArea) -> Self {
        let mut nodes = Vec::with_capacity(4096);
        nodes.push(SearchState::root(area));
        Self { nodes }
    }

    pub fn push(&mut self, state: SearchState) -> NodeId {
        debug_assert!(state.parent.is_some_and(|p| p.index() < self.nodes.len()));
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(state);
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchState {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn root(&self) -> &SearchState {
        &self.nodes[0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ancestor of `id` that is a direct child of the root.
    pub fn first_ply(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = id;
        loop {
            match self.get(cur).parent {
                None => return None,
                Some(NodeId::ROOT) => return Some(cur),
                Some(p) => cur = p,
            }
        }
    }

    /// Move that leaves the root on the way to `id`.
    pub fn first_move(&self, id: NodeId) -> Option<Move> {
        self.get(self.first_ply(id)?).area.last_move
    }

    /// Moves from the root to `id`, in play order.
    pub fn path(&self, id: NodeId) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.get(id).step as usize);
        let mut cur = id;
        while let Some(p) = self.get(cur).parent {
            if let Some(mv) = self.get(cur).area.last_move {
                moves.push(mv);
            }
            cur = p;
        }
        moves.reverse();
        moves
    }
}

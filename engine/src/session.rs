// engine/src/session.rs
#![forbid(unsafe_code)]

use crate::engine::{Grid, Move, PairQueue, PlayerArea};
use crate::error::{Error, Result};

pub const OWN: usize = 0;
pub const OPPONENT: usize = 1;

/// Everything observed at the start of one turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TurnInput {
    pub pairs: PairQueue,
    pub own: Grid,
    pub opponent: Grid,
}

impl TurnInput {
    pub fn parse<A, B, C>(pair_lines: &[A], own_rows: &[B], opponent_rows: &[C]) -> Result<Self>
    where
        A: AsRef<str>,
        B: AsRef<str>,
        C: AsRef<str>,
    {
        Ok(Self {
            pairs: PairQueue::parse(pair_lines)?,
            own: Grid::parse(own_rows)?,
            opponent: Grid::parse(opponent_rows)?,
        })
    }
}

/// Immutable record of one finished turn.
#[derive(Clone, Copy, Debug)]
pub struct TurnSnapshot {
    pub turn: u32,
    pub pairs: PairQueue,
    /// `[OWN, OPPONENT]`, scores as known when the turn was decided.
    pub areas: [PlayerArea; 2],
    pub chosen: Move,
}

#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub max_turns: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_turns: 200 }
    }
}

/// Per-game context: append-only turn history plus both running scores.
/// Lives for one process / one game; nothing is persisted.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: SessionConfig,
    history: Vec<TurnSnapshot>,
    own_score: u32,
    opponent_score: u32,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            history: Vec::with_capacity(config.max_turns.min(1024)),
            own_score: 0,
            opponent_score: 0,
        }
    }

    pub fn record(&mut self, snapshot: TurnSnapshot) -> Result<()> {
        if self.history.len() >= self.config.max_turns {
            return Err(Error::HistoryFull {
                max_turns: self.config.max_turns,
            });
        }
        self.history.push(snapshot);
        Ok(())
    }

    pub fn last(&self) -> Option<&TurnSnapshot> {
        self.history.last()
    }

    pub fn history(&self) -> &[TurnSnapshot] {
        &self.history
    }

    /// Index of the turn about to be played.
    pub fn turn(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn is_full(&self) -> bool {
        self.history.len() >= self.config.max_turns
    }

    pub fn own_score(&self) -> u32 {
        self.own_score
    }

    pub fn opponent_score(&self) -> u32 {
        self.opponent_score
    }

    pub fn credit_own(&mut self, delta: u32) {
        self.own_score = self.own_score.saturating_add(delta);
    }

    pub fn set_opponent_score(&mut self, score: u32) {
        self.opponent_score = score;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

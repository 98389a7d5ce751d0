// engine/src/policy/base.rs
#![forbid(unsafe_code)]

use crate::engine::{Move, WinThreshold};
use crate::error::Result;
use crate::search::SearchOutcome;
use crate::session::{GameSession, TurnInput};

/// One turn's answer.
#[derive(Clone, Copy, Debug)]
pub struct Decision {
    pub mv: Move,
    /// Cosmetic text printed next to the move; never read back.
    pub annotation: Option<&'static str>,
    /// Present when the move came out of a search.
    pub search: Option<SearchOutcome>,
    pub threshold: Option<WinThreshold>,
}

impl Decision {
    pub fn plain(mv: Move) -> Self {
        Self {
            mv,
            annotation: None,
            search: None,
            threshold: None,
        }
    }

    /// Output line: `column rotation [annotation]`.
    pub fn to_line(&self) -> String {
        match self.annotation {
            Some(text) => format!("{} {}", self.mv, text),
            None => self.mv.to_string(),
        }
    }
}

/// Policy chooses a placement for the current turn.
///
/// Always returns a structurally valid move (possibly `Move::FALLBACK`); errors are
/// reserved for session bookkeeping failures.
///
/// Object-safe so it can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn decide(&mut self, session: &mut GameSession, input: &TurnInput) -> Result<Decision>;
}

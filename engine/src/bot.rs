// engine/src/bot.rs
#![forbid(unsafe_code)]

use log::{debug, info, warn};

use crate::engine::{LOOKAHEAD, PlayerArea, win_threshold};
use crate::error::Result;
use crate::inference::update_opponent_score;
use crate::policy::{Decision, Policy};
use crate::search::{SearchConfig, search};
use crate::session::{GameSession, TurnInput, TurnSnapshot};

/// Cosmetic text keyed by the score delta of the move about to be played.
pub fn annotation_for(delta: u32) -> Option<&'static str> {
    match delta {
        d if d > 2000 => Some("Annihilation!"),
        d if d > 1000 => Some("Combo!"),
        d if d > 300 => Some("Nice."),
        _ => None,
    }
}

/// Full per-turn pipeline: opponent inference, loss forecast, search, bookkeeping.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bot {
    config: SearchConfig,
}

impl Bot {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn play_turn(&mut self, session: &mut GameSession, input: &TurnInput) -> Result<Decision> {
        let turn = session.turn();

        let opponent_score = update_opponent_score(session, &input.opponent);

        let threshold = win_threshold(&input.opponent, LOOKAHEAD);
        let relative = threshold.relative_to(session.own_score());
        debug!(
            "turn={turn} forecast: skull_lines={} min_score={} relative={relative}",
            threshold.skull_lines, threshold.min_score
        );

        let own = PlayerArea::new(input.own, session.own_score());
        let outcome = search(&own, &input.pairs, relative, &self.config);

        // A full history only stops bookkeeping; the move still goes out.
        if session.is_full() {
            warn!(
                "turn={turn} history full ({} turns), not recording",
                session.history().len()
            );
        } else {
            session.record(TurnSnapshot {
                turn,
                pairs: input.pairs,
                areas: [own, PlayerArea::new(input.opponent, opponent_score)],
                chosen: outcome.mv,
            })?;
        }
        session.credit_own(outcome.first_delta);

        info!(
            "turn={turn} move={} delta={} own_score={} opponent_score={opponent_score} plan_score={} plan_steps={} won={} timed_out={}",
            outcome.mv,
            outcome.first_delta,
            session.own_score(),
            outcome.best_score,
            outcome.best_step,
            outcome.won,
            outcome.timed_out
        );

        Ok(Decision {
            mv: outcome.mv,
            annotation: annotation_for(outcome.first_delta),
            search: Some(outcome),
            threshold: Some(threshold),
        })
    }
}

impl Policy for Bot {
    fn decide(&mut self, session: &mut GameSession, input: &TurnInput) -> Result<Decision> {
        self.play_turn(session, input)
    }
}

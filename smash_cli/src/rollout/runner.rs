// smash_cli/src/rollout/runner.rs
#![forbid(unsafe_code)]

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use smash_engine::{GameSession, Policy, SessionConfig, TurnInput, Versus};

use super::stats::{FinalReport, RolloutStats};

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    // ---------------- core rollout ----------------
    /// Matches to play.
    pub matches: u64,
    /// Base seed; each match uses base_seed + match_id.
    pub base_seed: u64,
    /// Turn cap per match (also the session history bound).
    pub max_turns: u32,

    /// Used only for the final report string.
    pub policy_names: [String; 2],

    // ---------------- output ----------------
    /// 0 = final summary only
    /// 1 = progress bar
    pub verbosity: u8,

    // ---------------- rendering ----------------
    /// If Some(ms): render both boards every turn; sleep ms between frames (0 = no sleep).
    pub render_ms: Option<u64>,
}

/// Builds a fresh policy for one side of one match.
pub type PolicyFactory<'a> = dyn Fn(usize, u64) -> Box<dyn Policy> + 'a;

pub struct Runner<'a> {
    cfg: RunnerConfig,
    make_policy: Box<PolicyFactory<'a>>,
}

fn render_pair(versus: &Versus) -> String {
    let left = versus.areas[0].grid.render_ascii();
    let right = versus.areas[1].grid.render_ascii();
    let mut s = String::new();
    for (l, r) in left.lines().zip(right.lines()) {
        s.push_str(l);
        s.push_str("   ");
        s.push_str(r);
        s.push('\n');
    }
    s.push_str(&format!(
        "turn={} score={}/{} pending_skulls={}/{}\n",
        versus.turn,
        versus.areas[0].score,
        versus.areas[1].score,
        versus.pending_skulls[0],
        versus.pending_skulls[1]
    ));
    s
}

impl<'a> Runner<'a> {
    pub fn new(cfg: RunnerConfig, make_policy: Box<PolicyFactory<'a>>) -> Self {
        Self { cfg, make_policy }
    }

    pub fn run(&mut self) -> smash_engine::Result<FinalReport> {
        let cfg = self.cfg.clone();

        // Progress bar is UI only; runner logic does not depend on it.
        let pb = if cfg.verbosity >= 1 {
            let pb = ProgressBar::new(cfg.matches);
            if let Ok(style) = ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos:>6}/{len:<6}  {percent:>3}%  {elapsed_precise}  {msg}",
            ) {
                pb.set_style(style.progress_chars("=>-"));
            }
            Some(pb)
        } else {
            None
        };

        let mut stats = RolloutStats::new();

        for match_id in 0..cfg.matches {
            let seed = cfg.base_seed.wrapping_add(match_id);
            let mut versus = Versus::new(seed);
            let session_cfg = SessionConfig {
                max_turns: cfg.max_turns as usize,
            };
            let mut sessions = [GameSession::new(session_cfg), GameSession::new(session_cfg)];
            let mut policies = [
                (self.make_policy)(0, seed),
                (self.make_policy)(1, seed.wrapping_add(0x5EED)),
            ];

            while !versus.is_over() && versus.turn < cfg.max_turns {
                let mut moves = [smash_engine::Move::FALLBACK; 2];
                for side in 0..2 {
                    let (own, opponent) = versus.view(side);
                    let input = TurnInput {
                        pairs: versus.queue,
                        own: own.grid,
                        opponent: opponent.grid,
                    };
                    let decision = policies[side].decide(&mut sessions[side], &input)?;
                    if let Some(s) = decision.search.as_ref() {
                        stats.on_search(s);
                    }
                    moves[side] = decision.mv;
                }

                let step = versus.step(moves);
                let deltas = step.stats.map(|s| s.map_or(0, |s| s.score));
                stats.on_turn(deltas);

                if let Some(ms) = cfg.render_ms {
                    println!("match={match_id} moves={} | {}", moves[0], moves[1]);
                    print!("{}", render_pair(&versus));
                    if ms > 0 {
                        std::thread::sleep(Duration::from_millis(ms));
                    }
                }
            }

            let scores = [versus.areas[0].score, versus.areas[1].score];
            debug!(
                "match={match_id} seed={seed} outcome={:?} turns={} scores={}/{}",
                versus.outcome, versus.turn, scores[0], scores[1]
            );
            stats.on_match_end(versus.outcome, versus.turn, scores);

            if let Some(ref pb) = pb {
                pb.inc(1);
                pb.set_message(stats.live_msg());
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        Ok(stats.final_report([
            cfg.policy_names[0].as_str(),
            cfg.policy_names[1].as_str(),
        ]))
    }
}

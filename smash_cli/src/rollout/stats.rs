// smash_cli/src/rollout/stats.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use smash_engine::engine::Outcome;
use smash_engine::SearchOutcome;

#[derive(Clone, Debug)]
pub struct RolloutStats {
    pub matches_finished: u64,
    pub wins: [u64; 2],
    pub draws: u64,
    /// Matches stopped by the turn cap.
    pub unfinished: u64,

    pub turns_done: u64,
    pub match_len_sum: u64,
    pub match_len_max: u64,

    pub score_sum: [u64; 2],
    pub best_delta: u32,

    // search aggregates (searching policies only)
    pub searches: u64,
    pub timeouts: u64,
    pub expansions: u64,
    pub fallbacks: u64,

    t0: Instant,
}

impl RolloutStats {
    pub fn new() -> Self {
        Self {
            matches_finished: 0,
            wins: [0, 0],
            draws: 0,
            unfinished: 0,
            turns_done: 0,
            match_len_sum: 0,
            match_len_max: 0,
            score_sum: [0, 0],
            best_delta: 0,
            searches: 0,
            timeouts: 0,
            expansions: 0,
            fallbacks: 0,
            t0: Instant::now(),
        }
    }

    /// Call once per simulated turn.
    pub fn on_turn(&mut self, deltas: [u32; 2]) {
        self.turns_done += 1;
        self.best_delta = self.best_delta.max(deltas[0]).max(deltas[1]);
    }

    pub fn on_search(&mut self, s: &SearchOutcome) {
        self.searches += 1;
        self.expansions += s.expansions;
        if s.timed_out {
            self.timeouts += 1;
        }
        if !s.found {
            self.fallbacks += 1;
        }
    }

    /// Call when a match ends, by outcome or by the turn cap (`outcome = None`).
    pub fn on_match_end(&mut self, outcome: Option<Outcome>, turns: u32, scores: [u32; 2]) {
        self.matches_finished += 1;
        match outcome {
            Some(Outcome::Won(side)) => self.wins[side] += 1,
            Some(Outcome::Draw) => self.draws += 1,
            None => self.unfinished += 1,
        }
        self.match_len_sum += u64::from(turns);
        self.match_len_max = self.match_len_max.max(u64::from(turns));
        for side in 0..2 {
            self.score_sum[side] += u64::from(scores[side]);
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    pub fn turns_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 {
            self.turns_done as f64 / dt
        } else {
            0.0
        }
    }

    pub fn avg_match_len(&self) -> f64 {
        if self.matches_finished > 0 {
            self.match_len_sum as f64 / self.matches_finished as f64
        } else {
            0.0
        }
    }

    pub fn avg_score(&self, side: usize) -> f64 {
        if self.matches_finished > 0 {
            self.score_sum[side] as f64 / self.matches_finished as f64
        } else {
            0.0
        }
    }

    pub fn avg_expansions(&self) -> f64 {
        if self.searches > 0 {
            self.expansions as f64 / self.searches as f64
        } else {
            0.0
        }
    }

    pub fn live_msg(&self) -> String {
        format!(
            "W/L/D={}/{}/{} len={:.1} tps={:.1}",
            self.wins[0],
            self.wins[1],
            self.draws,
            self.avg_match_len(),
            self.turns_per_sec()
        )
    }

    pub fn final_report(&self, policies: [&str; 2]) -> FinalReport {
        FinalReport {
            policies: [policies[0].to_string(), policies[1].to_string()],
            matches: self.matches_finished,
            wins: self.wins,
            draws: self.draws,
            unfinished: self.unfinished,
            avg_match_len: self.avg_match_len(),
            max_match_len: self.match_len_max,
            avg_score: [self.avg_score(0), self.avg_score(1)],
            best_delta: self.best_delta,
            searches: self.searches,
            timeouts: self.timeouts,
            fallbacks: self.fallbacks,
            avg_expansions: self.avg_expansions(),
            elapsed_s: self.elapsed_secs(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FinalReport {
    pub policies: [String; 2],
    pub matches: u64,
    pub wins: [u64; 2],
    pub draws: u64,
    pub unfinished: u64,
    pub avg_match_len: f64,
    pub max_match_len: u64,
    pub avg_score: [f64; 2],
    pub best_delta: u32,
    pub searches: u64,
    pub timeouts: u64,
    pub fallbacks: u64,
    pub avg_expansions: f64,
    pub elapsed_s: f64,
}

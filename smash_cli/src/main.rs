// smash_cli/src/main.rs
#![forbid(unsafe_code)]

mod logging;
mod protocol;
mod rollout;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};

use crate::protocol::TurnReader;
use crate::rollout::{Runner, RunnerConfig};
use smash_engine::{
    BeamConfig, Bot, GameSession, GreedyPolicy, LOOKAHEAD, Policy, RandomPolicy, SearchConfig,
    SessionConfig,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyKind {
    Search,
    Greedy,
    Random,
}

impl PolicyKind {
    fn name(self) -> &'static str {
        match self {
            PolicyKind::Search => "search",
            PolicyKind::Greedy => "greedy",
            PolicyKind::Random => "random",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "smash_cli")]
struct Args {
    /// Log level (overridden by RUST_LOG). Logs go to stderr.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    // ---------------- search ----------------
    /// Wall-clock budget per decision, in milliseconds.
    #[arg(long, global = true, default_value_t = 40)]
    time_budget_ms: u64,

    /// Search depth in pairs (clamped to 1..=8).
    #[arg(long, global = true, default_value_t = LOOKAHEAD)]
    depth: usize,

    /// Beam width per layer. If omitted, layers are unbounded.
    #[arg(long, global = true)]
    beam_width: Option<usize>,

    /// Apply the beam from this layer onward (only used with --beam-width).
    #[arg(long, global = true, default_value_t = 0)]
    beam_from_depth: u8,

    /// Poll the deadline every N expansions.
    #[arg(long, global = true, default_value_t = 32)]
    check_every: u32,

    /// Disable per-layer duplicate pruning.
    #[arg(long, global = true)]
    no_dedupe: bool,

    /// Turn history bound per game.
    #[arg(long, global = true, default_value_t = 200)]
    max_turns: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read turns from stdin, answer one move line per turn on stdout.
    Play,

    /// Self-play matches between two policies.
    Rollout {
        #[arg(long, default_value_t = 10)]
        matches: u64,

        /// Base RNG seed (matches use base_seed + match_id).
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value_t = PolicyKind::Search)]
        policy_a: PolicyKind,

        #[arg(long, value_enum, default_value_t = PolicyKind::Greedy)]
        policy_b: PolicyKind,

        /// Verbosity: 0=final summary only, 1=progress bar.
        #[arg(long, default_value_t = 1)]
        verbosity: u8,

        /**
         * Render both boards every turn; value is sleep in ms. Omit to disable rendering.
         *   --render 0    (as fast as possible)
         *   --render 100  (sleep 100ms between frames)
         */
        #[arg(long, value_name = "ms")]
        render: Option<u64>,
    },
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            depth: self.depth,
            time_budget: Duration::from_millis(self.time_budget_ms),
            check_every: self.check_every,
            beam: self
                .beam_width
                .map(|w| BeamConfig::new(self.beam_from_depth, w)),
            dedupe: !self.no_dedupe,
        }
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_turns: self.max_turns as usize,
        }
    }
}

fn make_policy(kind: PolicyKind, search: SearchConfig, seed: u64) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Search => Box::new(Bot::new(search)),
        PolicyKind::Greedy => Box::new(GreedyPolicy),
        PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
    }
}

fn play(args: &Args) -> smash_engine::Result<()> {
    let stdin = io::stdin();
    let mut reader = TurnReader::new(stdin.lock());
    let mut out = io::stdout().lock();

    let mut bot = Bot::new(args.search_config());
    let mut session = GameSession::new(args.session_config());

    while let Some(input) = reader.read_turn()? {
        let decision = bot.decide(&mut session, &input)?;
        writeln!(out, "{}", decision.to_line())?;
        out.flush()?;
    }

    info!(
        "input closed after {} turns, own_score={} opponent_score={}",
        session.turn(),
        session.own_score(),
        session.opponent_score()
    );
    Ok(())
}

fn rollout(args: &Args) -> smash_engine::Result<()> {
    let Command::Rollout {
        matches,
        seed,
        policy_a,
        policy_b,
        verbosity,
        render,
    } = args.command
    else {
        return Ok(());
    };

    let base_seed = seed.unwrap_or(12345);
    let search = args.search_config();
    let kinds = [policy_a, policy_b];

    let cfg = RunnerConfig {
        matches,
        base_seed,
        max_turns: args.max_turns,
        policy_names: [policy_a.name().to_string(), policy_b.name().to_string()],
        verbosity,
        render_ms: render,
    };

    let mut runner = Runner::new(
        cfg,
        Box::new(move |side, seed| make_policy(kinds[side], search, seed)),
    );
    let report = runner.run()?;

    // Final one-line summary (useful for logs / grep).
    println!(
        "DONE: policies={}/{} matches={} wins={}/{} draws={} unfinished={} avg_len={:.2} max_len={} avg_score={:.1}/{:.1} best_delta={} searches={} timeouts={} fallbacks={} avg_expansions={:.1} elapsed={:.3}s",
        report.policies[0],
        report.policies[1],
        report.matches,
        report.wins[0],
        report.wins[1],
        report.draws,
        report.unfinished,
        report.avg_match_len,
        report.max_match_len,
        report.avg_score[0],
        report.avg_score[1],
        report.best_delta,
        report.searches,
        report.timeouts,
        report.fallbacks,
        report.avg_expansions,
        report.elapsed_s,
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _logger = match logging::setup_logging(&args.log_level) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("failed to start logger: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match args.command {
        Command::Play => play(&args),
        Command::Rollout { .. } => rollout(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

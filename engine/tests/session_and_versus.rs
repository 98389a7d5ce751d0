// engine/tests/session_and_versus.rs
#![forbid(unsafe_code)]

/**
 * Turn pipeline, session and self-play contract tests.
 *
 * Purpose:
 * - Validate the per-turn contract shared by every policy (returns a structurally valid
 *   move, records history where it should, keeps answering once history is full).
 * - Validate input parsing errors surface as typed errors.
 * - Validate the two-player simulator's skull conversion, garbage drop and loss rule.
 */
use std::time::Duration;

use smash_engine::engine::{Orientation, Outcome, fits_on_grid};
use smash_engine::{
    Bot, COLS, Cell, Decision, Error, GameSession, GreedyPolicy, Grid, LOOKAHEAD, Move, Pair,
    PairQueue, PairRule, PlayerArea, Policy, ROWS, RandomPolicy, SearchConfig, SessionConfig,
    TurnInput, TurnSnapshot, Versus, annotation_for,
};

const E: &str = "......";

fn grid(rows: [&str; ROWS]) -> Grid {
    Grid::parse(&rows).expect("fixture grid must parse")
}

fn fast_search() -> SearchConfig {
    SearchConfig {
        depth: 2,
        time_budget: Duration::from_millis(10),
        ..SearchConfig::default()
    }
}

fn input_for(versus: &Versus, side: usize) -> TurnInput {
    let (own, opponent) = versus.view(side);
    TurnInput {
        pairs: versus.queue,
        own: own.grid,
        opponent: opponent.grid,
    }
}

fn queue_starting_with(first: Pair) -> PairQueue {
    let mut pairs = PairRule::new(2).draw_queue().as_slice().to_vec();
    pairs[0] = first;
    PairQueue::from_slice(&pairs).expect("queue length is fixed")
}

fn full_of_skulls() -> Grid {
    let mut g = Grid::empty();
    for r in 0..ROWS {
        for c in 0..COLS {
            g.set(r, c, Cell::Skull);
        }
    }
    g
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test]
fn turn_input_parses_wire_format() {
    let pairs = ["1 2", "3 3", "4 5", "5 1", "2 2", "1 1", "3 4", "5 5"];
    let own = [E, E, E, E, E, E, E, E, E, E, "0.....", "12...."];
    let opp = [E; ROWS];

    let input = TurnInput::parse(&pairs, &own, &opp).expect("valid turn");

    assert_eq!(input.pairs.current(), Pair { first: 1, second: 2 });
    assert_eq!(input.pairs.get(LOOKAHEAD - 1), Pair { first: 5, second: 5 });
    assert_eq!(input.own.get(10, 0), Cell::Skull);
    assert_eq!(input.own.get(11, 1), Cell::Color(2));
    assert_eq!(input.opponent, Grid::empty());

    // Display is the wire format again.
    let lines: Vec<String> = input.own.to_string().lines().map(str::to_string).collect();
    assert_eq!(Grid::parse(&lines).expect("display output parses"), input.own);
}

#[test]
fn malformed_input_is_a_typed_error() {
    assert!(matches!(
        Grid::parse(&[E; ROWS - 1]),
        Err(Error::GridRowCount { expected: ROWS, got: 11 })
    ));

    let mut rows = [E; ROWS];
    rows[3] = ".....";
    assert!(matches!(
        Grid::parse(&rows),
        Err(Error::GridRowWidth { row: 3, got: 5, .. })
    ));

    rows[3] = "..x...";
    assert!(matches!(
        Grid::parse(&rows),
        Err(Error::InvalidCell { ch: 'x', row: 3, col: 2 })
    ));

    assert!(matches!(Pair::parse("1 7"), Err(Error::InvalidPair { .. })));
    assert!(matches!(Pair::parse("1 2 3"), Err(Error::InvalidPair { .. })));
    assert!(matches!(Pair::parse("0 1"), Err(Error::InvalidPair { .. })));
    assert!(matches!(
        PairQueue::parse(&["1 2", "3 4"]),
        Err(Error::PairQueueLength { expected: LOOKAHEAD, got: 2 })
    ));
}

// ---------------------------------------------------------------------------
// Session / bot
// ---------------------------------------------------------------------------

#[test]
fn history_is_bounded() {
    let mut session = GameSession::new(SessionConfig { max_turns: 1 });
    let snap = TurnSnapshot {
        turn: 0,
        pairs: PairRule::new(0).draw_queue(),
        areas: Default::default(),
        chosen: Move::FALLBACK,
    };

    session.record(snap).expect("first turn fits");
    assert!(session.is_full());
    assert!(matches!(
        session.record(snap),
        Err(Error::HistoryFull { max_turns: 1 })
    ));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn annotation_thresholds() {
    assert_eq!(annotation_for(0), None);
    assert_eq!(annotation_for(300), None);
    assert_eq!(annotation_for(301), Some("Nice."));
    assert_eq!(annotation_for(1001), Some("Combo!"));
    assert_eq!(annotation_for(2001), Some("Annihilation!"));
}

#[test]
fn decision_line_format() {
    let d = Decision {
        annotation: Some("Nice."),
        ..Decision::plain(Move::new(4, Orientation::Down))
    };
    assert_eq!(d.to_line(), "4 3 Nice.");
    assert_eq!(Decision::plain(Move::new(2, Orientation::Left)).to_line(), "2 2");
}

#[test]
fn bot_records_history_and_banks_its_own_score() {
    let own = grid([E, E, E, E, E, E, E, E, E, "12....", "12....", "12...."]);
    let input = TurnInput {
        pairs: queue_starting_with(Pair { first: 1, second: 2 }),
        own,
        opponent: Grid::empty(),
    };
    let mut session = GameSession::default();
    let mut bot = Bot::new(fast_search());

    let d = bot.play_turn(&mut session, &input).expect("history has room");

    assert_eq!(session.turn(), 1);
    let last = session.last().expect("turn recorded");
    assert_eq!(last.chosen, d.mv);
    assert_eq!(last.areas[0].grid, own);

    let search = d.search.expect("bot decisions carry the search outcome");
    assert_eq!(session.own_score(), search.first_delta);
    assert_eq!(d.annotation, annotation_for(search.first_delta));
    assert_eq!(d.threshold.map(|t| t.skull_lines), Some(10));
    assert!(fits_on_grid(&own, d.mv));
}

#[test]
fn bot_keeps_answering_when_history_is_full() {
    let input = TurnInput {
        pairs: PairRule::new(4).draw_queue(),
        own: Grid::empty(),
        opponent: Grid::empty(),
    };
    let mut session = GameSession::new(SessionConfig { max_turns: 1 });
    let mut bot = Bot::new(fast_search());

    for _ in 0..2 {
        let d = bot.play_turn(&mut session, &input).expect("full history is not fatal");
        assert!(fits_on_grid(&input.own, d.mv));
        assert!(d.search.expect("bot decisions carry the search outcome").found);
    }

    assert!(session.is_full());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn every_policy_answers_on_a_dead_board() {
    let input = TurnInput {
        pairs: PairRule::new(4).draw_queue(),
        own: full_of_skulls(),
        opponent: Grid::empty(),
    };
    let mut policies: Vec<Box<dyn Policy>> = vec![
        Box::new(Bot::new(fast_search())),
        Box::new(GreedyPolicy),
        Box::new(RandomPolicy::new(9)),
    ];

    for p in policies.iter_mut() {
        let mut session = GameSession::default();
        let d = p.decide(&mut session, &input).expect("decide never fails here");
        assert_eq!(d.mv, Move::FALLBACK);
    }
}

#[test]
fn greedy_takes_the_immediate_clear() {
    let own = grid([E, E, E, E, E, E, E, E, E, "1.....", "1.....", "1....."]);
    let input = TurnInput {
        pairs: queue_starting_with(Pair { first: 1, second: 2 }),
        own,
        opponent: Grid::empty(),
    };

    let d = GreedyPolicy
        .decide(&mut GameSession::default(), &input)
        .expect("greedy never fails");

    let sim = PlayerArea::simulate_move(&own, input.pairs.current(), d.mv)
        .expect("greedy move fits");
    assert_eq!(sim.stats.score, 40);
}

// ---------------------------------------------------------------------------
// Versus
// ---------------------------------------------------------------------------

#[test]
fn same_seed_same_match() {
    let play = |seed: u64| {
        let mut v = Versus::new(seed);
        let mut a = GreedyPolicy;
        let mut b = GreedyPolicy;
        let (mut sa, mut sb) = (GameSession::default(), GameSession::default());
        while !v.is_over() && v.turn < 60 {
            let ma = a.decide(&mut sa, &input_for(&v, 0)).expect("greedy").mv;
            let mb = b.decide(&mut sb, &input_for(&v, 1)).expect("greedy").mv;
            v.step([ma, mb]);
        }
        (v.turn, v.outcome, v.areas[0].score, v.areas[1].score, v.areas[0].grid)
    };

    assert_eq!(play(2024), play(2024));
}

#[test]
fn score_turns_into_pending_skulls_for_the_other_side() {
    let mut v = Versus::new(1);
    v.areas[0] = PlayerArea::new(
        grid([E, E, E, E, E, E, E, E, E, "12....", "12....", "12...."]),
        0,
    );
    v.queue = queue_starting_with(Pair { first: 1, second: 2 });

    let step = v.step([
        Move::new(0, Orientation::Up),
        Move::new(5, Orientation::Up),
    ]);

    // 360 points = 5 skulls (350) + 10 carried; 5 skulls are not a full line yet.
    assert_eq!(step.stats[0].map(|s| s.score), Some(360));
    assert_eq!(v.pending_skulls, [0, 5]);
    assert_eq!(v.outcome, None);
    assert_eq!(v.turn, 1);
}

#[test]
fn full_lines_of_pending_skulls_fall() {
    let mut v = Versus::new(3);
    v.pending_skulls = [0, COLS as u32 + 2];

    v.step([Move::new(0, Orientation::Up), Move::new(0, Orientation::Up)]);

    let skulls = (0..ROWS)
        .flat_map(|r| (0..COLS).map(move |c| (r, c)))
        .filter(|&(r, c)| v.areas[1].grid.get(r, c).is_skull())
        .count();
    assert_eq!(skulls, COLS);
    assert_eq!(v.pending_skulls[1], 2);
    assert!(v.areas[1].grid.is_stable());
}

#[test]
fn player_that_cannot_place_loses() {
    let mut v = Versus::new(5);
    v.areas[1] = PlayerArea::new(full_of_skulls(), 0);

    let step = v.step([Move::new(2, Orientation::Up), Move::FALLBACK]);

    assert_eq!(step.outcome, Some(Outcome::Won(0)));
    assert!(v.is_over());
    assert!(step.stats[1].is_none());

    // A finished match ignores further steps.
    let again = v.step([Move::new(2, Orientation::Up), Move::FALLBACK]);
    assert_eq!(again.outcome, Some(Outcome::Won(0)));
    assert_eq!(v.turn, 1);
}

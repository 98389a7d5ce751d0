// engine/tests/engine_invariants_prop.rs
#![forbid(unsafe_code)]

/**
 * Property/invariant tests for the board kernel and the search.
 *
 * Purpose:
 * - Provide fuzz-like coverage using generated boards and seeds.
 * - Lock core invariants that must hold regardless of policy logic.
 *
 * Invariants covered:
 * - Gravity leaves a stable board and keeps each column's block order.
 * - A resolved board holds no big group, and resolving it again is a no-op.
 * - The move mask and the legal move list stay equivalent.
 * - Scores never decrease along a placement sequence.
 * - The search always emits a legal move when one exists, and the fallback otherwise.
 */
use std::time::Duration;

use proptest::prelude::*;
use smash_engine::engine::{find_big_groups, fits_on_grid, resolve};
use smash_engine::{
    ACTION_DIM, COLS, Cell, Grid, Move, PairRule, PlayerArea, ROWS, SearchConfig, search,
};

fn cell_from_code(code: u8) -> Cell {
    match code {
        0 => Cell::Empty,
        6 => Cell::Skull,
        c => Cell::Color(c),
    }
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    prop::collection::vec(0u8..=6, ROWS * COLS).prop_map(|codes| {
        let mut g = Grid::empty();
        for (i, code) in codes.into_iter().enumerate() {
            g.set(i / COLS, i % COLS, cell_from_code(code));
        }
        g
    })
}

fn column_blocks(g: &Grid, c: usize) -> Vec<Cell> {
    (0..ROWS).map(|r| g.get(r, c)).filter(|v| !v.is_empty()).collect()
}

/// Play `moves` pseudo-random legal placements from an empty board.
fn rollout_area(seed: u64, moves: usize) -> PlayerArea {
    let mut rule = PairRule::new(seed);
    let mut area = PlayerArea::new(Grid::empty(), 0);
    for i in 0..moves {
        let legal = area.legal_moves();
        if legal.is_empty() {
            break;
        }
        let mv = legal[(seed as usize).wrapping_add(i * 7) % legal.len()];
        let before = area.score;
        area.apply_move(rule.draw(), mv).expect("legal move must apply");
        assert!(area.score >= before);
    }
    area
}

#[test]
fn move_enumeration_covers_every_slot_once() {
    let all: Vec<Move> = Move::all().collect();
    assert_eq!(all.len(), ACTION_DIM);
    for (aid, mv) in all.iter().enumerate() {
        assert_eq!(mv.action_id(), aid);
        assert_eq!(Move::from_action_id(aid), Some(*mv));
    }
    assert_eq!(Move::from_action_id(ACTION_DIM), None);
}

#[test]
fn out_of_board_horizontal_moves_never_fit() {
    let g = Grid::empty();
    for mv in Move::all() {
        let expected = mv.second_col().is_some();
        assert_eq!(fits_on_grid(&g, mv), expected, "{mv:?}");
    }
}

proptest! {
    #[test]
    fn gravity_stabilizes_and_keeps_column_order(mut g in arb_grid()) {
        let before: Vec<Vec<Cell>> = (0..COLS).map(|c| column_blocks(&g, c)).collect();

        g.apply_gravity();

        prop_assert!(g.is_stable());
        for c in 0..COLS {
            prop_assert_eq!(&column_blocks(&g, c), &before[c]);
        }
        prop_assert!(!g.apply_gravity());
    }

    #[test]
    fn resolution_reaches_a_fixed_point(mut g in arb_grid()) {
        g.apply_gravity();

        let first = resolve(&g, &[]);
        prop_assert!(first.grid.is_stable());
        prop_assert!(find_big_groups(&first.grid, None).is_empty());
        prop_assert_eq!(first.stats.score > 0, first.stats.matched());

        let second = resolve(&first.grid, &[]);
        prop_assert_eq!(second.grid, first.grid);
        prop_assert_eq!(second.stats.score, 0);
    }

    #[test]
    fn move_mask_matches_legal_moves(seed in any::<u64>(), moves in 0usize..40) {
        let area = rollout_area(seed, moves);
        let mask = area.move_mask();
        let legal = area.legal_moves();

        let from_mask: Vec<Move> = Move::all().filter(|mv| mask[mv.action_id()]).collect();
        prop_assert_eq!(&from_mask, &legal);
        prop_assert_eq!(area.has_legal_move(), !legal.is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn search_emits_a_legal_move_whenever_one_exists(seed in any::<u64>(), moves in 0usize..40) {
        let area = rollout_area(seed, moves);
        let queue = PairRule::new(seed ^ 0xA5A5).draw_queue();
        let cfg = SearchConfig {
            depth: 2,
            time_budget: Duration::from_millis(2),
            ..SearchConfig::default()
        };

        let out = search(&area, &queue, u32::MAX, &cfg);

        if area.has_legal_move() {
            prop_assert!(out.found);
            prop_assert!(fits_on_grid(&area.grid, out.mv));
        } else {
            prop_assert!(!out.found);
            prop_assert_eq!(out.mv, Move::FALLBACK);
        }
    }
}

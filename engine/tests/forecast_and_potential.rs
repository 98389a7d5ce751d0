// engine/tests/forecast_and_potential.rs
#![forbid(unsafe_code)]

/**
 * Potential heuristic and loss forecast tests.
 *
 * What is tested:
 * - Each potential feature on a minimal board (vertical, horizontal, diagonal,
 *   open columns), and that skulls on top close a column.
 * - Forecast on an empty board: ten skull lines, 4200 points.
 * - Forecast on a dead board terminates at zero lines.
 * - The threshold subtracts the score remainder already banked towards a skull.
 */
use smash_engine::engine::{
    compute_potential_features, is_salvageable, potential, reachable_empty,
    will_survive_with_skull_lines, win_threshold,
};
use smash_engine::{COLS, Cell, Grid, LOOKAHEAD, NUISANCE_POINTS, ROWS, WinThreshold};

fn grid(rows: [&str; ROWS]) -> Grid {
    Grid::parse(&rows).expect("fixture grid must parse")
}

const E: &str = "......";

// ---------------------------------------------------------------------------
// Potential
// ---------------------------------------------------------------------------

#[test]
fn empty_board_only_counts_open_columns() {
    let f = compute_potential_features(&Grid::empty());
    assert_eq!(f.open_columns, COLS as u32);
    assert_eq!(f.total(), COLS as u32);
}

#[test]
fn vertical_pair_adds_two() {
    let g = grid([E, E, E, E, E, E, E, E, E, E, "1.....", "1....."]);
    let f = compute_potential_features(&g);
    assert_eq!(f.vertical, 2);
    assert_eq!(f.horizontal, 0);
    assert_eq!(f.diagonal, 0);
    assert_eq!(potential(&g), 2 + COLS as u32);
}

#[test]
fn horizontal_triple_counts_both_links_and_the_run() {
    let g = grid([E, E, E, E, E, E, E, E, E, E, E, "111..."]);
    let f = compute_potential_features(&g);
    assert_eq!(f.horizontal, 6);
    assert_eq!(f.vertical, 0);
}

#[test]
fn diagonal_counts_only_without_orthogonal_link() {
    let lone = grid([E, E, E, E, E, E, E, E, E, E, "1.....", "21...."]);
    assert_eq!(compute_potential_features(&lone).diagonal, 1);

    // (10,0)-(11,1) are also linked through (10,1): counted as horizontal + vertical.
    let l_shape = grid([E, E, E, E, E, E, E, E, E, E, "11....", "21...."]);
    let f = compute_potential_features(&l_shape);
    assert_eq!(f.diagonal, 0);
    assert_eq!(f.horizontal, 2);
    assert_eq!(f.vertical, 2);
}

#[test]
fn skull_on_top_closes_a_column() {
    let open = grid([E, E, E, E, E, E, E, E, E, E, "1.....", "1....."]);
    let buried = grid([E, E, E, E, E, E, E, E, E, "0.....", "1.....", "1....."]);

    assert_eq!(compute_potential_features(&open).open_columns, COLS as u32);
    assert_eq!(compute_potential_features(&buried).open_columns, COLS as u32 - 1);
    assert_eq!(potential(&buried) + 1, potential(&open));
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

#[test]
fn empty_board_survives_ten_lines() {
    let g = Grid::empty();
    assert_eq!(reachable_empty(&g), (ROWS * COLS, ROWS * COLS));

    let lines = will_survive_with_skull_lines(&g, LOOKAHEAD);
    assert_eq!(lines, 10);

    let t = win_threshold(&g, LOOKAHEAD);
    assert_eq!(t.skull_lines, 10);
    assert_eq!(t.min_score, 10 * COLS as u32 * NUISANCE_POINTS);
    assert_eq!(t.min_score, 4200);
}

#[test]
fn dead_board_terminates_at_zero_lines() {
    let mut g = Grid::empty();
    for r in 0..ROWS {
        for c in 0..COLS {
            g.set(r, c, Cell::Skull);
        }
    }
    assert_eq!(reachable_empty(&g), (0, 0));
    assert!(!is_salvageable(&g, LOOKAHEAD));
    assert_eq!(will_survive_with_skull_lines(&g, LOOKAHEAD), 0);
    assert_eq!(win_threshold(&g, LOOKAHEAD), WinThreshold::default());
}

#[test]
fn enclosed_cavities_are_not_reachable() {
    // Row 6 is a full lid; everything below it is unreachable from the top.
    let g = grid([E, E, E, E, E, E, "000000", E, E, E, E, E]);
    let (largest, total) = reachable_empty(&g);
    assert_eq!(total, 6 * COLS);
    assert_eq!(largest, 6 * COLS);
}

#[test]
fn threshold_subtracts_the_banked_remainder() {
    let t = WinThreshold::from_skull_lines(1);
    assert_eq!(t.min_score, 420);
    assert_eq!(t.relative_to(0), 420);
    assert_eq!(t.relative_to(75), 415);
    assert_eq!(t.relative_to(140), 420);
    assert!(t.reached(420));
    assert!(!t.reached(419));

    assert_eq!(WinThreshold::from_skull_lines(0).relative_to(69), 0);
}

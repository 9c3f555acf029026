//! Property tests for board invariants.
//!
//! Covered:
//! - A freshly filled board has no runs unless fill exhaustion was flagged,
//!   with and without joker wild pieces.
//! - Swaps between non-neighbors never touch the board.
//! - A swap that matches nothing returns every piece to where it started.
//! - After any cascade the board is at a fixed point (no runs left), with and
//!   without joker wild pieces.
//! - Collapse packs each column downward and keeps piece order.
//! - A run found from one end is found again from the other end.

use proptest::prelude::*;

use tui_match3::core::cascade::collapse_column;
use tui_match3::core::present::Journal;
use tui_match3::core::{
    BoardConfig, Diagnostic, GameState, Grid, Interpolation, MatchFinder, WildRule,
};
use tui_match3::engine::{first_swap, play_swap};
use tui_match3::types::{Coord, Direction, PieceColor};

fn board(width: u8, height: u8, colors: u8, seed: u32) -> GameState {
    wild_board(width, height, colors, false, seed)
}

fn wild_board(width: u8, height: u8, colors: u8, wild: bool, seed: u32) -> GameState {
    let config = BoardConfig::default()
        .instant()
        .with_size(width, height)
        .with_palette(colors, wild)
        .with_wild_rule(WildRule::Joker)
        .with_seed(seed);
    GameState::new(config).unwrap()
}

fn layout(state: &GameState) -> Vec<String> {
    state
        .grid()
        .pieces()
        .map(|p| format!("{}@{},{}", p.id().0, p.coord().x, p.coord().y))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fill_leaves_no_runs_unless_flagged(
        width in 3u8..=10,
        height in 3u8..=10,
        colors in 3u8..=8,
        wild in any::<bool>(),
        seed in any::<u32>(),
    ) {
        let state = wild_board(width, height, colors, wild, seed);
        prop_assert!(state.grid().is_full());
        prop_assert!(
            state.fill_exhausted() || state.finder().find_all_matches(state.grid()).is_empty()
        );
    }

    #[test]
    fn non_adjacent_swap_is_noop(
        seed in any::<u32>(),
        ax in -2i32..10, ay in -2i32..10,
        bx in -2i32..10, by in -2i32..10,
    ) {
        let (a, b) = (Coord::new(ax, ay), Coord::new(bx, by));
        prop_assume!(!a.is_adjacent(b));
        let mut state = board(8, 8, 5, seed);
        let before = layout(&state);
        prop_assert!(!state.request_swap(a, b).is_accepted());
        prop_assert!(state.is_idle());
        prop_assert_eq!(layout(&state), before);
    }

    #[test]
    fn unmatched_swap_round_trips(
        seed in any::<u32>(),
        x in 0i32..7, y in 0i32..7,
        up in any::<bool>(),
    ) {
        let mut state = board(8, 8, 6, seed);
        let a = Coord::new(x, y);
        let b = a.step(if up { Direction::Up } else { Direction::Right });
        let before = layout(&state);
        let report = play_swap(&mut state, a, b, 10_000).unwrap();
        if report.reverted {
            prop_assert_eq!(layout(&state), before);
            prop_assert_eq!(report.cleared, 0);
        } else {
            prop_assert!(report.cleared >= 3);
        }
    }

    #[test]
    fn cascade_reaches_fixed_point(
        seed in any::<u32>(),
        colors in 3u8..=6,
        wild in any::<bool>(),
        moves in 1usize..6,
    ) {
        let mut state = wild_board(7, 7, colors, wild, seed);
        for _ in 0..moves {
            let Some(mv) = first_swap(state.grid(), state.finder()) else {
                break;
            };
            let report = play_swap(&mut state, mv.a, mv.b, 100_000).unwrap();
            let bounded = report
                .diagnostics
                .iter()
                .any(|d| matches!(d, Diagnostic::CascadeBoundReached { .. }));
            prop_assert!(state.grid().is_full());
            prop_assert!(bounded || state.finder().find_all_matches(state.grid()).is_empty());
        }
    }

    #[test]
    fn collapse_packs_column(cells in prop::collection::vec(any::<bool>(), 1..12)) {
        let rows: Vec<String> = cells
            .iter()
            .enumerate()
            .rev()
            .map(|(y, &filled)| {
                let color = PieceColor::PALETTE[y % PieceColor::PALETTE.len()];
                if filled { color.as_char().to_string() } else { ".".to_string() }
            })
            .collect();
        let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let mut grid = Grid::from_ascii(&row_refs);
        let order: Vec<PieceColor> = (0..grid.height()).filter_map(|y| grid.color_at(0, y)).collect();

        let mut journal = Journal::default();
        collapse_column(&mut grid, 0, 100, Interpolation::Linear, &mut journal);

        let count = order.len() as i32;
        for y in 0..grid.height() {
            prop_assert_eq!(grid.get(0, y).is_some(), y < count);
        }
        let after: Vec<PieceColor> = (0..count).filter_map(|y| grid.color_at(0, y)).collect();
        prop_assert_eq!(after, order);
    }

    #[test]
    fn runs_are_symmetric(row in prop::collection::vec(0usize..3, 3..12)) {
        let line: String = row.iter().map(|&i| PieceColor::PALETTE[i].as_char()).collect();
        let grid = Grid::from_ascii(&[line.as_str()]);
        let finder = MatchFinder::default();

        for x in 0..grid.width() {
            // Start only at the left end of each run.
            if x > 0 && grid.color_at(x - 1, 0) == grid.color_at(x, 0) {
                continue;
            }
            let Some(mut forward) = finder.find_run(&grid, Coord::new(x, 0), Direction::Right, 1) else {
                continue;
            };
            let end = *forward.last().unwrap();
            let mut backward = finder.find_run(&grid, end, Direction::Left, 1).unwrap();
            forward.sort();
            backward.sort();
            prop_assert_eq!(forward, backward);
        }
    }
}

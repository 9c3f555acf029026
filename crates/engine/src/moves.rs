use tui_match3_core::{Grid, MatchFinder};
use tui_match3_types::{Coord, Direction};

/// An adjacent swap and how many pieces it would match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapMove {
    pub a: Coord,
    pub b: Coord,
    pub matched: usize,
}

/// Every adjacent swap that produces a match, in scan order.
///
/// Each pair is listed once, from its lower-left member toward its right or
/// upper neighbor.
pub fn find_swaps(grid: &Grid, finder: &MatchFinder) -> Vec<SwapMove> {
    let mut scratch = grid.clone();
    let mut out = Vec::new();
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let a = Coord::new(x, y);
            for dir in [Direction::Right, Direction::Up] {
                let b = a.step(dir);
                if let Some(matched) = matched_by_swap(&mut scratch, finder, a, b) {
                    out.push(SwapMove { a, b, matched });
                }
            }
        }
    }
    out
}

/// Pieces matched after swapping `a` and `b`; `None` if the swap is
/// impossible or matches nothing. Leaves `scratch` as it found it.
fn matched_by_swap(scratch: &mut Grid, finder: &MatchFinder, a: Coord, b: Coord) -> Option<usize> {
    if !scratch.swap(a, b) {
        return None;
    }
    let mut matched = finder.find_matches_at(scratch, a);
    tui_match3_core::matcher::union_into(&mut matched, &finder.find_matches_at(scratch, b));
    scratch.swap(a, b);
    (!matched.is_empty()).then_some(matched.len())
}

/// First matching swap in scan order
pub fn first_swap(grid: &Grid, finder: &MatchFinder) -> Option<SwapMove> {
    find_swaps(grid, finder).into_iter().next()
}

/// Swap matching the most pieces (earliest on ties)
pub fn best_swap(grid: &Grid, finder: &MatchFinder) -> Option<SwapMove> {
    find_swaps(grid, finder)
        .into_iter()
        .fold(None, |best: Option<SwapMove>, mv| match best {
            Some(b) if b.matched >= mv.matched => Some(b),
            _ => Some(mv),
        })
}

/// At least one swap would match (the board is not deadlocked)
pub fn has_moves(grid: &Grid, finder: &MatchFinder) -> bool {
    let mut scratch = grid.clone();
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let a = Coord::new(x, y);
            for dir in [Direction::Right, Direction::Up] {
                if matched_by_swap(&mut scratch, finder, a, a.step(dir)).is_some() {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_single_move() {
        let grid = Grid::from_ascii(&[
            "GBY", //
            "RRB", //
            "YGR",
        ]);
        let finder = MatchFinder::default();
        let swaps = find_swaps(&grid, &finder);
        assert_eq!(
            swaps,
            vec![SwapMove {
                a: Coord::new(2, 0),
                b: Coord::new(2, 1),
                matched: 3
            }]
        );
        assert!(has_moves(&grid, &finder));
        assert_eq!(first_swap(&grid, &finder), swaps.first().copied());
    }

    #[test]
    fn test_deadlocked_board() {
        let grid = Grid::from_ascii(&[
            "RGB", //
            "GBR", //
            "BRG",
        ]);
        let finder = MatchFinder::default();
        assert!(find_swaps(&grid, &finder).is_empty());
        assert!(!has_moves(&grid, &finder));
        assert_eq!(best_swap(&grid, &finder), None);
    }

    #[test]
    fn test_search_leaves_grid_untouched() {
        let grid = Grid::from_ascii(&["RRBR", "GBGG"]);
        let finder = MatchFinder::default();
        let before = grid.to_ascii();
        let _ = find_swaps(&grid, &finder);
        assert_eq!(grid.to_ascii(), before);
    }

    #[test]
    fn test_best_swap_prefers_larger_match() {
        let grid = Grid::from_ascii(&[
            "GYRGG", //
            "RRYRR",
        ]);
        let finder = MatchFinder::default();
        let best = best_swap(&grid, &finder).unwrap();
        // Moving the red down into (2,0) joins both pairs into five.
        assert_eq!(best.matched, 5);
        assert_eq!((best.a, best.b), (Coord::new(2, 0), Coord::new(2, 1)));
    }
}

//! Matcher module - directional run search and match combination
//!
//! A *run* starts at an origin piece and walks one axis direction while the
//! next slot is in bounds, occupied, not already part of the run, and
//! color-compatible with the run. Runs from opposite directions through the
//! same origin are combined into axis matches, and the horizontal and vertical
//! axis matches through a cell are combined into that cell's matches.
//!
//! Results are lists of coordinates. Each slot holds at most one piece, so a
//! coordinate list is a deduplicated piece list.
//!
//! # Wild pieces
//!
//! How `Wild` compares is a [`WildRule`]:
//!
//! - **Joker**: a wild piece extends any run. A run's color is the first
//!   non-wild color it meets.
//! - **Strict**: colors compare by plain equality, so wild only runs with wild.

use crate::grid::Grid;
use crate::types::{Coord, Direction, PieceColor, MIN_MATCH};

/// Matching rule for the `Wild` color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WildRule {
    #[default]
    Joker,
    Strict,
}

impl WildRule {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "joker" => Some(WildRule::Joker),
            "strict" => Some(WildRule::Strict),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WildRule::Joker => "joker",
            WildRule::Strict => "strict",
        }
    }
}

/// Color a run has settled on so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunKey {
    rule: WildRule,
    origin: PieceColor,
    /// First non-wild color seen (joker rule only)
    resolved: Option<PieceColor>,
}

impl RunKey {
    fn new(rule: WildRule, origin: PieceColor) -> Self {
        let resolved = (!origin.is_wild()).then_some(origin);
        Self {
            rule,
            origin,
            resolved,
        }
    }

    fn accept(&mut self, color: PieceColor) -> bool {
        match self.rule {
            WildRule::Strict => color == self.origin,
            WildRule::Joker => {
                if color.is_wild() {
                    return true;
                }
                match self.resolved {
                    None => {
                        self.resolved = Some(color);
                        true
                    }
                    Some(k) => k == color,
                }
            }
        }
    }

    /// Two halves through the same origin can be joined into one run
    fn compatible(&self, other: &RunKey) -> bool {
        match (self.resolved, other.resolved) {
            (Some(a), Some(b)) => self.rule == WildRule::Strict || a == b,
            _ => true,
        }
    }
}

#[derive(Debug, Clone)]
struct Run {
    coords: Vec<Coord>,
    key: RunKey,
}

/// Run and match search over a [`Grid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchFinder {
    rule: WildRule,
}

impl MatchFinder {
    pub fn new(rule: WildRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> WildRule {
        self.rule
    }

    /// Whether a piece of color `b` can continue a run started by color `a`
    pub fn colors_match(&self, a: PieceColor, b: PieceColor) -> bool {
        RunKey::new(self.rule, a).accept(b)
    }

    fn walk(&self, grid: &Grid, origin: Coord, dir: Direction) -> Option<Run> {
        let start = grid.piece_at(origin)?;
        let mut key = RunKey::new(self.rule, start.color());
        let mut coords = vec![origin];

        let max_steps = grid.width().max(grid.height());
        for i in 1..max_steps {
            let next = origin.offset(dir, i);
            let Some(piece) = grid.piece_at(next) else {
                break;
            };
            // Re-entry guard: a run never revisits a slot.
            if coords.contains(&next) {
                break;
            }
            if !key.accept(piece.color()) {
                break;
            }
            coords.push(next);
        }

        Some(Run { coords, key })
    }

    /// Run starting at `origin` (inclusive) walking `dir`.
    ///
    /// Returns `None` when the origin is empty or the run is shorter than `min_len`.
    pub fn find_run(
        &self,
        grid: &Grid,
        origin: Coord,
        dir: Direction,
        min_len: usize,
    ) -> Option<Vec<Coord>> {
        self.walk(grid, origin, dir)
            .filter(|run| run.coords.len() >= min_len)
            .map(|run| run.coords)
    }

    fn find_axis_matches(
        &self,
        grid: &Grid,
        origin: Coord,
        toward: Direction,
        min_len: usize,
    ) -> Vec<Coord> {
        // Each half needs two pieces (origin + one) so that the shared origin
        // lets the combined run reach `min_len`.
        let half = |dir| {
            self.walk(grid, origin, dir)
                .filter(|run| run.coords.len() >= 2)
        };
        let (a, b) = (half(toward), half(toward.opposite()));

        let combined = match (a, b) {
            (None, None) => Vec::new(),
            (Some(run), None) | (None, Some(run)) => run.coords,
            (Some(a), Some(b)) if a.key.compatible(&b.key) => {
                let mut out = a.coords;
                union_into(&mut out, &b.coords);
                out
            }
            (Some(a), Some(b)) => {
                // Wild origin joining two different colors: judge each half alone.
                let mut out = Vec::new();
                for run in [a, b] {
                    if run.coords.len() >= min_len {
                        union_into(&mut out, &run.coords);
                    }
                }
                out
            }
        };

        if combined.len() >= min_len {
            combined
        } else {
            Vec::new()
        }
    }

    /// Vertical match through `origin` (up + down halves)
    pub fn find_vertical_matches(&self, grid: &Grid, origin: Coord, min_len: usize) -> Vec<Coord> {
        self.find_axis_matches(grid, origin, Direction::Up, min_len)
    }

    /// Horizontal match through `origin` (right + left halves)
    pub fn find_horizontal_matches(
        &self,
        grid: &Grid,
        origin: Coord,
        min_len: usize,
    ) -> Vec<Coord> {
        self.find_axis_matches(grid, origin, Direction::Right, min_len)
    }

    /// Union of horizontal and vertical matches through `origin`
    pub fn find_matches_at(&self, grid: &Grid, origin: Coord) -> Vec<Coord> {
        let mut out = self.find_horizontal_matches(grid, origin, MIN_MATCH);
        let vertical = self.find_vertical_matches(grid, origin, MIN_MATCH);
        union_into(&mut out, &vertical);
        out
    }

    /// Union of [`MatchFinder::find_matches_at`] over every cell, in scan order
    pub fn find_all_matches(&self, grid: &Grid) -> Vec<Coord> {
        let (w, h) = (grid.width(), grid.height());
        let mut seen = vec![false; (w * h) as usize];
        let mut out = Vec::new();
        for x in 0..w {
            for y in 0..h {
                for c in self.find_matches_at(grid, Coord::new(x, y)) {
                    let i = (c.y * w + c.x) as usize;
                    if !seen[i] {
                        seen[i] = true;
                        out.push(c);
                    }
                }
            }
        }
        out
    }

    /// Fill-time check: would the piece at `origin` complete a run with the
    /// pieces to its left or below it?
    ///
    /// Only leftward and downward neighbors are searched. This relies on the
    /// column-major, bottom-up fill order, in which cells to the right and
    /// above are still empty when `origin` is filled.
    pub fn has_match_on_fill(&self, grid: &Grid, origin: Coord, min_len: usize) -> bool {
        self.find_run(grid, origin, Direction::Left, min_len).is_some()
            || self.find_run(grid, origin, Direction::Down, min_len).is_some()
    }
}

/// Append each coordinate of `items` not already in `acc`
pub fn union_into(acc: &mut Vec<Coord>, items: &[Coord]) {
    for &c in items {
        if !acc.contains(&c) {
            acc.push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finder() -> MatchFinder {
        MatchFinder::default()
    }

    fn sorted(mut v: Vec<Coord>) -> Vec<Coord> {
        v.sort();
        v
    }

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn run_stops_at_color_change() {
        let grid = Grid::from_ascii(&["RRRB"]);
        let run = finder().find_run(&grid, c(0, 0), Direction::Right, 3).unwrap();
        assert_eq!(run, vec![c(0, 0), c(1, 0), c(2, 0)]);
        assert!(finder().find_run(&grid, c(0, 0), Direction::Right, 4).is_none());
    }

    #[test]
    fn run_from_empty_origin_is_none() {
        let grid = Grid::from_ascii(&[".RR"]);
        assert!(finder().find_run(&grid, c(0, 0), Direction::Right, 1).is_none());
    }

    #[test]
    fn run_stops_at_board_edge_and_gaps() {
        let grid = Grid::from_ascii(&["RR.RR"]);
        let run = finder().find_run(&grid, c(1, 0), Direction::Right, 1).unwrap();
        assert_eq!(run, vec![c(1, 0)]);
        let run = finder().find_run(&grid, c(4, 0), Direction::Right, 1).unwrap();
        assert_eq!(run, vec![c(4, 0)]);
    }

    #[test]
    fn vertical_match_joins_both_halves() {
        let grid = Grid::from_ascii(&["R", "R", "R", "B"]);
        let m = finder().find_vertical_matches(&grid, c(0, 2), 3);
        assert_eq!(sorted(m), vec![c(0, 1), c(0, 2), c(0, 3)]);
    }

    #[test]
    fn origin_in_middle_of_horizontal_run() {
        let grid = Grid::from_ascii(&["GRRRG"]);
        let m = finder().find_horizontal_matches(&grid, c(2, 0), 3);
        assert_eq!(sorted(m), vec![c(1, 0), c(2, 0), c(3, 0)]);
    }

    #[test]
    fn two_in_a_row_is_not_a_match() {
        let grid = Grid::from_ascii(&["RRB", "BGR"]);
        assert!(finder().find_all_matches(&grid).is_empty());
    }

    #[test]
    fn cross_shaped_match_is_deduplicated() {
        let grid = Grid::from_ascii(&[
            ".R.", //
            "RRR", //
            ".R.",
        ]);
        let m = finder().find_matches_at(&grid, c(1, 1));
        assert_eq!(m.len(), 5);
        assert_eq!(finder().find_all_matches(&grid).len(), 5);
    }

    #[test]
    fn empty_cells_never_match() {
        let grid = Grid::from_ascii(&["...", "..."]);
        assert!(finder().find_all_matches(&grid).is_empty());
    }

    #[test]
    fn obstacles_break_runs() {
        let grid = Grid::from_ascii(&["RR#R"]);
        assert!(finder().find_all_matches(&grid).is_empty());
    }

    #[test]
    fn joker_wild_extends_runs() {
        let grid = Grid::from_ascii(&["R*R"]);
        assert_eq!(finder().find_all_matches(&grid).len(), 3);

        let strict = MatchFinder::new(WildRule::Strict);
        assert!(strict.find_all_matches(&grid).is_empty());
    }

    #[test]
    fn wild_origin_does_not_bridge_two_colors() {
        // R R * B B: wild origin joins reds on the left and blues on the right.
        let grid = Grid::from_ascii(&["RR*BB"]);
        let m = finder().find_horizontal_matches(&grid, c(2, 0), 3);
        // Each half (R R * and * B B) is a run of three on its own.
        assert_eq!(m.len(), 5);

        let grid = Grid::from_ascii(&["R*BB"]);
        let m = finder().find_horizontal_matches(&grid, c(1, 0), 3);
        assert_eq!(sorted(m), vec![c(1, 0), c(2, 0), c(3, 0)]);

        let grid = Grid::from_ascii(&["R*B"]);
        assert!(finder().find_horizontal_matches(&grid, c(1, 0), 3).is_empty());
    }

    #[test]
    fn strict_wild_matches_only_wild() {
        let strict = MatchFinder::new(WildRule::Strict);
        let grid = Grid::from_ascii(&["***"]);
        assert_eq!(strict.find_all_matches(&grid).len(), 3);
        assert!(strict.colors_match(PieceColor::Wild, PieceColor::Wild));
        assert!(!strict.colors_match(PieceColor::Wild, PieceColor::Red));
        assert!(finder().colors_match(PieceColor::Red, PieceColor::Wild));
    }

    #[test]
    fn run_symmetry_from_both_endpoints() {
        let grid = Grid::from_ascii(&["BGGGGB"]);
        let right = finder().find_run(&grid, c(1, 0), Direction::Right, 3).unwrap();
        let left = finder().find_run(&grid, c(4, 0), Direction::Left, 3).unwrap();
        assert_eq!(sorted(right), sorted(left));
    }

    #[test]
    fn fill_check_looks_left_and_down_only() {
        let grid = Grid::from_ascii(&[
            "R..", //
            "R..", //
            "RBB",
        ]);
        // Column of reds below (0,2).
        assert!(finder().has_match_on_fill(&grid, c(0, 2), 3));
        // (0,0) has reds above and nothing left or below: the fill check ignores it.
        assert!(!finder().has_match_on_fill(&grid, c(0, 0), 3));
        // (2,0) sees B B to its left only with min_len 2.
        assert!(finder().has_match_on_fill(&grid, c(2, 0), 2));
        assert!(!finder().has_match_on_fill(&grid, c(2, 0), 3));
    }

    #[test]
    fn union_into_skips_duplicates() {
        let mut acc = vec![c(0, 0), c(1, 0)];
        union_into(&mut acc, &[c(1, 0), c(2, 0)]);
        assert_eq!(acc, vec![c(0, 0), c(1, 0), c(2, 0)]);
    }
}

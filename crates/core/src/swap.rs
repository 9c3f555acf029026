//! Swap controller and the press/drag/release swap session
//!
//! A swap is speculative: the two pieces exchange slots at once and animate
//! toward them. Once they settle, a swap that made no match at either slot is
//! exchanged back and animated home.

use crate::game_state::{GameState, Phase};
use crate::present::{BoardEvent, Highlight};
use crate::rng::ColorSource;
use crate::types::Coord;

/// Why a swap request was ignored. The grid is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapRejection {
    /// The tiles are not orthogonal neighbors
    NotAdjacent,
    /// A swap or cascade is still resolving
    Busy,
    /// One of the tiles holds no piece (including obstacles)
    EmptySlot,
    OutOfBounds,
}

impl SwapRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapRejection::NotAdjacent => "not_adjacent",
            SwapRejection::Busy => "busy",
            SwapRejection::EmptySlot => "empty_slot",
            SwapRejection::OutOfBounds => "out_of_bounds",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapOutcome {
    Accepted,
    Rejected(SwapRejection),
}

impl SwapOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SwapOutcome::Accepted)
    }
}

/// In-progress player gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapSession {
    source: Option<Coord>,
    target: Option<Coord>,
}

impl SwapSession {
    pub fn source(&self) -> Option<Coord> {
        self.source
    }

    pub fn target(&self) -> Option<Coord> {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }
}

impl<C: ColorSource> GameState<C> {
    /// Exchange the pieces at `a` and `b` if the board is idle and they are
    /// adjacent, occupied, and in bounds.
    pub fn request_swap(&mut self, a: Coord, b: Coord) -> SwapOutcome {
        if let Err(reason) = self.check_swap(a, b) {
            return SwapOutcome::Rejected(reason);
        }
        self.grid.swap(a, b);
        self.animate_swap(a, b);
        self.journal.event(BoardEvent::SwapStarted { a, b });
        self.phase = Phase::Swapping {
            a,
            b,
            reverting: false,
        };
        SwapOutcome::Accepted
    }

    fn check_swap(&self, a: Coord, b: Coord) -> Result<(), SwapRejection> {
        if !self.is_idle() {
            return Err(SwapRejection::Busy);
        }
        if !self.grid.in_bounds(a.x, a.y) || !self.grid.in_bounds(b.x, b.y) {
            return Err(SwapRejection::OutOfBounds);
        }
        if !a.is_adjacent(b) {
            return Err(SwapRejection::NotAdjacent);
        }
        if self.grid.piece_at(a).is_none() || self.grid.piece_at(b).is_none() {
            return Err(SwapRejection::EmptySlot);
        }
        Ok(())
    }

    /// Begin a gesture on `tile`. Ignored unless the board is idle.
    pub fn on_press_start(&mut self, tile: Coord) -> bool {
        if !self.is_idle() || !self.grid.in_bounds(tile.x, tile.y) {
            return false;
        }
        self.cancel_swap_session();
        self.session.source = Some(tile);
        self.journal.highlight(tile, Highlight::Selected);
        true
    }

    /// The gesture moved onto `tile`; it becomes the target if adjacent to the source.
    pub fn on_drag_enter(&mut self, tile: Coord) -> bool {
        let Some(source) = self.session.source else {
            return false;
        };
        if !source.is_adjacent(tile) || !self.grid.in_bounds(tile.x, tile.y) {
            return false;
        }
        if let Some(old) = self.session.target.replace(tile) {
            if old != tile {
                self.journal.highlight(old, Highlight::Transparent);
            }
        }
        self.journal.highlight(tile, Highlight::Target);
        true
    }

    /// End the gesture, requesting the swap if a target was chosen.
    pub fn on_release(&mut self) -> Option<SwapOutcome> {
        let SwapSession { source, target } = self.session;
        self.cancel_swap_session();
        match (source, target) {
            (Some(a), Some(b)) => Some(self.request_swap(a, b)),
            _ => None,
        }
    }

    /// Drop the gesture and clear its highlights
    pub fn cancel_swap_session(&mut self) {
        let SwapSession { source, target } = std::mem::take(&mut self.session);
        for tile in [source, target].into_iter().flatten() {
            self.journal.highlight(tile, Highlight::Transparent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::grid::Grid;
    use crate::rng::{Palette, PaletteRng};
    use crate::types::PieceColor;

    fn state(rows: &[&str]) -> GameState {
        GameState::from_grid(
            BoardConfig::default().instant(),
            Grid::from_ascii(rows),
            PaletteRng::new(Palette::default(), 5),
        )
    }

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn test_non_adjacent_swap_is_rejected() {
        let mut s = state(&["RGB", "GBR", "BRG"]);
        let before = s.grid().to_ascii();
        assert_eq!(
            s.request_swap(c(0, 0), c(2, 2)),
            SwapOutcome::Rejected(SwapRejection::NotAdjacent)
        );
        assert_eq!(
            s.request_swap(c(0, 0), c(1, 1)),
            SwapOutcome::Rejected(SwapRejection::NotAdjacent)
        );
        assert_eq!(
            s.request_swap(c(0, 0), c(0, 0)),
            SwapOutcome::Rejected(SwapRejection::NotAdjacent)
        );
        assert_eq!(s.grid().to_ascii(), before);
        assert!(s.is_idle());
    }

    #[test]
    fn test_out_of_bounds_and_empty_rejected() {
        let mut s = state(&["R.#"]);
        assert_eq!(
            s.request_swap(c(0, 0), c(-1, 0)),
            SwapOutcome::Rejected(SwapRejection::OutOfBounds)
        );
        assert_eq!(
            s.request_swap(c(0, 0), c(1, 0)),
            SwapOutcome::Rejected(SwapRejection::EmptySlot)
        );
        assert_eq!(
            s.request_swap(c(1, 0), c(2, 0)),
            SwapOutcome::Rejected(SwapRejection::EmptySlot)
        );
    }

    #[test]
    fn test_swap_without_match_reverts() {
        let mut s = state(&["RGB", "GBR", "BRG"]);
        let before = s.grid().to_ascii();
        let ids_before: Vec<_> = s.grid().pieces().map(|p| (p.id(), p.coord())).collect();

        assert!(s.request_swap(c(0, 0), c(1, 0)).is_accepted());
        assert_eq!(s.grid().color_at(0, 0), Some(PieceColor::Red));
        assert!(s.run_until_idle(100));

        assert_eq!(s.grid().to_ascii(), before);
        let ids_after: Vec<_> = s.grid().pieces().map(|p| (p.id(), p.coord())).collect();
        assert_eq!(ids_before, ids_after);
        assert!(s
            .take_events()
            .contains(&BoardEvent::SwapReverted { a: c(0, 0), b: c(1, 0) }));
    }

    #[test]
    fn test_swap_rejected_while_busy() {
        let mut s = state(&["RGB", "GBR", "BRG"]);
        assert!(s.request_swap(c(0, 0), c(1, 0)).is_accepted());
        assert_eq!(
            s.request_swap(c(1, 1), c(2, 1)),
            SwapOutcome::Rejected(SwapRejection::Busy)
        );
    }

    #[test]
    fn test_gesture_press_drag_release() {
        let mut s = state(&["RGB", "GBR", "BRG"]);
        assert!(s.on_press_start(c(0, 0)));
        assert!(!s.on_drag_enter(c(2, 2)));
        assert!(s.on_drag_enter(c(1, 0)));
        assert_eq!(s.session().target(), Some(c(1, 0)));

        let outcome = s.on_release();
        assert_eq!(outcome, Some(SwapOutcome::Accepted));
        assert!(!s.session().is_active());
        assert!(!s.is_idle());

        // Busy boards ignore new presses.
        assert!(!s.on_press_start(c(2, 2)));
    }

    #[test]
    fn test_release_without_target_does_nothing() {
        let mut s = state(&["RGB", "GBR", "BRG"]);
        assert_eq!(s.on_release(), None);
        s.on_press_start(c(1, 1));
        assert_eq!(s.on_release(), None);
        assert!(s.is_idle());
    }
}

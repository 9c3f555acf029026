//! Presentation contract and the board's outbound record
//!
//! The core never draws. It queues notifications for a [`Presenter`] and
//! records [`BoardEvent`]s and [`Diagnostic`]s for callers to drain.

use crate::piece::{Piece, PieceId, Vec2};
use crate::types::Coord;

/// Tile highlight requested by the swap session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    Transparent,
    /// Swap source under the player's press
    Selected,
    /// Adjacent tile the gesture is dragging toward
    Target,
}

/// Presentation layer notified by the core
///
/// Calls arrive in the order the board changed. Positions are in board units
/// with `y = 0` at the bottom row.
pub trait Presenter {
    fn spawn(&mut self, piece: &Piece);
    fn destroy(&mut self, piece: &Piece);
    fn set_visual_position(&mut self, piece: &Piece, pos: Vec2);
    fn set_highlight(&mut self, tile: Coord, highlight: Highlight);
}

/// Something the board did, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    SwapStarted { a: Coord, b: Coord },
    /// The swap produced a match and feeds the cascade
    SwapCommitted { a: Coord, b: Coord },
    /// The swap produced no match and was animated back
    SwapReverted { a: Coord, b: Coord },
    CascadeStarted,
    PassCleared { pass: u32, cleared: u32 },
    Collapsed { pass: u32, moved: u32 },
    Refilled { pass: u32, spawned: u32 },
    CascadeFinished { passes: u32 },
    /// Board was emptied and filled from scratch
    Restarted,
}

impl BoardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BoardEvent::SwapStarted { .. } => "swap_started",
            BoardEvent::SwapCommitted { .. } => "swap_committed",
            BoardEvent::SwapReverted { .. } => "swap_reverted",
            BoardEvent::CascadeStarted => "cascade_started",
            BoardEvent::PassCleared { .. } => "pass_cleared",
            BoardEvent::Collapsed { .. } => "collapsed",
            BoardEvent::Refilled { .. } => "refilled",
            BoardEvent::CascadeFinished { .. } => "cascade_finished",
            BoardEvent::Restarted => "restarted",
        }
    }
}

/// Locally recovered anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// No non-matching color was found for `(x, y)`; the last pick was kept
    FillExhausted { x: i32, y: i32, retries: u32 },
    /// The cascade was stopped at the pass bound with matches left on the board
    CascadeBoundReached { passes: u32 },
}

impl Diagnostic {
    pub fn name(&self) -> &'static str {
        match self {
            Diagnostic::FillExhausted { .. } => "fill_exhausted",
            Diagnostic::CascadeBoundReached { .. } => "cascade_bound_reached",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Notice {
    Spawn(Piece),
    Destroy(Piece),
    Highlight(Coord, Highlight),
}

/// Pending notifications, events, and diagnostics
#[derive(Debug, Clone, Default)]
pub struct Journal {
    notices: Vec<Notice>,
    moved: Vec<PieceId>,
    events: Vec<BoardEvent>,
    diagnostics: Vec<Diagnostic>,
    /// Presenter notices are dropped instead of queued
    muted: bool,
}

impl Journal {
    /// Stop (or resume) queueing presenter notices. Muting drops anything
    /// already pending; events and diagnostics are recorded either way.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.notices.clear();
            self.moved.clear();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn spawned(&mut self, piece: &Piece) {
        if !self.muted {
            self.notices.push(Notice::Spawn(piece.clone()));
        }
    }

    pub fn destroyed(&mut self, piece: Piece) {
        if self.muted {
            return;
        }
        self.moved.retain(|&id| id != piece.id());
        self.notices.push(Notice::Destroy(piece));
    }

    pub fn highlight(&mut self, tile: Coord, highlight: Highlight) {
        if !self.muted {
            self.notices.push(Notice::Highlight(tile, highlight));
        }
    }

    /// Mark a piece whose visual position changed
    pub fn moved(&mut self, id: PieceId) {
        if !self.muted && !self.moved.contains(&id) {
            self.moved.push(id);
        }
    }

    pub fn event(&mut self, event: BoardEvent) {
        self.events.push(event);
    }

    pub fn diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn has_pending_notices(&self) -> bool {
        !self.notices.is_empty() || !self.moved.is_empty()
    }

    /// Queued notices plus pieces waiting for a position update
    pub fn pending_notices(&self) -> usize {
        self.notices.len() + self.moved.len()
    }

    /// Deliver queued notices, then the current visual position of every moved
    /// piece that `lookup` still finds on the board.
    pub fn flush<'a, P, F>(&mut self, presenter: &mut P, lookup: F)
    where
        P: Presenter + ?Sized,
        F: Fn(PieceId) -> Option<&'a Piece>,
    {
        for notice in self.notices.drain(..) {
            match notice {
                Notice::Spawn(piece) => presenter.spawn(&piece),
                Notice::Destroy(piece) => presenter.destroy(&piece),
                Notice::Highlight(tile, h) => presenter.set_highlight(tile, h),
            }
        }
        for id in self.moved.drain(..) {
            if let Some(piece) = lookup(id) {
                presenter.set_visual_position(piece, piece.visual());
            }
        }
    }
}

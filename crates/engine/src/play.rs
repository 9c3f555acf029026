use tui_match3_core::{BoardEvent, ColorSource, Diagnostic, GameState, SwapOutcome, SwapRejection};
use tui_match3_types::{Coord, TICK_MS};

use crate::moves::SwapMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    Rejected(SwapRejection),
    /// The board was still resolving when the tick budget ran out
    Unresolved,
}

impl PlayError {
    pub fn code(self) -> &'static str {
        match self {
            PlayError::Rejected(_) => "swap_rejected",
            PlayError::Unresolved => "unresolved",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlayError::Rejected(SwapRejection::NotAdjacent) => "tiles are not adjacent",
            PlayError::Rejected(SwapRejection::Busy) => "board is still resolving",
            PlayError::Rejected(SwapRejection::EmptySlot) => "a tile holds no piece",
            PlayError::Rejected(SwapRejection::OutOfBounds) => "a tile lies outside the board",
            PlayError::Unresolved => "tick budget ran out before the board went idle",
        }
    }
}

impl std::fmt::Display for PlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for PlayError {}

/// What one resolved swap did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayReport {
    pub reverted: bool,
    pub passes: u32,
    pub cleared: u32,
    pub ticks: u32,
    pub events: Vec<BoardEvent>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Request the swap `a`/`b` and tick until the board is idle again.
///
/// Events and diagnostics produced along the way are drained into the report.
/// Presenter notices are not; callers that never present the board should
/// call [`GameState::set_presenting`] with `false` first.
pub fn play_swap<C: ColorSource>(
    state: &mut GameState<C>,
    a: Coord,
    b: Coord,
    max_ticks: u32,
) -> Result<PlayReport, PlayError> {
    if let SwapOutcome::Rejected(reason) = state.request_swap(a, b) {
        return Err(PlayError::Rejected(reason));
    }

    let mut report = PlayReport::default();
    while !state.is_idle() {
        if report.ticks >= max_ticks {
            return Err(PlayError::Unresolved);
        }
        state.tick(TICK_MS);
        report.ticks += 1;
    }

    report.events = state.take_events();
    report.diagnostics = state.take_diagnostics();
    for event in &report.events {
        match *event {
            BoardEvent::SwapReverted { .. } => report.reverted = true,
            BoardEvent::PassCleared { pass, cleared } => {
                report.passes = report.passes.max(pass);
                report.cleared += cleared;
            }
            _ => {}
        }
    }
    Ok(report)
}

/// [`play_swap`] for a move found by [`crate::find_swaps`]
pub fn play_move<C: ColorSource>(
    state: &mut GameState<C>,
    mv: SwapMove,
    max_ticks: u32,
) -> Result<PlayReport, PlayError> {
    play_swap(state, mv.a, mv.b, max_ticks)
}

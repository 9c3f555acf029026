//! Game state module - the board and its resolution state machine
//!
//! [`GameState`] owns the grid, the color source, and the cascade state
//! machine. Time only moves through [`GameState::tick`]:
//!
//! 1. every piece advances its motion by the elapsed time
//! 2. the current [`Phase`] checks its completion condition and, when met,
//!    performs the next step
//!
//! ```text
//! Idle ─request_swap─▶ Swapping ─no match─▶ Swapping(reverting) ─▶ Idle
//!                         │
//!                       match
//!                         ▼
//!   ┌──────────▶ Clearing ─delay─▶ Collapsing ─settled─▶ Refilling
//!   │                                                       │
//!   └──── matches ◀── Rematching ◀───────settled────────────┘
//!                         │
//!                    no matches ─▶ Idle
//! ```
//!
//! Grid mutations happen at the start of a step, before the motion they
//! trigger. Swap requests are only accepted in `Idle`.

use crate::cascade::{affected_columns, clear_pieces, collapse_columns, fill_empty, Spawn};
use crate::config::{BoardConfig, ConfigError};
use crate::grid::Grid;
use crate::matcher::{union_into, MatchFinder};
use crate::present::{BoardEvent, Diagnostic, Journal, Presenter};
use crate::rng::{ColorSource, PaletteRng};
use crate::swap::SwapSession;
use crate::types::{Coord, TICK_MS};

/// Resolution phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Two pieces are animating into each other's slots
    Swapping { a: Coord, b: Coord, reverting: bool },
    /// Matched pieces are gone; waiting before the columns collapse
    Clearing { remaining_ms: u32, columns: Vec<i32> },
    /// Waiting for falling pieces to settle
    Collapsing,
    /// Waiting for refill pieces to settle
    Refilling,
    /// Settle delay before the next match scan
    Rematching { remaining_ms: u32 },
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Swapping {
                reverting: false, ..
            } => "swapping",
            Phase::Swapping {
                reverting: true, ..
            } => "reverting",
            Phase::Clearing { .. } => "clearing",
            Phase::Collapsing => "collapsing",
            Phase::Refilling => "refilling",
            Phase::Rematching { .. } => "rematching",
        }
    }
}

/// Complete board state
#[derive(Debug, Clone)]
pub struct GameState<C = PaletteRng> {
    pub(crate) config: BoardConfig,
    pub(crate) grid: Grid,
    pub(crate) colors: C,
    pub(crate) finder: MatchFinder,
    pub(crate) phase: Phase,
    pub(crate) session: SwapSession,
    pub(crate) journal: Journal,
    /// Pass number within the running cascade (0 outside a cascade)
    pass: u32,
    last_cascade_passes: u32,
    cleared_total: u64,
    fill_exhausted: bool,
}

impl GameState<PaletteRng> {
    /// Build and fill a board using the config's palette and seed
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        let colors = PaletteRng::new(config.palette, config.seed);
        Self::with_colors(config, colors)
    }
}

impl<C: ColorSource> GameState<C> {
    /// Build and fill a board drawing colors from `colors`
    pub fn with_colors(config: BoardConfig, colors: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::with_obstacles(config.width, config.height, &config.obstacles);
        let mut state = Self::assemble(config, grid, colors);
        let report = fill_empty(
            &mut state.grid,
            &state.finder,
            &mut state.colors,
            state.config.max_fill_retries,
            Spawn::AtRest,
            &mut state.journal,
        );
        state.fill_exhausted = report.exhausted > 0;
        Ok(state)
    }

    /// Adopt an existing grid as-is (no fill). Width and height come from the
    /// grid; the config supplies everything else. Its pieces are announced to
    /// the presenter as spawns.
    pub fn from_grid(config: BoardConfig, grid: Grid, colors: C) -> Self {
        let mut config = config;
        config.width = grid.width() as u8;
        config.height = grid.height() as u8;
        config.obstacles = grid
            .tiles()
            .iter()
            .filter(|t| t.is_obstacle())
            .map(|t| t.coord())
            .collect();
        let mut state = Self::assemble(config, grid, colors);
        for piece in state.grid.pieces() {
            state.journal.spawned(piece);
        }
        state
    }

    fn assemble(config: BoardConfig, grid: Grid, colors: C) -> Self {
        Self {
            finder: MatchFinder::new(config.wild_rule),
            config,
            grid,
            colors,
            phase: Phase::Idle,
            session: SwapSession::default(),
            journal: Journal::default(),
            pass: 0,
            last_cascade_passes: 0,
            cleared_total: 0,
            fill_exhausted: false,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn finder(&self) -> &MatchFinder {
        &self.finder
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Swap requests are accepted only while idle
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn pass(&self) -> u32 {
        self.pass
    }

    /// Passes run by the most recent finished cascade
    pub fn last_cascade_passes(&self) -> u32 {
        self.last_cascade_passes
    }

    pub fn cleared_total(&self) -> u64 {
        self.cleared_total
    }

    /// A fill since the last full fill kept a piece that completes a match
    pub fn fill_exhausted(&self) -> bool {
        self.fill_exhausted
    }

    pub fn session(&self) -> &SwapSession {
        &self.session
    }

    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        self.journal.take_events()
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.journal.take_diagnostics()
    }

    /// Turn presenter notifications on or off. A board that is never
    /// [`present`](Self::present)ed should turn them off, or the queue grows
    /// with every spawn and destroy.
    pub fn set_presenting(&mut self, presenting: bool) {
        self.journal.set_muted(!presenting);
    }

    pub fn is_presenting(&self) -> bool {
        !self.journal.is_muted()
    }

    /// Notifications waiting for the next [`present`](Self::present)
    pub fn pending_notices(&self) -> usize {
        self.journal.pending_notices()
    }

    /// Deliver pending spawn/destroy/highlight/position notifications
    pub fn present<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        let grid = &self.grid;
        self.journal.flush(presenter, |id| grid.find_piece(id));
    }

    /// Empty the board and fill it again, dropping new pieces in from above.
    ///
    /// Only allowed while idle: a running swap or cascade always resolves to
    /// its end. Returns false (and changes nothing) otherwise. An open swap
    /// session is cancelled.
    pub fn restart(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.cancel_swap_session();
        for piece in self.grid.drain_pieces() {
            self.journal.destroyed(piece);
        }
        self.pass = 0;
        let report = fill_empty(
            &mut self.grid,
            &self.finder,
            &mut self.colors,
            self.config.max_fill_retries,
            Spawn::drop_from(&self.config),
            &mut self.journal,
        );
        self.fill_exhausted = report.exhausted > 0;
        self.journal.event(BoardEvent::Restarted);
        self.phase = Phase::Refilling;
        true
    }

    /// Advance by `elapsed_ms`. Returns true if anything visible changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = false;
        for piece in self.grid.pieces_mut() {
            if piece.advance(elapsed_ms) {
                self.journal.moved(piece.id());
                changed = true;
            }
        }
        changed | self.step(elapsed_ms)
    }

    /// Tick at the default rate until idle. Returns false if `max_ticks` ran out first.
    pub fn run_until_idle(&mut self, max_ticks: u32) -> bool {
        for _ in 0..max_ticks {
            if self.is_idle() {
                return true;
            }
            self.tick(TICK_MS);
        }
        self.is_idle()
    }

    fn step(&mut self, elapsed_ms: u32) -> bool {
        match self.phase.clone() {
            Phase::Idle => false,

            Phase::Swapping { a, b, reverting } => {
                if !self.grid.is_settled() {
                    return false;
                }
                if reverting {
                    self.journal.event(BoardEvent::SwapReverted { a, b });
                    self.phase = Phase::Idle;
                    return true;
                }
                let mut matched = self.finder.find_matches_at(&self.grid, a);
                union_into(&mut matched, &self.finder.find_matches_at(&self.grid, b));
                if matched.is_empty() {
                    self.grid.swap(a, b);
                    self.animate_swap(a, b);
                    self.phase = Phase::Swapping {
                        a,
                        b,
                        reverting: true,
                    };
                } else {
                    self.journal.event(BoardEvent::SwapCommitted { a, b });
                    self.begin_pass(&matched);
                }
                true
            }

            Phase::Clearing {
                remaining_ms,
                columns,
            } => {
                let remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
                if remaining_ms > 0 {
                    self.phase = Phase::Clearing {
                        remaining_ms,
                        columns,
                    };
                    return false;
                }
                let moved = collapse_columns(
                    &mut self.grid,
                    &columns,
                    self.config.fall_ms_per_cell,
                    self.config.interpolation,
                    &mut self.journal,
                );
                self.journal.event(BoardEvent::Collapsed {
                    pass: self.pass,
                    moved: moved.len() as u32,
                });
                self.phase = Phase::Collapsing;
                true
            }

            Phase::Collapsing => {
                if !self.grid.is_settled() {
                    return false;
                }
                let report = fill_empty(
                    &mut self.grid,
                    &self.finder,
                    &mut self.colors,
                    self.config.max_fill_retries,
                    Spawn::drop_from(&self.config),
                    &mut self.journal,
                );
                self.fill_exhausted |= report.exhausted > 0;
                self.journal.event(BoardEvent::Refilled {
                    pass: self.pass,
                    spawned: report.spawned,
                });
                self.phase = Phase::Refilling;
                true
            }

            Phase::Refilling => {
                if !self.grid.is_settled() {
                    return false;
                }
                self.phase = Phase::Rematching {
                    remaining_ms: self.config.settle_delay_ms,
                };
                true
            }

            Phase::Rematching { remaining_ms } => {
                let remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
                if remaining_ms > 0 {
                    self.phase = Phase::Rematching { remaining_ms };
                    return false;
                }
                let matched = self.finder.find_all_matches(&self.grid);
                if matched.is_empty() {
                    self.finish_cascade();
                } else {
                    self.begin_pass(&matched);
                }
                true
            }
        }
    }

    fn begin_pass(&mut self, matched: &[Coord]) {
        if self.pass == 0 {
            self.journal.event(BoardEvent::CascadeStarted);
        }
        if self.pass >= self.config.max_cascade_passes {
            self.journal.diagnostic(Diagnostic::CascadeBoundReached { passes: self.pass });
            self.finish_cascade();
            return;
        }
        self.pass += 1;
        let cleared = clear_pieces(&mut self.grid, matched, &mut self.journal);
        self.cleared_total += cleared as u64;
        self.journal.event(BoardEvent::PassCleared {
            pass: self.pass,
            cleared,
        });
        self.phase = Phase::Clearing {
            remaining_ms: self.config.clear_delay_ms,
            columns: affected_columns(matched),
        };
    }

    fn finish_cascade(&mut self) {
        if self.pass > 0 {
            self.journal
                .event(BoardEvent::CascadeFinished { passes: self.pass });
            self.last_cascade_passes = self.pass;
        }
        self.pass = 0;
        self.phase = Phase::Idle;
    }

    /// Animate the pieces now at `a` and `b` onto their slots
    pub(crate) fn animate_swap(&mut self, a: Coord, b: Coord) {
        for c in [a, b] {
            if let Some(piece) = self.grid.get_mut(c.x, c.y) {
                piece.move_to(c, self.config.swap_ms, 0, self.config.interpolation);
                self.journal.moved(piece.id());
            }
        }
    }
}

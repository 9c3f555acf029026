//! Core board logic - pure, deterministic, and testable
//!
//! This crate contains the match-3 board simulation: the grid, match search,
//! the cascade state machine, and the swap controller. It has **no
//! dependencies** on rendering, input devices, or I/O:
//!
//! - **Deterministic**: same config and seed produce the same board and cascades
//! - **Tick-driven**: all animation and sequencing advances through
//!   [`GameState::tick`], never a frame clock
//! - **Fail-soft**: out-of-bounds access returns `None`, invalid swaps are
//!   rejected as values, fill exhaustion becomes a [`Diagnostic`]
//!
//! # Module Structure
//!
//! - [`grid`]: `width × height` piece/tile store, the single mutation API
//! - [`piece`]: piece identity, color, and eased motion toward its slot
//! - [`easing`]: interpolation curves as a lookup table of pure functions
//! - [`matcher`]: directional run search and match combination
//! - [`cascade`]: fill, clear, and collapse steps
//! - [`game_state`]: the resolution state machine
//! - [`swap`]: swap validation and the press/drag/release session
//! - [`present`]: presenter contract, events, diagnostics
//! - [`rng`]: seeded palette color source
//! - [`config`]: board configuration and validation
//! - [`snapshot`]: plain-data view for renderers and tooling
//!
//! # Coordinates
//!
//! `(0, 0)` is the bottom-left cell; `y` grows upward, so pieces fall toward
//! smaller `y`.
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{BoardConfig, GameState};
//! use tui_match3_core::types::Coord;
//!
//! let mut game = GameState::new(BoardConfig::default().with_seed(12345)).unwrap();
//! assert!(game.finder().find_all_matches(game.grid()).is_empty());
//!
//! // Swaps between non-neighbors are ignored.
//! let outcome = game.request_swap(Coord::new(0, 0), Coord::new(5, 5));
//! assert!(!outcome.is_accepted());
//!
//! // Adjacent swaps resolve over subsequent ticks.
//! game.request_swap(Coord::new(0, 0), Coord::new(1, 0));
//! assert!(game.run_until_idle(10_000));
//! ```
//!
//! # Timing
//!
//! - **Tick Rate**: 16ms nominal
//! - **Swap**: 250ms each way
//! - **Collapse**: 100ms per cell fallen
//! - **Settle delay**: 500ms after each pass before the next match scan

pub mod cascade;
pub mod config;
pub mod easing;
pub mod game_state;
pub mod grid;
pub mod matcher;
pub mod piece;
pub mod present;
pub mod rng;
pub mod snapshot;
pub mod swap;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use cascade::{FillReport, Spawn};
pub use config::{BoardConfig, ConfigError};
pub use easing::Interpolation;
pub use game_state::{GameState, Phase};
pub use grid::{Grid, Tile};
pub use matcher::{MatchFinder, WildRule};
pub use piece::{Piece, PieceId, Vec2};
pub use present::{BoardEvent, Diagnostic, Highlight, Presenter};
pub use rng::{ColorSource, Palette, PaletteRng, SimpleRng};
pub use snapshot::{BoardSnapshot, CellSnapshot, PieceSnapshot};
pub use swap::{SwapOutcome, SwapRejection, SwapSession};

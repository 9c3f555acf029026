//! Move analysis and headless play on top of the core board
//!
//! - [`find_swaps`] lists every adjacent swap that would produce a match
//!   (hints, deadlock detection)
//! - [`play_swap`] requests a swap and ticks the board until it is idle

pub mod moves;
pub mod play;

pub use moves::{best_swap, find_swaps, first_swap, has_moves, SwapMove};
pub use play::{play_move, play_swap, PlayError, PlayReport};

//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework and of the board itself. It
//! maps `crossterm` key events into [`crate::types::GameAction`] and turns a
//! keyboard cursor into press/drag/release [`GestureEvent`]s.

pub mod handler;
pub mod map;

pub use tui_match3_types as types;

pub use handler::{GestureEvent, GestureInput};
pub use map::{handle_key_event, should_quit};

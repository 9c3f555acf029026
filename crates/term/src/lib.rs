//! Terminal presentation layer for the board.
//!
//! Renders into a plain framebuffer that is diffed and flushed to a
//! `crossterm` backend, without a widget toolkit.
//!
//! - [`SpriteLayer`] receives the board's presenter notifications
//! - [`BoardView`] draws a snapshot plus sprites into a [`FrameBuffer`]
//! - [`TerminalRenderer`] writes only what changed since the last frame

pub mod board_view;
pub mod fb;
pub mod renderer;
pub mod sprites;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use board_view::{color_rgb, BoardView, Overlay, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{changed_spans, encode_full_into, encode_spans_into, Span, TerminalRenderer};
pub use sprites::{Sprite, SpriteLayer};

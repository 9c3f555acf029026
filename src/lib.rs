//! TUI Match-3 (workspace facade crate).
//!
//! Re-exports the board crates under `tui_match3::{core,engine,input,term,types}`
//! and holds the configuration and logging shared by the two binaries.

pub mod cli;
pub mod log;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;

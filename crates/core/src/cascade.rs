//! Cascade steps - fill, clear, collapse
//!
//! Each step mutates the grid immediately and starts whatever motion the
//! pieces need. Sequencing (waiting for pieces to settle between steps) is the
//! job of [`crate::GameState`].

use crate::config::BoardConfig;
use crate::easing::Interpolation;
use crate::grid::Grid;
use crate::matcher::MatchFinder;
use crate::piece::Vec2;
use crate::present::{Diagnostic, Journal};
use crate::rng::ColorSource;
use crate::types::{Coord, MIN_MATCH};

/// How freshly filled pieces enter the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spawn {
    /// Placed at rest on their slot
    AtRest,
    /// Dropped in from `offset_rows` above their slot
    Drop {
        offset_rows: u8,
        duration_ms: u32,
        curve: Interpolation,
    },
}

impl Spawn {
    pub fn drop_from(config: &BoardConfig) -> Self {
        Spawn::Drop {
            offset_rows: config.spawn_offset_rows,
            duration_ms: config.refill_ms,
            curve: config.interpolation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillReport {
    pub spawned: u32,
    /// Cells where the retry bound ran out and a matching piece was kept
    pub exhausted: u32,
}

/// Put a new piece on every open cell.
///
/// Cells are visited column by column (x ascending, then y ascending). A pick
/// that completes a run with the pieces to its left or below is re-rolled up
/// to `max_retries` times; after that it is kept and a
/// [`Diagnostic::FillExhausted`] is recorded.
pub fn fill_empty<C: ColorSource + ?Sized>(
    grid: &mut Grid,
    finder: &MatchFinder,
    colors: &mut C,
    max_retries: u32,
    spawn: Spawn,
    journal: &mut Journal,
) -> FillReport {
    let mut report = FillReport::default();
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if !grid.is_open(x, y) {
                continue;
            }
            let at = Coord::new(x, y);
            let piece = grid.create_piece(colors.pick_color(), at);
            grid.place(piece, x, y);

            let mut retries = 0;
            while finder.has_match_on_fill(grid, at, MIN_MATCH) {
                if retries >= max_retries {
                    journal.diagnostic(Diagnostic::FillExhausted { x, y, retries });
                    report.exhausted += 1;
                    break;
                }
                let color = colors.pick_color();
                if let Some(p) = grid.get_mut(x, y) {
                    p.set_color(color);
                }
                retries += 1;
            }

            let Some(piece) = grid.get_mut(x, y) else {
                continue;
            };
            if let Spawn::Drop {
                offset_rows,
                duration_ms,
                curve,
            } = spawn
            {
                piece.set_visual(Vec2::new(x as f32, (y + offset_rows as i32) as f32));
                piece.move_to(at, duration_ms, 0, curve);
            }
            journal.spawned(piece);
            report.spawned += 1;
        }
    }
    report
}

/// Remove the pieces at `coords` and hand them to the presenter for disposal.
///
/// Returns how many pieces were removed; empty slots are skipped.
pub fn clear_pieces(grid: &mut Grid, coords: &[Coord], journal: &mut Journal) -> u32 {
    let mut cleared = 0;
    for c in coords {
        if let Some(piece) = grid.clear(c.x, c.y) {
            journal.destroyed(piece);
            cleared += 1;
        }
    }
    cleared
}

/// Sorted, deduplicated columns touched by `coords`
pub fn affected_columns(coords: &[Coord]) -> Vec<i32> {
    let mut columns: Vec<i32> = coords.iter().map(|c| c.x).collect();
    columns.sort_unstable();
    columns.dedup();
    columns
}

/// Drop every piece in column `x` onto the lowest open slot beneath it.
///
/// Scans upward from row 0. For each open slot, the nearest piece above
/// (passing over empty cells and obstacles) is moved down logically at once and
/// animated over `fall_ms_per_cell × distance`. Returns the destinations of
/// the pieces that moved.
pub fn collapse_column(
    grid: &mut Grid,
    x: i32,
    fall_ms_per_cell: u32,
    curve: Interpolation,
    journal: &mut Journal,
) -> Vec<Coord> {
    let mut moved = Vec::new();
    for y in 0..grid.height() {
        if !grid.is_open(x, y) {
            continue;
        }
        let Some(above) = ((y + 1)..grid.height()).find(|&ya| grid.get(x, ya).is_some()) else {
            break;
        };
        let to = Coord::new(x, y);
        if !grid.relocate(Coord::new(x, above), to) {
            continue;
        }
        if let Some(piece) = grid.get_mut(x, y) {
            let distance = (above - y) as u32;
            piece.move_to(to, fall_ms_per_cell.saturating_mul(distance), 0, curve);
            journal.moved(piece.id());
        }
        moved.push(to);
    }
    moved
}

/// [`collapse_column`] over each listed column
pub fn collapse_columns(
    grid: &mut Grid,
    columns: &[i32],
    fall_ms_per_cell: u32,
    curve: Interpolation,
    journal: &mut Journal,
) -> Vec<Coord> {
    let mut moved = Vec::new();
    for &x in columns {
        moved.extend(collapse_column(grid, x, fall_ms_per_cell, curve, journal));
    }
    moved
}

//! BoardView: draws a board snapshot and its sprites into a framebuffer.
//!
//! Pure (no I/O) and unit-testable. Board row `y = 0` is drawn at the bottom
//! of the frame; sprites still above the board (refill pieces dropping in)
//! are clipped at the top border.

use crate::core::{BoardSnapshot, Highlight};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::sprites::SpriteLayer;
use crate::types::{Coord, PieceColor, TileKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Frontend state drawn on top of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overlay {
    pub cursor: Option<Coord>,
    pub hint: Option<(Coord, Coord)>,
    /// Adjacent swaps that would match; `None` when not computed
    pub moves: Option<usize>,
}

const TILE_BG: Rgb = Rgb::new(30, 30, 40);
const OBSTACLE_BG: Rgb = Rgb::new(70, 70, 70);
const CURSOR_BG: Rgb = Rgb::new(90, 90, 110);
const SELECTED_BG: Rgb = Rgb::new(150, 150, 60);
const TARGET_BG: Rgb = Rgb::new(60, 110, 150);
const HINT_BG: Rgb = Rgb::new(60, 120, 60);

pub fn color_rgb(color: PieceColor) -> Rgb {
    match color {
        PieceColor::Red => Rgb::new(220, 70, 70),
        PieceColor::Orange => Rgb::new(255, 160, 40),
        PieceColor::Yellow => Rgb::new(240, 220, 80),
        PieceColor::Green => Rgb::new(90, 210, 110),
        PieceColor::Blue => Rgb::new(80, 130, 230),
        PieceColor::Purple => Rgb::new(180, 100, 220),
        PieceColor::Pink => Rgb::new(240, 130, 190),
        PieceColor::White => Rgb::new(235, 235, 235),
        PieceColor::Wild => Rgb::new(255, 255, 255),
    }
}

pub struct BoardView {
    /// Terminal columns per board cell
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // Two columns per cell roughly squares the terminal glyph aspect.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Top-left corner of the frame border for this snapshot and viewport
    pub fn frame_origin(&self, snap: &BoardSnapshot, viewport: Viewport) -> (i32, i32) {
        let frame_w = snap.width * self.cell_w as i32 + 2;
        let frame_h = snap.height + 2 + STATUS_ROWS;
        let x = (viewport.width as i32 - frame_w).max(0) / 2;
        let y = (viewport.height as i32 - frame_h).max(0) / 2;
        (x, y)
    }

    /// Screen position of board cell `(x, y)`'s first column
    fn cell_origin(&self, origin: (i32, i32), height: i32, x: i32, y: i32) -> (i32, i32) {
        (
            origin.0 + 1 + x * self.cell_w as i32,
            origin.1 + 1 + (height - 1 - y),
        )
    }

    pub fn render_into(
        &self,
        snap: &BoardSnapshot,
        sprites: &SpriteLayer,
        overlay: &Overlay,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let origin = self.frame_origin(snap, viewport);
        let frame_w = snap.width * self.cell_w as i32 + 2;
        let frame_h = snap.height + 2;
        draw_border(fb, origin, frame_w, frame_h);

        // Tiles.
        for y in 0..snap.height {
            for x in 0..snap.width {
                let c = Coord::new(x, y);
                let Some(cell) = snap.cell(x, y) else {
                    continue;
                };
                let (ch, bg) = match cell.tile {
                    TileKind::Obstacle => ('#', OBSTACLE_BG),
                    TileKind::Normal => ('·', self.tile_bg(c, sprites, overlay)),
                };
                let style = CellStyle::new(Rgb::new(90, 90, 100), bg).dim();
                let (px, py) = self.cell_origin(origin, snap.height, x, y);
                fb.fill_rect(px, py, self.cell_w, 1, style.into_cell(ch));
            }
        }

        // Pieces at their visual positions.
        for (_, sprite) in sprites.sprites_sorted() {
            let x = sprite.pos.x.round() as i32;
            let y = sprite.pos.y.round() as i32;
            if x < 0 || x >= snap.width || y < 0 || y >= snap.height {
                continue;
            }
            let bg = self.tile_bg(Coord::new(x, y), sprites, overlay);
            let style = CellStyle::new(color_rgb(sprite.color), bg).bold();
            let (px, py) = self.cell_origin(origin, snap.height, x, y);
            fb.fill_rect(px, py, self.cell_w, 1, style.into_cell(sprite.color.as_char()));
        }

        self.draw_status(fb, snap, overlay, origin, frame_h);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &BoardSnapshot,
        sprites: &SpriteLayer,
        overlay: &Overlay,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, sprites, overlay, viewport, &mut fb);
        fb
    }

    fn tile_bg(&self, c: Coord, sprites: &SpriteLayer, overlay: &Overlay) -> Rgb {
        match sprites.highlight(c) {
            Highlight::Selected => return SELECTED_BG,
            Highlight::Target => return TARGET_BG,
            Highlight::Transparent => {}
        }
        if overlay.cursor == Some(c) {
            return CURSOR_BG;
        }
        if let Some((a, b)) = overlay.hint {
            if a == c || b == c {
                return HINT_BG;
            }
        }
        TILE_BG
    }

    fn draw_status(
        &self,
        fb: &mut FrameBuffer,
        snap: &BoardSnapshot,
        overlay: &Overlay,
        origin: (i32, i32),
        frame_h: i32,
    ) {
        let label = CellStyle::default().bold();
        let value = CellStyle::default();
        let mut y = origin.1 + frame_h;

        let x = fb.put_str(origin.0, y, snap.phase, label);
        let detail = if snap.pass > 0 {
            format!("  pass {}  cleared {}", snap.pass, snap.cleared_total)
        } else {
            format!("  cleared {}", snap.cleared_total)
        };
        fb.put_str(x, y, &detail, value);
        y += 1;

        match overlay.moves {
            Some(0) => {
                fb.put_str(origin.0, y, "no moves - r to restart", label);
            }
            Some(n) => {
                fb.put_str(origin.0, y, &format!("{n} moves"), value.dim());
            }
            None => {}
        }
        if snap.fill_exhausted {
            y += 1;
            fb.put_str(origin.0, y, "fill exhausted", value.dim());
        }
    }
}

const STATUS_ROWS: i32 = 3;

fn draw_border(fb: &mut FrameBuffer, (x, y): (i32, i32), w: i32, h: i32) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
    fb.set(x, y, style.into_cell('┌'));
    fb.set(x + w - 1, y, style.into_cell('┐'));
    fb.set(x, y + h - 1, style.into_cell('└'));
    fb.set(x + w - 1, y + h - 1, style.into_cell('┘'));
    for dx in 1..w - 1 {
        fb.set(x + dx, y, style.into_cell('─'));
        fb.set(x + dx, y + h - 1, style.into_cell('─'));
    }
    for dy in 1..h - 1 {
        fb.set(x, y + dy, style.into_cell('│'));
        fb.set(x + w - 1, y + dy, style.into_cell('│'));
    }
}

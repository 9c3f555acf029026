use crate::game_state::GameState;
use crate::piece::{PieceId, Vec2};
use crate::rng::ColorSource;
use crate::types::{Coord, PieceColor, TileKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSnapshot {
    pub tile: TileKind,
    pub color: Option<PieceColor>,
    pub piece: Option<PieceId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceSnapshot {
    pub id: PieceId,
    pub color: PieceColor,
    pub coord: Coord,
    pub visual: Vec2,
    pub animating: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardSnapshot {
    pub width: i32,
    pub height: i32,
    /// Row-major, `y = 0` first
    pub cells: Vec<CellSnapshot>,
    pub pieces: Vec<PieceSnapshot>,
    pub phase: &'static str,
    pub pass: u32,
    pub animating: u32,
    pub selected: Option<Coord>,
    pub target: Option<Coord>,
    pub fill_exhausted: bool,
    pub cleared_total: u64,
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.pieces.clear();
        self.phase = "idle";
        self.pass = 0;
        self.animating = 0;
        self.selected = None;
        self.target = None;
        self.fill_exhausted = false;
        self.cleared_total = 0;
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&CellSnapshot> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get((y * self.width + x) as usize)
    }

    /// Swaps are accepted
    pub fn playable(&self) -> bool {
        self.phase == "idle"
    }
}

impl<C: ColorSource> GameState<C> {
    /// Fill `out` in place, reusing its buffers
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.clear();
        let grid = &self.grid;
        out.width = grid.width();
        out.height = grid.height();
        out.cells.extend(grid.tiles().iter().map(|t| {
            let piece = grid.get(t.x, t.y);
            CellSnapshot {
                tile: t.kind,
                color: piece.map(|p| p.color()),
                piece: piece.map(|p| p.id()),
            }
        }));
        out.pieces.extend(grid.pieces().map(|p| PieceSnapshot {
            id: p.id(),
            color: p.color(),
            coord: p.coord(),
            visual: p.visual(),
            animating: p.is_animating(),
        }));
        out.animating = out.pieces.iter().filter(|p| p.animating).count() as u32;
        out.phase = self.phase.as_str();
        out.pass = self.pass();
        out.selected = self.session.source();
        out.target = self.session.target();
        out.fill_exhausted = self.fill_exhausted();
        out.cleared_total = self.cleared_total();
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

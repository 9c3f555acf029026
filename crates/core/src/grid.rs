//! Grid module - the authoritative piece/tile store
//!
//! The grid is a `width × height` arena of slots, each holding an optional
//! [`Piece`] and a static [`Tile`]. It is the only place piece positions are
//! changed: every placement, removal, and exchange goes through this API, and
//! each keeps a piece's stored coordinate equal to its slot.
//!
//! Storage is a flat row-major array (`y * width + x`). Coordinates outside the
//! board never fault: lookups return `None` and registrations are declined.

use crate::piece::{Piece, PieceId};
use crate::types::{Coord, PieceColor, TileKind};

/// A static board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub kind: TileKind,
}

impl Tile {
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    pub fn is_obstacle(&self) -> bool {
        self.kind == TileKind::Obstacle
    }
}

/// The board's piece and tile store
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    cells: Vec<Option<Piece>>,
    next_id: u32,
}

impl Grid {
    /// Create an empty grid of normal tiles
    pub fn new(width: u8, height: u8) -> Self {
        Self::with_obstacles(width, height, &[])
    }

    /// Create an empty grid; listed coordinates become obstacle tiles.
    ///
    /// Out-of-bounds obstacle coordinates are ignored.
    pub fn with_obstacles(width: u8, height: u8, obstacles: &[Coord]) -> Self {
        let (w, h) = (width as i32, height as i32);
        let mut tiles = Vec::with_capacity((w * h) as usize);
        for y in 0..h {
            for x in 0..w {
                let kind = if obstacles.contains(&Coord::new(x, y)) {
                    TileKind::Obstacle
                } else {
                    TileKind::Normal
                };
                tiles.push(Tile { x, y, kind });
            }
        }
        Self {
            width: w,
            height: h,
            tiles,
            cells: vec![None; (w * h) as usize],
            next_id: 0,
        }
    }

    /// Build a grid from ASCII rows, **top row first**.
    ///
    /// Each character is a color glyph (see [`PieceColor::from_char`]), `.` for
    /// an empty slot, or `#` for an obstacle. Rows shorter than the widest row
    /// are padded with empty slots. A side is at most 255 cells: only the
    /// leftmost 255 columns and the bottom 255 rows are read.
    ///
    /// ```
    /// use tui_match3_core::Grid;
    /// use tui_match3_core::types::PieceColor;
    ///
    /// let grid = Grid::from_ascii(&[
    ///     "B..",
    ///     "RRG",
    /// ]);
    /// assert_eq!(grid.width(), 3);
    /// assert_eq!(grid.color_at(0, 0), Some(PieceColor::Red));
    /// assert_eq!(grid.color_at(0, 1), Some(PieceColor::Blue));
    /// assert!(grid.get(1, 1).is_none());
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Self {
        let max_side = u8::MAX as usize;
        let rows = &rows[rows.len().saturating_sub(max_side)..];
        let height = rows.len();
        let width = rows
            .iter()
            .map(|r| r.chars().count().min(max_side))
            .max()
            .unwrap_or(0);
        let mut obstacles = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let y = (height - 1 - row) as i32;
            for (x, ch) in line.chars().take(width).enumerate() {
                if ch == '#' {
                    obstacles.push(Coord::new(x as i32, y));
                }
            }
        }

        let mut grid = Self::with_obstacles(width as u8, height as u8, &obstacles);
        for (row, line) in rows.iter().enumerate() {
            let y = (height - 1 - row) as i32;
            for (x, ch) in line.chars().take(width).enumerate() {
                if let Some(color) = PieceColor::from_char(ch) {
                    let piece = grid.create_piece(color, Coord::new(x as i32, y));
                    grid.place(piece, x as i32, y);
                }
            }
        }
        grid
    }

    /// Render the grid as ASCII rows, top row first (inverse of [`Grid::from_ascii`])
    pub fn to_ascii(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|y| {
                (0..self.width)
                    .map(|x| match (self.get(x, y), self.is_obstacle(x, y)) {
                        (Some(p), _) => p.color().as_char(),
                        (None, true) => '#',
                        (None, false) => '.',
                    })
                    .collect()
            })
            .collect()
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// `0 ≤ x < width` and `0 ≤ y < height`
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Mint a new piece with a fresh id. It is not registered anywhere yet.
    pub fn create_piece(&mut self, color: PieceColor, at: Coord) -> Piece {
        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        Piece::new(id, color, at)
    }

    /// Piece at `(x, y)`; `None` when empty or out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<&Piece> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    pub(crate) fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Piece> {
        let i = self.index(x, y)?;
        self.cells[i].as_mut()
    }

    pub fn piece_at(&self, c: Coord) -> Option<&Piece> {
        self.get(c.x, c.y)
    }

    pub fn color_at(&self, x: i32, y: i32) -> Option<PieceColor> {
        self.get(x, y).map(|p| p.color())
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).map(|t| t.is_obstacle()).unwrap_or(false)
    }

    /// In bounds, not an obstacle, and currently empty
    pub fn is_open(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).map(|t| !t.is_obstacle()).unwrap_or(false) && self.get(x, y).is_none()
    }

    /// Set the piece's coordinate to `(x, y)` and register it there.
    ///
    /// The coordinate is always updated. Registration happens only for an
    /// in-bounds, non-obstacle slot. Returns whichever piece ended up without a
    /// slot: the previous occupant, or `piece` itself when it could not be
    /// registered.
    pub fn place(&mut self, mut piece: Piece, x: i32, y: i32) -> Option<Piece> {
        piece.set_coord(Coord::new(x, y));
        match self.index(x, y) {
            Some(i) if !self.tiles[i].is_obstacle() => self.cells[i].replace(piece),
            _ => Some(piece),
        }
    }

    /// Remove and return the piece at `(x, y)` for disposal
    pub fn clear(&mut self, x: i32, y: i32) -> Option<Piece> {
        self.index(x, y).and_then(|i| self.cells[i].take())
    }

    /// Move the piece at `from` into the empty slot `to`.
    ///
    /// Returns false (and changes nothing) if `from` is empty or `to` is not open.
    pub fn relocate(&mut self, from: Coord, to: Coord) -> bool {
        if self.get(from.x, from.y).is_none() || !self.is_open(to.x, to.y) {
            return false;
        }
        if let Some(piece) = self.clear(from.x, from.y) {
            self.place(piece, to.x, to.y);
        }
        true
    }

    /// Exchange the pieces at `a` and `b`, keeping coordinates in sync.
    ///
    /// Returns false (and changes nothing) unless both slots hold a piece.
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        let (Some(ia), Some(ib)) = (self.index(a.x, a.y), self.index(b.x, b.y)) else {
            return false;
        };
        if ia == ib || self.cells[ia].is_none() || self.cells[ib].is_none() {
            return false;
        }
        self.cells.swap(ia, ib);
        if let Some(p) = self.cells[ia].as_mut() {
            p.set_coord(a);
        }
        if let Some(p) = self.cells[ib].as_mut() {
            p.set_coord(b);
        }
        true
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten()
    }

    pub(crate) fn pieces_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.cells.iter_mut().flatten()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    pub fn find_piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces().find(|p| p.id() == id)
    }

    /// Every non-obstacle slot holds a piece
    pub fn is_full(&self) -> bool {
        self.tiles
            .iter()
            .zip(&self.cells)
            .all(|(t, c)| t.is_obstacle() || c.is_some())
    }

    /// No piece has a move in flight
    pub fn is_settled(&self) -> bool {
        self.pieces().all(|p| !p.is_animating())
    }

    pub fn animating_count(&self) -> usize {
        self.pieces().filter(|p| p.is_animating()).count()
    }

    /// Remove every piece, returning them in slot order
    pub fn drain_pieces(&mut self) -> Vec<Piece> {
        self.cells.iter_mut().filter_map(Option::take).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red(grid: &mut Grid, x: i32, y: i32) -> Piece {
        grid.create_piece(PieceColor::Red, Coord::new(x, y))
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.piece_count(), 0);
        assert_eq!(grid.tiles().len(), 12);
        for y in 0..3 {
            for x in 0..4 {
                assert!(grid.is_open(x, y));
                assert_eq!(grid.tile(x, y).map(|t| t.coord()), Some(Coord::new(x, y)));
            }
        }
    }

    #[test]
    fn from_ascii_caps_sides_at_255() {
        let wide = "R".repeat(300);
        let grid = Grid::from_ascii(&[wide.as_str()]);
        assert_eq!(grid.width(), 255);
        assert_eq!(grid.piece_count(), 255);

        let tall: Vec<&str> = std::iter::once("B")
            .chain(std::iter::repeat("G").take(299))
            .collect();
        let grid = Grid::from_ascii(&tall);
        assert_eq!(grid.height(), 255);
        assert_eq!(grid.piece_count(), 255);
        // The top rows are the ones dropped.
        assert_eq!(grid.color_at(0, 254), Some(PieceColor::Green));
    }

    #[test]
    fn out_of_bounds_lookups_fail_soft() {
        let grid = Grid::new(4, 4);
        assert!(grid.get(-1, 0).is_none());
        assert!(grid.get(0, -1).is_none());
        assert!(grid.get(4, 0).is_none());
        assert!(grid.get(0, 4).is_none());
        assert!(grid.tile(9, 9).is_none());
        assert!(!grid.in_bounds(4, 0));
        assert!(grid.in_bounds(3, 3));
    }

    #[test]
    fn place_registers_and_sets_coord() {
        let mut grid = Grid::new(4, 4);
        let p = red(&mut grid, 0, 0);
        assert!(grid.place(p, 2, 3).is_none());
        let placed = grid.get(2, 3).unwrap();
        assert_eq!(placed.coord(), Coord::new(2, 3));
    }

    #[test]
    fn place_out_of_bounds_hands_piece_back() {
        let mut grid = Grid::new(4, 4);
        let p = red(&mut grid, 0, 0);
        let back = grid.place(p, 7, 1).expect("piece returned");
        assert_eq!(back.coord(), Coord::new(7, 1));
        assert_eq!(grid.piece_count(), 0);
    }

    #[test]
    fn place_over_occupant_returns_occupant() {
        let mut grid = Grid::new(2, 2);
        let a = red(&mut grid, 0, 0);
        let a_id = a.id();
        let b = red(&mut grid, 0, 0);
        let b_id = b.id();
        grid.place(a, 0, 0);
        let displaced = grid.place(b, 0, 0).unwrap();
        assert_eq!(displaced.id(), a_id);
        assert_eq!(grid.get(0, 0).unwrap().id(), b_id);
    }

    #[test]
    fn obstacles_decline_registration() {
        let mut grid = Grid::with_obstacles(3, 3, &[Coord::new(1, 1)]);
        assert!(grid.is_obstacle(1, 1));
        assert!(!grid.is_open(1, 1));
        let p = red(&mut grid, 0, 0);
        assert!(grid.place(p, 1, 1).is_some());
        assert!(grid.get(1, 1).is_none());
    }

    #[test]
    fn clear_returns_ownership() {
        let mut grid = Grid::from_ascii(&["R"]);
        let p = grid.clear(0, 0).unwrap();
        assert_eq!(p.color(), PieceColor::Red);
        assert!(grid.clear(0, 0).is_none());
        assert!(grid.clear(5, 5).is_none());
    }

    #[test]
    fn swap_keeps_coords_in_sync() {
        let mut grid = Grid::from_ascii(&["RB"]);
        assert!(grid.swap(Coord::new(0, 0), Coord::new(1, 0)));
        assert_eq!(grid.color_at(0, 0), Some(PieceColor::Blue));
        assert_eq!(grid.get(0, 0).unwrap().coord(), Coord::new(0, 0));
        assert_eq!(grid.get(1, 0).unwrap().coord(), Coord::new(1, 0));
    }

    #[test]
    fn swap_requires_two_pieces() {
        let mut grid = Grid::from_ascii(&["R."]);
        assert!(!grid.swap(Coord::new(0, 0), Coord::new(1, 0)));
        assert!(!grid.swap(Coord::new(0, 0), Coord::new(0, 0)));
        assert!(!grid.swap(Coord::new(0, 0), Coord::new(-1, 0)));
        assert_eq!(grid.to_ascii(), vec!["R.".to_string()]);
    }

    #[test]
    fn relocate_into_open_slot() {
        let mut grid = Grid::from_ascii(&[".", "R"]);
        assert!(grid.relocate(Coord::new(0, 0), Coord::new(0, 1)));
        assert_eq!(grid.to_ascii(), vec!["R".to_string(), ".".to_string()]);
        assert!(!grid.relocate(Coord::new(0, 0), Coord::new(0, 1)));
    }

    #[test]
    fn ascii_round_trip_with_obstacles() {
        let rows = ["R#B", ".GY"];
        let grid = Grid::from_ascii(&rows);
        assert_eq!(grid.to_ascii(), rows.iter().map(|r| r.to_string()).collect::<Vec<_>>());
        assert!(grid.is_obstacle(1, 1));
        assert!(!grid.is_full());
    }

    #[test]
    fn ids_are_unique() {
        let grid = Grid::from_ascii(&["RGB", "YPO"]);
        let mut ids: Vec<_> = grid.pieces().map(|p| p.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }
}

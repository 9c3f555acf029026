//! Grid store tests - placement, bounds, and relocation

use tui_match3::core::Grid;
use tui_match3::types::{Coord, PieceColor, TileKind};

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::from_ascii(&["RGB", "GBR"]);

    assert!(grid.get(-1, 0).is_none());
    assert!(grid.get(0, -1).is_none());
    assert!(grid.get(3, 0).is_none());
    assert!(grid.get(0, 2).is_none());
    assert!(grid.tile(3, 0).is_none());
    assert!(!grid.in_bounds(3, 1));
    assert!(grid.in_bounds(2, 1));
}

#[test]
fn test_ascii_rows_are_top_first() {
    let grid = Grid::from_ascii(&["B..", "RRG"]);
    assert_eq!(grid.color_at(0, 0), Some(PieceColor::Red));
    assert_eq!(grid.color_at(2, 0), Some(PieceColor::Green));
    assert_eq!(grid.color_at(0, 1), Some(PieceColor::Blue));
    assert_eq!(grid.piece_count(), 4);
    assert_eq!(grid.to_ascii(), vec!["B..".to_string(), "RRG".to_string()]);
}

#[test]
fn test_place_out_of_bounds_updates_coord_only() {
    let mut grid = Grid::new(2, 2);
    let piece = grid.create_piece(PieceColor::Yellow, Coord::new(0, 0));

    let back = grid.place(piece, 5, 9).unwrap();
    assert_eq!(back.coord(), Coord::new(5, 9));
    assert_eq!(grid.piece_count(), 0);
}

#[test]
fn test_place_replaces_previous_occupant() {
    let mut grid = Grid::new(2, 2);
    let a = grid.create_piece(PieceColor::Red, Coord::new(0, 0));
    let b = grid.create_piece(PieceColor::Blue, Coord::new(0, 0));
    let a_id = a.id();

    assert!(grid.place(a, 0, 0).is_none());
    let displaced = grid.place(b, 0, 0).unwrap();
    assert_eq!(displaced.id(), a_id);
    assert_eq!(grid.color_at(0, 0), Some(PieceColor::Blue));
}

#[test]
fn test_clear_returns_piece_once() {
    let mut grid = Grid::from_ascii(&["RG"]);
    let piece = grid.clear(1, 0).unwrap();
    assert_eq!(piece.color(), PieceColor::Green);
    assert!(grid.clear(1, 0).is_none());
    assert!(grid.clear(7, 7).is_none());
}

#[test]
fn test_swap_keeps_coords_in_sync() {
    let mut grid = Grid::from_ascii(&["RG"]);
    let (a, b) = (Coord::new(0, 0), Coord::new(1, 0));

    assert!(grid.swap(a, b));
    assert_eq!(grid.color_at(0, 0), Some(PieceColor::Green));
    assert_eq!(grid.piece_at(a).unwrap().coord(), a);
    assert_eq!(grid.piece_at(b).unwrap().coord(), b);

    // Swapping with an empty or missing slot changes nothing.
    assert!(!grid.swap(a, Coord::new(2, 0)));
    assert!(!grid.swap(a, a));
}

#[test]
fn test_obstacles_never_hold_pieces() {
    let mut grid = Grid::from_ascii(&["R#", "GB"]);
    assert_eq!(grid.tile(1, 1).unwrap().kind, TileKind::Obstacle);
    assert!(!grid.is_open(1, 1));

    let piece = grid.create_piece(PieceColor::Red, Coord::new(1, 1));
    assert!(grid.place(piece, 1, 1).is_some());
    assert!(grid.get(1, 1).is_none());
    assert!(!grid.relocate(Coord::new(0, 1), Coord::new(1, 1)));
    assert!(grid.is_full());
}

#[test]
fn test_relocate_requires_open_target() {
    let mut grid = Grid::from_ascii(&[".", "R", "B"]);
    assert!(!grid.relocate(Coord::new(0, 1), Coord::new(0, 0)));
    assert!(grid.relocate(Coord::new(0, 1), Coord::new(0, 2)));
    assert_eq!(grid.to_ascii(), vec!["R", ".", "B"]);
    assert_eq!(grid.piece_at(Coord::new(0, 2)).unwrap().coord(), Coord::new(0, 2));
}

#[test]
fn test_find_piece_by_id() {
    let grid = Grid::from_ascii(&["RG"]);
    let id = grid.get(1, 0).unwrap().id();
    assert_eq!(grid.find_piece(id).unwrap().color(), PieceColor::Green);
}

//! SpriteLayer: the terminal side of the board's presenter contract.
//!
//! The board tells the layer when pieces appear, vanish, and move, and which
//! tiles to highlight. The view draws whatever the layer currently holds, so
//! pieces show up at their interpolated positions between slots.

use std::collections::HashMap;

use crate::core::{Highlight, Piece, PieceId, Presenter, Vec2};
use crate::types::{Coord, PieceColor};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub color: PieceColor,
    pub pos: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct SpriteLayer {
    sprites: HashMap<PieceId, Sprite>,
    highlights: HashMap<Coord, Highlight>,
}

impl SpriteLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn get(&self, id: PieceId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    /// Sprites in id order, so overlapping sprites draw deterministically
    pub fn sprites_sorted(&self) -> Vec<(PieceId, Sprite)> {
        let mut out: Vec<_> = self.sprites.iter().map(|(&id, &s)| (id, s)).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    pub fn highlight(&self, tile: Coord) -> Highlight {
        self.highlights.get(&tile).copied().unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
        self.highlights.clear();
    }
}

impl Presenter for SpriteLayer {
    fn spawn(&mut self, piece: &Piece) {
        self.sprites.insert(
            piece.id(),
            Sprite {
                color: piece.color(),
                pos: piece.visual(),
            },
        );
    }

    fn destroy(&mut self, piece: &Piece) {
        self.sprites.remove(&piece.id());
    }

    fn set_visual_position(&mut self, piece: &Piece, pos: Vec2) {
        if let Some(sprite) = self.sprites.get_mut(&piece.id()) {
            sprite.pos = pos;
        }
    }

    fn set_highlight(&mut self, tile: Coord, highlight: Highlight) {
        if highlight == Highlight::Transparent {
            self.highlights.remove(&tile);
        } else {
            self.highlights.insert(tile, highlight);
        }
    }
}

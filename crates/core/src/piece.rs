//! Piece module - a colored board resident and its animated motion
//!
//! A piece has two positions:
//!
//! - its **logical** coordinate, owned by the grid and changed only through it
//! - its **visual** position, a float point that animates toward a target and
//!   must converge to the logical coordinate
//!
//! Motion is advanced by elapsed time (no frame clock). A piece is *settled*
//! once it has no motion in flight.

use crate::easing::Interpolation;
use crate::types::{Coord, PieceColor, SETTLE_EPSILON};

/// Stable identity of a piece for the lifetime of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

/// Visual position in board units (one unit per cell)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        Vec2::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }
}

impl From<Coord> for Vec2 {
    fn from(c: Coord) -> Self {
        Vec2::new(c.x as f32, c.y as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Motion {
    from: Vec2,
    to: Vec2,
    delay_ms: u32,
    elapsed_ms: u32,
    duration_ms: u32,
    curve: Interpolation,
}

/// A single colored piece
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    color: PieceColor,
    x: i32,
    y: i32,
    visual: Vec2,
    motion: Option<Motion>,
}

impl Piece {
    /// Create a piece resting at `at`
    pub fn new(id: PieceId, color: PieceColor, at: Coord) -> Self {
        Self {
            id,
            color,
            x: at.x,
            y: at.y,
            visual: at.into(),
            motion: None,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn color(&self) -> PieceColor {
        self.color
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    pub fn visual(&self) -> Vec2 {
        self.visual
    }

    /// True while a move is in flight (including its start delay)
    pub fn is_animating(&self) -> bool {
        self.motion.is_some()
    }

    /// Motion target if animating, otherwise the resting visual position
    pub fn visual_target(&self) -> Vec2 {
        self.motion.map(|m| m.to).unwrap_or(self.visual)
    }

    pub(crate) fn set_coord(&mut self, at: Coord) {
        self.x = at.x;
        self.y = at.y;
    }

    pub(crate) fn set_color(&mut self, color: PieceColor) {
        self.color = color;
    }

    /// Teleport the visual position, dropping any motion in flight
    pub fn set_visual(&mut self, pos: Vec2) {
        self.visual = pos;
        self.motion = None;
    }

    /// Start animating toward `dest`.
    ///
    /// A move issued mid-flight retargets from the current visual position.
    pub fn move_to(&mut self, dest: Coord, duration_ms: u32, delay_ms: u32, curve: Interpolation) {
        self.motion = Some(Motion {
            from: self.visual,
            to: dest.into(),
            delay_ms,
            elapsed_ms: 0,
            duration_ms,
            curve,
        });
    }

    /// Advance motion by `elapsed_ms`. Returns true if the visual position changed.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let Some(mut motion) = self.motion else {
            return false;
        };

        let mut budget = elapsed_ms;
        if motion.delay_ms > 0 {
            let used = budget.min(motion.delay_ms);
            motion.delay_ms -= used;
            budget -= used;
            if motion.delay_ms > 0 {
                self.motion = Some(motion);
                return false;
            }
        }

        motion.elapsed_ms = motion.elapsed_ms.saturating_add(budget);
        let t = if motion.duration_ms == 0 {
            1.0
        } else {
            motion.elapsed_ms as f32 / motion.duration_ms as f32
        };
        let before = self.visual;
        self.visual = motion.from.lerp(motion.to, motion.curve.apply(t));

        if self.visual.distance(motion.to) < SETTLE_EPSILON {
            self.visual = motion.to;
            self.motion = None;
        } else {
            self.motion = Some(motion);
        }
        self.visual != before
    }

    /// No motion in flight and the visual position sits on the logical slot
    pub fn is_settled(&self) -> bool {
        self.motion.is_none() && self.visual.distance(self.coord().into()) < SETTLE_EPSILON
    }
}

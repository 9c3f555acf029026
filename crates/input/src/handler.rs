//! Keyboard cursor to press/drag/release gestures.
//!
//! A terminal has no pointer, so a cursor stands in for it: `Select` presses
//! the tile under the cursor, and a cursor move while pressed drags onto the
//! neighbor in that direction and releases there.

use arrayvec::ArrayVec;

use crate::types::{Coord, GameAction};

/// Pointer-style events for the board's swap session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    PressStart(Coord),
    DragEnter(Coord),
    Release,
    Cancel,
}

/// Cursor state over a `width × height` board (`y = 0` at the bottom)
#[derive(Debug, Clone)]
pub struct GestureInput {
    cursor: Coord,
    width: i32,
    height: i32,
    pressed: bool,
}

impl GestureInput {
    /// Cursor starts near the board center
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            cursor: Coord::new((width - 1).max(0) / 2, (height - 1).max(0) / 2),
            width,
            height,
            pressed: false,
        }
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Forget a press the board did not accept
    pub fn reset(&mut self) {
        self.pressed = false;
    }

    fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    pub fn handle_action(&mut self, action: GameAction) -> ArrayVec<GestureEvent, 2> {
        let mut out = ArrayVec::new();
        if let Some(dir) = action.cursor_direction() {
            let next = self.cursor.step(dir);
            if !self.in_bounds(next) {
                return out;
            }
            self.cursor = next;
            if self.pressed {
                self.pressed = false;
                out.push(GestureEvent::DragEnter(next));
                out.push(GestureEvent::Release);
            }
            return out;
        }

        match action {
            GameAction::Select if self.pressed => {
                self.pressed = false;
                out.push(GestureEvent::Cancel);
            }
            GameAction::Select => {
                self.pressed = true;
                out.push(GestureEvent::PressStart(self.cursor));
            }
            GameAction::Cancel if self.pressed => {
                self.pressed = false;
                out.push(GestureEvent::Cancel);
            }
            _ => {}
        }
        out
    }
}

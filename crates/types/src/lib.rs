//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board simulation, move analysis, terminal rendering).
//!
//! # Coordinates
//!
//! Boards are addressed with `(x, y)` where `x` grows to the right and `y` grows
//! upward: row `0` is the bottom row, and "above" always means a larger `y`.
//! Gravity pulls pieces toward `y = 0`.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SWAP_MS` | 250 | Duration of a swap (and of its revert) |
//! | `FALL_MS_PER_CELL` | 100 | Collapse/refill travel time per cell of distance |
//! | `CLEAR_DELAY_MS` | 250 | Pause between clearing a match and collapsing |
//! | `SETTLE_DELAY_MS` | 500 | Pause after a pass settles before re-matching |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Direction, PieceColor, GameAction, Coord};
//!
//! let color = PieceColor::from_str("red").unwrap();
//! assert_eq!(color, PieceColor::Red);
//!
//! let up = Direction::Up;
//! assert_eq!(up.opposite(), Direction::Down);
//! assert_eq!(Coord::new(2, 3).step(up), Coord::new(2, 4));
//!
//! assert_eq!(GameAction::from_str("hint"), Some(GameAction::Hint));
//! ```

/// Default board width in cells
pub const DEFAULT_WIDTH: u8 = 8;

/// Default board height in cells
pub const DEFAULT_HEIGHT: u8 = 8;

/// Largest accepted board edge
pub const MAX_BOARD_EDGE: u8 = 64;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Swap animation duration
pub const SWAP_MS: u32 = 250;

/// Travel time per cell when a piece falls into place
pub const FALL_MS_PER_CELL: u32 = 100;

/// Pause after matched pieces are cleared, before columns collapse
pub const CLEAR_DELAY_MS: u32 = 250;

/// Pause after a pass has visually settled, before the next match scan
pub const SETTLE_DELAY_MS: u32 = 500;

/// Rows above the board that refill pieces start from
pub const SPAWN_OFFSET_ROWS: u8 = 10;

/// Minimum run length that counts as a match
pub const MIN_MATCH: usize = 3;

/// Re-roll budget per cell while filling without creating matches
pub const MAX_FILL_RETRIES: u32 = 100;

/// Upper bound on clear/collapse/refill passes per cascade
pub const MAX_CASCADE_PASSES: u32 = 100;

/// Distance under which a moving piece snaps to its target
pub const SETTLE_EPSILON: f32 = 0.01;


/// Piece colors
///
/// Eight plain colors plus the `Wild` joker. Whether `Wild` matches other colors
/// is a board rule, not a property of the color itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    White,
    Wild,
}

impl PieceColor {
    /// The plain colors, in palette order. A palette of size `n` uses the first `n`.
    pub const PALETTE: [PieceColor; 8] = [
        PieceColor::Red,
        PieceColor::Blue,
        PieceColor::Green,
        PieceColor::Yellow,
        PieceColor::Purple,
        PieceColor::Orange,
        PieceColor::Pink,
        PieceColor::White,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::PieceColor;
    ///
    /// assert_eq!(PieceColor::from_str("Blue"), Some(PieceColor::Blue));
    /// assert_eq!(PieceColor::from_str("wild"), Some(PieceColor::Wild));
    /// assert_eq!(PieceColor::from_str("teal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(PieceColor::Red),
            "orange" => Some(PieceColor::Orange),
            "yellow" => Some(PieceColor::Yellow),
            "green" => Some(PieceColor::Green),
            "blue" => Some(PieceColor::Blue),
            "purple" => Some(PieceColor::Purple),
            "pink" => Some(PieceColor::Pink),
            "white" => Some(PieceColor::White),
            "wild" => Some(PieceColor::Wild),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceColor::Red => "red",
            PieceColor::Orange => "orange",
            PieceColor::Yellow => "yellow",
            PieceColor::Green => "green",
            PieceColor::Blue => "blue",
            PieceColor::Purple => "purple",
            PieceColor::Pink => "pink",
            PieceColor::White => "white",
            PieceColor::Wild => "wild",
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, PieceColor::Wild)
    }

    /// Single-character glyph used by ASCII board layouts
    ///
    /// ```
    /// use tui_match3_types::PieceColor;
    ///
    /// assert_eq!(PieceColor::Pink.as_char(), 'K');
    /// assert_eq!(PieceColor::from_char('k'), Some(PieceColor::Pink));
    /// assert_eq!(PieceColor::from_char('*'), Some(PieceColor::Wild));
    /// assert_eq!(PieceColor::from_char('.'), None);
    /// ```
    pub fn as_char(&self) -> char {
        match self {
            PieceColor::Red => 'R',
            PieceColor::Orange => 'O',
            PieceColor::Yellow => 'Y',
            PieceColor::Green => 'G',
            PieceColor::Blue => 'B',
            PieceColor::Purple => 'P',
            PieceColor::Pink => 'K',
            PieceColor::White => 'W',
            PieceColor::Wild => '*',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(PieceColor::Red),
            'O' => Some(PieceColor::Orange),
            'Y' => Some(PieceColor::Yellow),
            'G' => Some(PieceColor::Green),
            'B' => Some(PieceColor::Blue),
            'P' => Some(PieceColor::Purple),
            'K' => Some(PieceColor::Pink),
            'W' => Some(PieceColor::White),
            '*' => Some(PieceColor::Wild),
            _ => None,
        }
    }
}

/// Static per-cell tile type
///
/// - **Normal**: can hold a piece
/// - **Obstacle**: never holds a piece; pieces fall past it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileKind {
    #[default]
    Normal,
    Obstacle,
}

/// The four axis directions used by run searches and gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step `(dx, dy)` for this direction (`Up` is `+y`)
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction of an arbitrary step, clamped to one cell along one axis.
    ///
    /// Returns `None` for a zero step or a diagonal one.
    ///
    /// ```
    /// use tui_match3_types::Direction;
    ///
    /// assert_eq!(Direction::from_delta(5, 0), Some(Direction::Right));
    /// assert_eq!(Direction::from_delta(0, -3), Some(Direction::Down));
    /// assert_eq!(Direction::from_delta(1, 1), None);
    /// assert_eq!(Direction::from_delta(0, 0), None);
    /// ```
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Integer grid coordinate. May lie outside the board; lookups fail soft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbor one cell away in `dir`
    pub fn step(&self, dir: Direction) -> Self {
        self.offset(dir, 1)
    }

    /// Cell `n` steps away in `dir`
    pub fn offset(&self, dir: Direction, n: i32) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx * n, self.y + dy * n)
    }

    /// Manhattan distance is exactly one along a single axis
    pub fn is_adjacent(&self, other: Coord) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Frontend actions
///
/// These are produced by the terminal input layer and consumed by the binary,
/// which turns cursor selections into press/drag/release gesture events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cursor one cell up
    CursorUp,
    /// Move the cursor one cell down
    CursorDown,
    /// Move the cursor one cell left
    CursorLeft,
    /// Move the cursor one cell right
    CursorRight,
    /// Press on the cursor tile, or release if a press is active
    Select,
    /// Abandon the current gesture
    Cancel,
    /// Highlight a swap that would produce a match
    Hint,
    /// Rebuild the board from a fresh fill
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("cursorLeft"), Some(GameAction::CursorLeft));
    /// assert_eq!(GameAction::from_str("select"), Some(GameAction::Select));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "select" => Some(GameAction::Select),
            "cancel" => Some(GameAction::Cancel),
            "hint" => Some(GameAction::Hint),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Select => "select",
            GameAction::Cancel => "cancel",
            GameAction::Hint => "hint",
            GameAction::Restart => "restart",
        }
    }

    /// Cursor direction carried by this action, if any
    pub fn cursor_direction(&self) -> Option<Direction> {
        match self {
            GameAction::CursorUp => Some(Direction::Up),
            GameAction::CursorDown => Some(Direction::Down),
            GameAction::CursorLeft => Some(Direction::Left),
            GameAction::CursorRight => Some(Direction::Right),
            _ => None,
        }
    }
}

//! Board configuration
//!
//! A [`BoardConfig`] is fixed when a board is built. [`BoardConfig::default`]
//! gives an 8×8 board with six colors and the timing constants from
//! [`crate::types`]; `with_*` methods adjust individual fields.

use std::fmt;

use crate::easing::Interpolation;
use crate::matcher::WildRule;
use crate::rng::Palette;
use crate::types::*;

/// Smallest palette that can always avoid a match during fill
pub const MIN_PALETTE: u8 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
    /// Duration of a swap and of its revert
    pub swap_ms: u32,
    /// Collapse travel time per cell fallen
    pub fall_ms_per_cell: u32,
    /// Travel time for refill pieces dropping in from above the board
    pub refill_ms: u32,
    /// How far above their slot refill pieces start
    pub spawn_offset_rows: u8,
    /// Pause between clearing matched pieces and collapsing columns
    pub clear_delay_ms: u32,
    /// Pause after a pass settles, before scanning for new matches
    pub settle_delay_ms: u32,
    pub palette: Palette,
    pub wild_rule: WildRule,
    pub max_fill_retries: u32,
    /// Defensive bound on clear/collapse/refill passes per cascade
    pub max_cascade_passes: u32,
    pub interpolation: Interpolation,
    pub obstacles: Vec<Coord>,
    pub seed: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            swap_ms: SWAP_MS,
            fall_ms_per_cell: FALL_MS_PER_CELL,
            refill_ms: FALL_MS_PER_CELL * 4,
            spawn_offset_rows: SPAWN_OFFSET_ROWS,
            clear_delay_ms: CLEAR_DELAY_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            palette: Palette::default(),
            wild_rule: WildRule::default(),
            max_fill_retries: MAX_FILL_RETRIES,
            max_cascade_passes: MAX_CASCADE_PASSES,
            interpolation: Interpolation::default(),
            obstacles: Vec::new(),
            seed: 1,
        }
    }
}

impl BoardConfig {
    pub fn with_size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_palette(mut self, size: u8, wild: bool) -> Self {
        self.palette = Palette::new(size, wild);
        self
    }

    pub fn with_wild_rule(mut self, rule: WildRule) -> Self {
        self.wild_rule = rule;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_obstacles(mut self, obstacles: Vec<Coord>) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn with_interpolation(mut self, curve: Interpolation) -> Self {
        self.interpolation = curve;
        self
    }

    pub fn with_max_fill_retries(mut self, retries: u32) -> Self {
        self.max_fill_retries = retries;
        self
    }

    pub fn with_max_cascade_passes(mut self, passes: u32) -> Self {
        self.max_cascade_passes = passes;
        self
    }

    /// Zero every delay and duration (moves complete on the next tick)
    pub fn instant(mut self) -> Self {
        self.swap_ms = 0;
        self.fall_ms_per_cell = 0;
        self.refill_ms = 0;
        self.clear_delay_ms = 0;
        self.settle_delay_ms = 0;
        self
    }

    /// Minimum run length (fixed)
    pub fn min_match(&self) -> usize {
        MIN_MATCH
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.width > MAX_BOARD_EDGE || self.height > MAX_BOARD_EDGE {
            return Err(ConfigError::GridTooLarge);
        }
        if self.palette.size < MIN_PALETTE {
            return Err(ConfigError::PaletteTooSmall);
        }
        if self.palette.size as usize > PieceColor::PALETTE.len() {
            return Err(ConfigError::PaletteTooLarge);
        }
        if self.max_cascade_passes == 0 {
            return Err(ConfigError::ZeroCascadeBound);
        }
        let (w, h) = (self.width as i32, self.height as i32);
        if self
            .obstacles
            .iter()
            .any(|c| c.x < 0 || c.y < 0 || c.x >= w || c.y >= h)
        {
            return Err(ConfigError::ObstacleOutOfBounds);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroWidth,
    ZeroHeight,
    GridTooLarge,
    PaletteTooSmall,
    PaletteTooLarge,
    ZeroCascadeBound,
    ObstacleOutOfBounds,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::ZeroWidth | ConfigError::ZeroHeight | ConfigError::GridTooLarge => {
                "invalid_size"
            }
            ConfigError::PaletteTooSmall | ConfigError::PaletteTooLarge => "invalid_palette",
            ConfigError::ZeroCascadeBound => "invalid_bound",
            ConfigError::ObstacleOutOfBounds => "invalid_obstacle",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::ZeroWidth => "board width must be at least 1",
            ConfigError::ZeroHeight => "board height must be at least 1",
            ConfigError::GridTooLarge => "board edges are limited to 64 cells",
            ConfigError::PaletteTooSmall => "palette needs at least 3 colors",
            ConfigError::PaletteTooLarge => "palette has at most 8 plain colors",
            ConfigError::ZeroCascadeBound => "cascade pass bound must be at least 1",
            ConfigError::ObstacleOutOfBounds => "obstacle lies outside the board",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ConfigError {}

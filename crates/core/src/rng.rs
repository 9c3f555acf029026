//! RNG module - seeded color generation
//!
//! The board draws new piece colors from a [`ColorSource`]. The default source,
//! [`PaletteRng`], picks uniformly from the configured [`Palette`] using a small
//! deterministic LCG, so the same seed always produces the same board.

use arrayvec::ArrayVec;

use crate::types::PieceColor;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits: the low bits of a power-of-two LCG cycle with a
    /// short period, so `next_u32() % 4` would repeat every four draws.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Colors available to new pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    /// Number of plain colors, taken in [`PieceColor::PALETTE`] order
    pub size: u8,
    /// Whether `Wild` pieces can be generated
    pub wild: bool,
}

impl Palette {
    pub const fn new(size: u8, wild: bool) -> Self {
        Self { size, wild }
    }

    /// The concrete colors, plain colors first, `Wild` last if enabled.
    ///
    /// `size` is clamped to the number of plain colors.
    pub fn colors(&self) -> ArrayVec<PieceColor, 9> {
        let mut out = ArrayVec::new();
        let n = (self.size as usize).min(PieceColor::PALETTE.len());
        out.extend(PieceColor::PALETTE[..n].iter().copied());
        if self.wild {
            out.push(PieceColor::Wild);
        }
        out
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(6, false)
    }
}

/// Source of colors for newly created pieces
pub trait ColorSource {
    fn pick_color(&mut self) -> PieceColor;
}

impl<C: ColorSource + ?Sized> ColorSource for &mut C {
    fn pick_color(&mut self) -> PieceColor {
        (**self).pick_color()
    }
}

impl<C: ColorSource + ?Sized> ColorSource for Box<C> {
    fn pick_color(&mut self) -> PieceColor {
        (**self).pick_color()
    }
}

/// Uniform palette picker driven by [`SimpleRng`]
#[derive(Debug, Clone)]
pub struct PaletteRng {
    rng: SimpleRng,
    colors: ArrayVec<PieceColor, 9>,
    seed: u32,
}

impl PaletteRng {
    pub fn new(palette: Palette, seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            colors: palette.colors(),
            seed,
        }
    }

    pub fn colors(&self) -> &[PieceColor] {
        &self.colors
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl ColorSource for PaletteRng {
    fn pick_color(&mut self) -> PieceColor {
        if self.colors.is_empty() {
            return PieceColor::Red;
        }
        let i = self.rng.next_range(self.colors.len() as u32) as usize;
        self.colors[i]
    }
}

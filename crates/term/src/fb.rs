//! Framebuffer and style types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale each channel by `num / 256` (used to shade highlights and dim text)
    pub const fn scaled(self, num: u16) -> Self {
        Self {
            r: ((self.r as u16 * num) >> 8) as u8,
            g: ((self.g as u16 * num) >> 8) as u8,
            b: ((self.b as u16 * num) >> 8) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub const fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().into_cell(' ')
    }
}

/// Row-major grid of styled cells, `(0, 0)` at the top-left of the screen.
///
/// Writes outside the buffer are clipped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when it is large enough
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.cells
                .resize(width as usize * height as usize, Cell::default());
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One screen row
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let w = self.width as usize;
        let start = y as usize * w;
        &self.cells[start..start + w]
    }

    /// The characters of row `y` (handy in tests)
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }

    #[inline(always)]
    fn slot(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.slot(x as i32, y as i32).map(|i| self.cells[i])
    }

    /// Set a cell; signed coordinates let callers draw partly off-screen
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.slot(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write `s` from `(x, y)` rightward. Returns the column after the last char.
    pub fn put_str(&mut self, x: i32, y: i32, s: &str, style: CellStyle) -> i32 {
        let mut cx = x;
        for ch in s.chars() {
            self.set(cx, y, style.into_cell(ch));
            cx += 1;
        }
        cx
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u16, h: u16, cell: Cell) {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                self.set(x + dx, y + dy, cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_clip_at_edges() {
        let mut fb = FrameBuffer::new(4, 2);
        let style = CellStyle::default();
        let end = fb.put_str(2, 0, "abcd", style);
        assert_eq!(end, 6);
        assert_eq!(fb.row_text(0), "  ab");
        fb.put_str(-1, 1, "xyz", style);
        assert_eq!(fb.row_text(1), "yz  ");
        fb.set(9, 9, style.into_cell('!'));
        assert!(fb.get(9, 9).is_none());
    }

    #[test]
    fn test_resize_keeps_shape_consistent() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(5, 3);
        assert_eq!(fb.cells().len(), 15);
        assert_eq!(fb.row(2).len(), 5);
        assert!(fb.row(3).is_empty());
    }

    #[test]
    fn test_scaled_rgb() {
        assert_eq!(Rgb::new(200, 100, 0).scaled(128), Rgb::new(100, 50, 0));
        assert_eq!(Rgb::new(255, 255, 255).scaled(256), Rgb::new(255, 255, 255));
    }
}

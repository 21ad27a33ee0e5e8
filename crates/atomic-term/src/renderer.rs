//! Half-block renderer that paints the framebuffer into the terminal grid.

use std::io::{self, Write};

use crossterm::{
    cursor, execute,
    style::{Color as CtColor, SetBackgroundColor, SetForegroundColor},
};

use atomic_core::text::text_size;
use atomic_core::{BufferSurface, Font, Rgb565, Surface};

/// Pixels per cell column. Each cell is one character wide and two
/// half-blocks tall, so a cell covers `scale x 2*scale` pixels.
pub const DEFAULT_SCALE: usize = 4;

const HALF_BLOCK: char = '▀';

/// Maps an 8-bit channel triple to a [`crossterm::style::Color`].
fn ct_color(rgb: (u8, u8, u8)) -> CtColor {
    let (r, g, b) = rgb;
    CtColor::Rgb { r, g, b }
}

/// One composed terminal cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TermCell {
    ch: char,
    fg: (u8, u8, u8),
    bg: (u8, u8, u8),
}

/// A character drawn by [`Surface::text`], kept on top of the pixel grid.
///
/// `x, y, w, h` is the glyph's pixel rectangle; `col, row` the cell it
/// renders in. Consecutive characters anchor to consecutive cells, so
/// terminal text reads contiguously even though the pixel metrics span
/// several cells per glyph.
struct Glyph {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    col: usize,
    row: usize,
    ch: char,
    fg: Rgb565,
}

/// A [`Surface`] that mirrors its framebuffer onto the terminal.
///
/// Pixels are downsampled into upper/lower half-block pairs, one character
/// cell per `scale x 2*scale` block. Text drawn through [`Surface::text`]
/// is kept as a glyph overlay and emitted as real characters instead of
/// scaled pixels; any paint that touches a glyph's rectangle drops it from
/// the overlay. [`present`](Surface::present) diffs against the previous
/// frame and rewrites only the cells that changed.
pub struct TermSurface {
    fb: BufferSurface,
    scale: usize,
    cells_w: usize,
    cells_h: usize,
    glyphs: Vec<Glyph>,
    last: Option<Vec<TermCell>>,
}

impl TermSurface {
    /// Create a surface of `width x height` pixels at the default scale.
    pub fn new(width: usize, height: usize) -> Self {
        let mut surface = Self {
            fb: BufferSurface::new(width, height),
            scale: 0,
            cells_w: 0,
            cells_h: 0,
            glyphs: Vec::new(),
            last: None,
        };
        surface.set_scale(DEFAULT_SCALE);
        surface
    }

    /// Configure how many pixels one cell column covers.
    pub fn with_scale(mut self, scale: usize) -> Self {
        self.set_scale(scale);
        self
    }

    fn set_scale(&mut self, scale: usize) {
        debug_assert!(scale >= 1);
        self.scale = scale.max(1);
        self.cells_w = self.fb.buffer().width() / self.scale;
        self.cells_h = self.fb.buffer().height() / (self.scale * 2);
        self.last = None;
    }

    /// Terminal columns and rows one frame occupies.
    pub fn cell_size(&self) -> (usize, usize) {
        (self.cells_w, self.cells_h)
    }

    /// Drop overlay glyphs whose rectangle intersects `x, y, w, h`.
    fn invalidate(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.glyphs
            .retain(|g| g.x + g.w <= x || x + w <= g.x || g.y + g.h <= y || y + h <= g.y);
    }

    fn avg_block(&self, x0: usize, y0: usize, w: usize, h: usize) -> (u8, u8, u8) {
        let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                let c = self.fb.read_pixel(x as i32, y as i32);
                r += c.r8() as u32;
                g += c.g8() as u32;
                b += c.b8() as u32;
            }
        }
        let n = (w * h) as u32;
        ((r / n) as u8, (g / n) as u8, (b / n) as u8)
    }

    fn compose(&self) -> Vec<TermCell> {
        let mut cells = Vec::with_capacity(self.cells_w * self.cells_h);
        for row in 0..self.cells_h {
            for col in 0..self.cells_w {
                let x0 = col * self.scale;
                let y0 = row * self.scale * 2;
                match self.glyphs.iter().find(|g| g.col == col && g.row == row) {
                    Some(g) => {
                        let bg = self.avg_block(x0, y0, self.scale, self.scale * 2);
                        cells.push(TermCell {
                            ch: g.ch,
                            fg: (g.fg.r8(), g.fg.g8(), g.fg.b8()),
                            bg,
                        });
                    }
                    None => {
                        let fg = self.avg_block(x0, y0, self.scale, self.scale);
                        let bg = self.avg_block(x0, y0 + self.scale, self.scale, self.scale);
                        cells.push(TermCell { ch: HALF_BLOCK, fg, bg });
                    }
                }
            }
        }
        cells
    }
}

impl Surface for TermSurface {
    fn width(&self) -> i32 {
        self.fb.width()
    }

    fn height(&self) -> i32 {
        self.fb.height()
    }

    fn fill(&mut self, color: Rgb565) {
        self.glyphs.clear();
        self.fb.fill(color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        self.invalidate(x, y, w, h);
        self.fb.fill_rect(x, y, w, h, color);
    }

    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        self.invalidate(x, y, w, 1);
        self.invalidate(x, y + h - 1, w, 1);
        self.invalidate(x, y, 1, h);
        self.invalidate(x + w - 1, y, 1, h);
        self.fb.rect(x, y, w, h, color);
    }

    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb565) {
        self.invalidate(
            x1.min(x2),
            y1.min(y2),
            (x1 - x2).abs() + 1,
            (y1 - y2).abs() + 1,
        );
        self.fb.line(x1, y1, x2, y2, color);
    }

    fn blit_buffer(&mut self, bytes: &[u8], x: i32, y: i32, w: i32, h: i32) {
        self.invalidate(x, y, w, h);
        self.fb.blit_buffer(bytes, x, y, w, h);
    }

    fn text(&mut self, font: Font, msg: &str, x: i32, y: i32, fg: Rgb565, bg: Option<Rgb565>) {
        let (w, h) = text_size(font, msg);
        self.invalidate(x, y, w, h);
        self.fb.text(font, msg, x, y, fg, bg);

        let row = y.div_euclid(self.scale as i32 * 2);
        if row < 0 || row as usize >= self.cells_h {
            return;
        }
        let start_col = x.div_euclid(self.scale as i32);
        for (i, ch) in msg.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let col = start_col + i as i32;
            if col < 0 || col as usize >= self.cells_w {
                continue;
            }
            let (col, row) = (col as usize, row as usize);
            self.glyphs.retain(|g| g.col != col || g.row != row);
            self.glyphs.push(Glyph {
                x: x + i as i32 * font.width,
                y,
                w: font.width,
                h: font.height,
                col,
                row,
                ch,
                fg,
            });
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let cells = self.compose();
        let mut stdout = io::stdout();
        for (i, cell) in cells.iter().enumerate() {
            if let Some(prev) = &self.last {
                if prev[i] == *cell {
                    continue;
                }
            }
            execute!(
                stdout,
                cursor::MoveTo((i % self.cells_w) as u16, (i / self.cells_w) as u16)
            )?;
            execute!(
                stdout,
                SetForegroundColor(ct_color(cell.fg)),
                SetBackgroundColor(ct_color(cell.bg))
            )?;
            write!(stdout, "{}", cell.ch)?;
        }
        stdout.flush()?;
        self.last = Some(cells);
        Ok(())
    }
}

//! The display collaborator and an in-memory reference implementation.

use std::io;

use crate::color::Rgb565;
use crate::fb::FrameBuffer;
use crate::font::Font;
use crate::text::{justified_origin, text_size};

// ---------------------------------------------------------------------------
// Surface trait
// ---------------------------------------------------------------------------

/// A drawing target with the handheld display's primitive set.
///
/// Coordinates are in pixels with `(0, 0)` at the top-left. Draw calls take
/// effect immediately in the surface's backing store; [`present`](Surface::present)
/// pushes the finished frame to wherever the surface displays it, and is a
/// no-op for surfaces with no transport.
pub trait Surface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    /// Set every pixel to `color`.
    fn fill(&mut self, color: Rgb565);

    /// Fill the `w x h` rectangle whose top-left corner is `(x, y)`.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565);

    /// Draw a one-pixel rectangle outline.
    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565);

    /// Draw a one-pixel line from `(x1, y1)` to `(x2, y2)`.
    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb565);

    /// Copy a `w x h` big-endian pixel buffer with its top-left corner at
    /// `(x, y)`. `bytes` must hold `w * h` pixels.
    fn blit_buffer(&mut self, bytes: &[u8], x: i32, y: i32, w: i32, h: i32);

    /// Draw one line of text with its top-left corner at `(x, y)`.
    ///
    /// When `bg` is given the glyph-cell background is painted first, so
    /// the text erases what was under it.
    fn text(&mut self, font: Font, msg: &str, x: i32, y: i32, fg: Rgb565, bg: Option<Rgb565>);

    /// Push the frame out.
    fn present(&mut self) -> io::Result<()>;
}

/// Draw one line of text justified around an anchor point.
///
/// `jx`/`jy` are the justification factors of
/// [`justified_origin`](crate::text::justified_origin); `(0.5, 0.0)`
/// centres the text horizontally on `x`.
#[allow(clippy::too_many_arguments)]
pub fn draw_text(
    surface: &mut dyn Surface,
    font: Font,
    msg: &str,
    x: i32,
    y: i32,
    fg: Rgb565,
    bg: Option<Rgb565>,
    jx: f32,
    jy: f32,
) {
    let (w, h) = text_size(font, msg);
    let (ox, oy) = justified_origin(x, y, w, h, jx, jy);
    surface.text(font, msg, ox, oy, fg, bg);
}

// ---------------------------------------------------------------------------
// Buffer surface
// ---------------------------------------------------------------------------

/// A [`Surface`] over an owned [`FrameBuffer`], with every draw clipped to
/// the buffer.
///
/// This is the staging and test surface. Its `text` paints only the
/// glyph-cell background (glyph shapes are a frontend concern), which is
/// exactly what background-erasing text needs.
#[derive(Clone, Debug)]
pub struct BufferSurface {
    fb: FrameBuffer,
}

impl BufferSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self { fb: FrameBuffer::new(width, height) }
    }

    /// The backing buffer.
    #[inline]
    pub fn buffer(&self) -> &FrameBuffer {
        &self.fb
    }

    #[inline]
    pub fn buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    /// Read one pixel; out-of-bounds reads are a bug in the caller.
    #[inline]
    pub fn read_pixel(&self, x: i32, y: i32) -> Rgb565 {
        self.fb.read_pixel(x as usize, y as usize)
    }

    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Rgb565) {
        if x >= 0 && y >= 0 && x < self.width() && y < self.height() {
            self.fb.write_pixel(x as usize, y as usize, color);
        }
    }
}

impl Surface for BufferSurface {
    fn width(&self) -> i32 {
        self.fb.width() as i32
    }

    fn height(&self) -> i32 {
        self.fb.height() as i32
    }

    fn fill(&mut self, color: Rgb565) {
        self.fb.fill(color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width());
        let y1 = (y + h).min(self.height());
        for py in y0..y1 {
            for px in x0..x1 {
                self.fb.write_pixel(px as usize, py as usize, color);
            }
        }
    }

    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w - 1, y, 1, h, color);
    }

    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb565) {
        // Bresenham, all octants.
        let (mut x, mut y) = (x1, y1);
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn blit_buffer(&mut self, bytes: &[u8], x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width());
        let y1 = (y + h).min(self.height());
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let stride = self.fb.width();
        let run = (x1 - x0) as usize * 2;
        for py in y0..y1 {
            let src = ((py - y) as usize * w as usize + (x0 - x) as usize) * 2;
            let dst = (py as usize * stride + x0 as usize) * 2;
            self.fb.bytes_mut()[dst..dst + run].copy_from_slice(&bytes[src..src + run]);
        }
    }

    fn text(&mut self, font: Font, msg: &str, x: i32, y: i32, _fg: Rgb565, bg: Option<Rgb565>) {
        if let Some(bg) = bg {
            let (w, h) = text_size(font, msg);
            self.fill_rect(x, y, w, h, bg);
        }
    }

    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb565 = Rgb565(0xF800);
    const WHITE: Rgb565 = Rgb565(0xFFFF);
    const BLACK: Rgb565 = Rgb565(0x0000);

    #[test]
    fn fill_rect_clips_to_surface() {
        let mut s = BufferSurface::new(4, 4);
        s.fill_rect(-2, -2, 4, 4, WHITE);
        assert_eq!(s.read_pixel(0, 0), WHITE);
        assert_eq!(s.read_pixel(1, 1), WHITE);
        assert_eq!(s.read_pixel(2, 2), BLACK);
        s.fill_rect(3, 3, 10, 10, RED);
        assert_eq!(s.read_pixel(3, 3), RED);
    }

    #[test]
    fn rect_draws_outline_only() {
        let mut s = BufferSurface::new(5, 5);
        s.rect(1, 1, 3, 3, WHITE);
        assert_eq!(s.read_pixel(1, 1), WHITE);
        assert_eq!(s.read_pixel(3, 3), WHITE);
        assert_eq!(s.read_pixel(2, 1), WHITE);
        assert_eq!(s.read_pixel(2, 2), BLACK);
    }

    #[test]
    fn line_connects_endpoints() {
        let mut s = BufferSurface::new(4, 4);
        s.line(0, 0, 3, 3, WHITE);
        for i in 0..4 {
            assert_eq!(s.read_pixel(i, i), WHITE);
        }
        s.line(3, 0, 0, 0, RED);
        for i in 0..4 {
            assert_eq!(s.read_pixel(i, 0), RED);
        }
    }

    #[test]
    fn blit_buffer_clips_negative_origin() {
        let mut src = FrameBuffer::new(2, 2);
        src.fill(WHITE);
        let mut s = BufferSurface::new(4, 4);
        s.blit_buffer(src.bytes(), -1, -1, 2, 2);
        assert_eq!(s.read_pixel(0, 0), WHITE);
        assert_eq!(s.read_pixel(1, 0), BLACK);
        assert_eq!(s.read_pixel(0, 1), BLACK);
    }

    #[test]
    fn text_paints_cell_background() {
        let mut s = BufferSurface::new(40, 20);
        s.fill(RED);
        s.text(Font::SMALL, "hi", 0, 0, WHITE, Some(BLACK));
        assert_eq!(s.read_pixel(0, 0), BLACK);
        assert_eq!(s.read_pixel(15, 15), BLACK);
        assert_eq!(s.read_pixel(16, 0), RED);
        s.text(Font::SMALL, "hi", 0, 0, WHITE, None);
        assert_eq!(s.read_pixel(0, 0), BLACK);
    }

    #[test]
    fn justified_draw_centres_on_anchor() {
        let mut s = BufferSurface::new(64, 32);
        s.fill(WHITE);
        draw_text(&mut s, Font::SMALL, "abcd", 32, 0, BLACK, Some(BLACK), 0.5, 0.0);
        assert_eq!(s.read_pixel(16, 0), BLACK);
        assert_eq!(s.read_pixel(47, 15), BLACK);
        assert_eq!(s.read_pixel(15, 0), WHITE);
        assert_eq!(s.read_pixel(48, 0), WHITE);
    }
}

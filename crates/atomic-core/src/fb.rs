//! Byte-level framebuffer compositing.
//!
//! Every pixel buffer in the engine is a row-major run of big-endian
//! [`Rgb565`] pixels, two bytes each with the high byte first. That is the
//! same layout as the tile file format and the display transport, so tiles
//! blit with straight byte copies and a finished frame streams out without
//! conversion. Strides and coordinates are in pixels, not bytes.
//!
//! The plain blit functions do not bounds-check beyond slice indexing; a
//! destination overrun is a caller contract violation and panics. The
//! `try_` variants pre-validate the destination rectangle and return
//! [`BlitError`] instead, at the cost of a branch per call.

use std::fmt;

use crate::color::Rgb565;

// ---------------------------------------------------------------------------
// Pixel access
// ---------------------------------------------------------------------------

/// Write one pixel at `(x, y)` into a buffer `stride` pixels wide.
#[inline]
pub fn write_pixel(dest: &mut [u8], x: usize, y: usize, color: Rgb565, stride: usize) {
    let at = (y * stride + x) * 2;
    dest[at] = color.hi();
    dest[at + 1] = color.lo();
}

/// Read the pixel at `(x, y)` from a buffer `stride` pixels wide.
#[inline]
pub fn read_pixel(src: &[u8], x: usize, y: usize, stride: usize) -> Rgb565 {
    let at = (y * stride + x) * 2;
    Rgb565(u16::from_be_bytes([src[at], src[at + 1]]))
}

// ---------------------------------------------------------------------------
// Blits
// ---------------------------------------------------------------------------

/// Copy a square tile into `dest` with its top-left corner at
/// `(dest_x, dest_y)`, one row at a time.
pub fn blit_tile(
    tile: &[u8],
    dest: &mut [u8],
    dest_x: usize,
    dest_y: usize,
    tile_width: usize,
    dest_stride: usize,
) {
    let row_bytes = tile_width * 2;
    for row in 0..tile_width {
        let src = row * row_bytes;
        let dst = ((dest_y + row) * dest_stride + dest_x) * 2;
        dest[dst..dst + row_bytes].copy_from_slice(&tile[src..src + row_bytes]);
    }
}

/// Copy a `width x height` sprite into `dest`, skipping every source pixel
/// exactly equal to `key`. With `flip` set, source columns are read right
/// to left, mirroring the sprite horizontally.
#[allow(clippy::too_many_arguments)]
pub fn blit_sprite(
    sprite: &[u8],
    dest: &mut [u8],
    dest_stride: usize,
    dest_x: usize,
    dest_y: usize,
    width: usize,
    height: usize,
    key: Rgb565,
    flip: bool,
) {
    for row in 0..height {
        for col in 0..width {
            let src_col = if flip { width - 1 - col } else { col };
            let px = read_pixel(sprite, src_col, row, width);
            if px == key {
                continue;
            }
            write_pixel(dest, dest_x + col, dest_y + row, px, dest_stride);
        }
    }
}

/// [`blit_tile`] with the destination rectangle validated first.
pub fn try_blit_tile(
    tile: &[u8],
    dest: &mut [u8],
    dest_x: usize,
    dest_y: usize,
    tile_width: usize,
    dest_stride: usize,
) -> Result<(), BlitError> {
    check_dest_rect(dest.len(), dest_stride, dest_x, dest_y, tile_width, tile_width)?;
    blit_tile(tile, dest, dest_x, dest_y, tile_width, dest_stride);
    Ok(())
}

/// [`blit_sprite`] with the destination rectangle validated first.
///
/// The source must still hold `width * height` pixels; that contract stays
/// unchecked.
#[allow(clippy::too_many_arguments)]
pub fn try_blit_sprite(
    sprite: &[u8],
    dest: &mut [u8],
    dest_stride: usize,
    dest_x: usize,
    dest_y: usize,
    width: usize,
    height: usize,
    key: Rgb565,
    flip: bool,
) -> Result<(), BlitError> {
    check_dest_rect(dest.len(), dest_stride, dest_x, dest_y, width, height)?;
    blit_sprite(sprite, dest, dest_stride, dest_x, dest_y, width, height, key, flip);
    Ok(())
}

fn check_dest_rect(
    dest_len: usize,
    stride: usize,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
) -> Result<(), BlitError> {
    let rows = dest_len / (stride * 2);
    if x + w <= stride && y + h <= rows {
        Ok(())
    } else {
        Err(BlitError::OutOfBounds { x, y, w, h, dest_w: stride, dest_h: rows })
    }
}

/// Error from the checked blit variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlitError {
    /// The destination rectangle does not fit inside the buffer.
    OutOfBounds { x: usize, y: usize, w: usize, h: usize, dest_w: usize, dest_h: usize },
}

impl fmt::Display for BlitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlitError::OutOfBounds { x, y, w, h, dest_w, dest_h } => {
                write!(f, "blit of {w}x{h} at ({x}, {y}) exceeds {dest_w}x{dest_h} destination")
            }
        }
    }
}

impl std::error::Error for BlitError {}

// ---------------------------------------------------------------------------
// Owned buffer
// ---------------------------------------------------------------------------

/// An owned pixel buffer, allocated once and reused across frames.
///
/// Games keep one full-screen buffer, or a small staging buffer for
/// composing a sprite over its background tiles before a single push.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    buf: Vec<u8>,
}

impl FrameBuffer {
    /// A zeroed (black) buffer of `width x height` pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, buf: vec![0; width * height * 2] }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw bytes, ready for the display transport.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb565) {
        let (hi, lo) = (color.hi(), color.lo());
        for px in self.buf.chunks_exact_mut(2) {
            px[0] = hi;
            px[1] = lo;
        }
    }

    #[inline]
    pub fn write_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        write_pixel(&mut self.buf, x, y, color, self.width);
    }

    #[inline]
    pub fn read_pixel(&self, x: usize, y: usize) -> Rgb565 {
        read_pixel(&self.buf, x, y, self.width)
    }

    pub fn blit_tile(&mut self, tile: &[u8], dest_x: usize, dest_y: usize, tile_width: usize) {
        blit_tile(tile, &mut self.buf, dest_x, dest_y, tile_width, self.width);
    }

    pub fn blit_sprite(
        &mut self,
        sprite: &[u8],
        dest_x: usize,
        dest_y: usize,
        width: usize,
        height: usize,
        key: Rgb565,
        flip: bool,
    ) {
        blit_sprite(sprite, &mut self.buf, self.width, dest_x, dest_y, width, height, key, flip);
    }

    pub fn try_blit_tile(
        &mut self,
        tile: &[u8],
        dest_x: usize,
        dest_y: usize,
        tile_width: usize,
    ) -> Result<(), BlitError> {
        try_blit_tile(tile, &mut self.buf, dest_x, dest_y, tile_width, self.width)
    }

    pub fn try_blit_sprite(
        &mut self,
        sprite: &[u8],
        dest_x: usize,
        dest_y: usize,
        width: usize,
        height: usize,
        key: Rgb565,
        flip: bool,
    ) -> Result<(), BlitError> {
        try_blit_sprite(sprite, &mut self.buf, self.width, dest_x, dest_y, width, height, key, flip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb565;

    const RED: Rgb565 = Rgb565(0xF800);
    const WHITE: Rgb565 = Rgb565(0xFFFF);
    const BLACK: Rgb565 = Rgb565(0x0000);

    #[test]
    fn pixel_write_is_big_endian() {
        let mut buf = vec![0u8; 4 * 2 * 2];
        write_pixel(&mut buf, 1, 0, RED, 4);
        assert_eq!(&buf[2..4], &[0xF8, 0x00]);
        assert_eq!(read_pixel(&buf, 1, 0, 4), RED);
        assert_eq!(read_pixel(&buf, 0, 0, 4), BLACK);
    }

    #[test]
    fn fill_writes_every_pixel() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.fill(WHITE);
        assert!(fb.bytes().iter().all(|&b| b == 0xFF));
        fb.fill(RED);
        for x in 0..3 {
            for y in 0..2 {
                assert_eq!(fb.read_pixel(x, y), RED);
            }
        }
    }

    #[test]
    fn tile_blit_lands_at_offset() {
        let tile: Vec<u8> = WHITE
            .0
            .to_be_bytes()
            .iter()
            .copied()
            .cycle()
            .take(2 * 2 * 2)
            .collect();
        let mut fb = FrameBuffer::new(4, 4);
        fb.blit_tile(&tile, 2, 1, 2);

        for y in 0..4 {
            for x in 0..4 {
                let want = if (2..4).contains(&x) && (1..3).contains(&y) { WHITE } else { BLACK };
                assert_eq!(fb.read_pixel(x, y), want, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn white_tile_fills_bottom_right_quadrant() {
        let tile = vec![0xFFu8; 512];
        let mut fb = FrameBuffer::new(32, 32);
        fb.blit_tile(&tile, 16, 16, 16);

        for y in 0..32 {
            for x in 0..32 {
                let want = if x >= 16 && y >= 16 { WHITE } else { BLACK };
                assert_eq!(fb.read_pixel(x, y), want, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn sprite_blit_skips_key_pixels() {
        let mut sprite = vec![0u8; 3 * 2];
        write_pixel(&mut sprite, 0, 0, RED, 3);
        write_pixel(&mut sprite, 1, 0, WHITE, 3);
        write_pixel(&mut sprite, 2, 0, Rgb565(0x07E0), 3);

        let mut fb = FrameBuffer::new(3, 1);
        fb.fill(Rgb565(0x1234));
        fb.blit_sprite(&sprite, 0, 0, 3, 1, WHITE, false);

        assert_eq!(fb.read_pixel(0, 0), RED);
        assert_eq!(fb.read_pixel(1, 0), Rgb565(0x1234));
        assert_eq!(fb.read_pixel(2, 0), Rgb565(0x07E0));
    }

    #[test]
    fn sprite_flip_reads_columns_in_reverse() {
        let mut sprite = vec![0u8; 3 * 2];
        write_pixel(&mut sprite, 0, 0, RED, 3);
        write_pixel(&mut sprite, 1, 0, WHITE, 3);
        write_pixel(&mut sprite, 2, 0, Rgb565(0x07E0), 3);

        let mut fb = FrameBuffer::new(3, 1);
        fb.fill(BLACK);
        fb.blit_sprite(&sprite, 0, 0, 3, 1, WHITE, true);

        assert_eq!(fb.read_pixel(0, 0), Rgb565(0x07E0));
        assert_eq!(fb.read_pixel(1, 0), BLACK);
        assert_eq!(fb.read_pixel(2, 0), RED);
    }

    #[test]
    fn checked_blit_accepts_exact_fit() {
        let tile = vec![0xFFu8; 2 * 2 * 2];
        let mut fb = FrameBuffer::new(4, 4);
        assert!(fb.try_blit_tile(&tile, 2, 2, 2).is_ok());
        assert_eq!(fb.read_pixel(3, 3), WHITE);
    }

    #[test]
    fn checked_blit_rejects_overrun_untouched() {
        let tile = vec![0xFFu8; 2 * 2 * 2];
        let mut fb = FrameBuffer::new(4, 4);
        let err = fb.try_blit_tile(&tile, 3, 3, 2).unwrap_err();
        assert!(matches!(err, BlitError::OutOfBounds { .. }));
        assert!(fb.bytes().iter().all(|&b| b == 0));

        let sprite = vec![0u8; 2 * 2 * 2];
        assert!(fb.try_blit_sprite(&sprite, 3, 0, 2, 2, WHITE, false).is_err());
    }
}

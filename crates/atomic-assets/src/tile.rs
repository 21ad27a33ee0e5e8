//! The flat binary tile format.
//!
//! A `.tile` file is nothing but raw big-endian RGB565 pixel bytes, row
//! major. The size is not stored; the caller knows what it is loading.

use std::fs;
use std::io;
use std::path::Path;

use atomic_core::Rgb565;
use atomic_core::fb;

/// An owned tile image: pixel bytes plus the size they were validated
/// against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBuf {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

impl TileBuf {
    /// Wrap raw pixel bytes, checking they hold exactly `width * height`
    /// pixels.
    pub fn from_bytes(bytes: Vec<u8>, width: usize, height: usize) -> io::Result<Self> {
        let want = width * height * 2;
        if bytes.len() != want {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("tile holds {} bytes, expected {want} for {width}x{height}", bytes.len()),
            ));
        }
        Ok(Self { width, height, bytes })
    }

    /// Read a tile file of the given size.
    ///
    /// A file of the wrong length is `InvalidData`. Callers treat any
    /// failure as "nothing to draw", not a crash.
    pub fn load(path: impl AsRef<Path>, width: usize, height: usize) -> io::Result<Self> {
        Self::from_bytes(fs::read(path)?, width, height)
    }

    /// Build a tile by evaluating `f` at every `(x, y)`.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Rgb565,
    ) -> Self {
        let mut bytes = Vec::with_capacity(width * height * 2);
        for y in 0..height {
            for x in 0..width {
                let c = f(x, y);
                bytes.push(c.hi());
                bytes.push(c.lo());
            }
        }
        Self { width, height, bytes }
    }

    /// Write the raw pixel bytes to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, &self.bytes)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb565 {
        fb::read_pixel(&self.bytes, x, y, self.width)
    }
}

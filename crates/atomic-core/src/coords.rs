//! Pixel-to-tile coordinate math and packed transport forms.
//!
//! Tile lookups happen on every frame of every game, and older callers
//! take coordinate bundles packed into a single integer. The packed forms
//! stay because they are a fixed cross-boundary format; everything new
//! should use the plain tuple and [`TileBounds`].

/// The fixed tile edge length used by [`covered_tile_bounds`].
pub const TILE_SIZE: i32 = 16;

// ---------------------------------------------------------------------------
// Tile coordinates
// ---------------------------------------------------------------------------

/// Convert a pixel position to tile-grid coordinates.
///
/// Floor division on both axes: negative pixels floor toward negative
/// infinity, so `(-1, 16)` is on tile `-1`, not tile `0`.
#[inline]
pub const fn pixel_to_tile(x: i32, y: i32, tile_size: i32) -> (i32, i32) {
    (x.div_euclid(tile_size), y.div_euclid(tile_size))
}

/// Pack a tile coordinate pair into one integer, 16 bits per field.
///
/// Fields outside `0..=65535` are a caller contract violation; they are
/// checked in debug builds and masked in release builds.
#[inline]
pub fn pack_tile_coords(tx: i32, ty: i32) -> u32 {
    debug_assert!((0..=0xFFFF).contains(&tx), "tile x {tx} exceeds the packed field");
    debug_assert!((0..=0xFFFF).contains(&ty), "tile y {ty} exceeds the packed field");
    (((ty as u32) & 0xFFFF) << 16) | ((tx as u32) & 0xFFFF)
}

/// Unpack a [`pack_tile_coords`] value back into `(tx, ty)`.
#[inline]
pub const fn unpack_tile_coords(packed: u32) -> (i32, i32) {
    ((packed & 0xFFFF) as i32, (packed >> 16) as i32)
}

/// [`pixel_to_tile`] with the result in the packed transport form.
#[inline]
pub fn pixel_to_tile_packed(x: i32, y: i32, tile_size: i32) -> u32 {
    let (tx, ty) = pixel_to_tile(x, y, tile_size);
    pack_tile_coords(tx, ty)
}

// ---------------------------------------------------------------------------
// Covered bounds
// ---------------------------------------------------------------------------

/// Inclusive tile-index bounding box of a square footprint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileBounds {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl TileBounds {
    /// Pack into one integer, 8 bits per field, `top` in the high byte.
    ///
    /// Fields outside `0..=255` are a caller contract violation (checked in
    /// debug builds, masked in release); maps wider than 255 tiles per axis
    /// cannot use the packed form.
    #[inline]
    pub fn pack(self) -> u32 {
        debug_assert!(
            [self.top, self.bottom, self.left, self.right]
                .iter()
                .all(|f| (0..=0xFF).contains(f)),
            "bounds {self:?} exceed the packed fields",
        );
        (((self.top as u32) & 0xFF) << 24)
            | (((self.bottom as u32) & 0xFF) << 16)
            | (((self.left as u32) & 0xFF) << 8)
            | ((self.right as u32) & 0xFF)
    }

    /// Unpack a [`TileBounds::pack`] value.
    #[inline]
    pub const fn unpack(packed: u32) -> Self {
        Self {
            top: (packed >> 24) as i32,
            bottom: ((packed >> 16) & 0xFF) as i32,
            left: ((packed >> 8) & 0xFF) as i32,
            right: (packed & 0xFF) as i32,
        }
    }

    /// The distinct corner tiles of the footprint, row-major.
    ///
    /// A footprint no larger than a tile can only touch its four corner
    /// tiles, so this is the full overlap set for small movers.
    pub fn corner_tiles(self) -> Vec<(i32, i32)> {
        let mut out = Vec::with_capacity(4);
        for ty in [self.top, self.bottom] {
            for tx in [self.left, self.right] {
                if !out.contains(&(tx, ty)) {
                    out.push((tx, ty));
                }
            }
        }
        out
    }
}

/// Tile bounds covering the square `[x-radius, x+radius) x [y-radius,
/// y+radius)` on the fixed [`TILE_SIZE`] grid.
#[inline]
pub const fn covered_tile_bounds(x: i32, y: i32, radius: i32) -> TileBounds {
    TileBounds {
        top: (y - radius).div_euclid(TILE_SIZE),
        bottom: (y + radius - 1).div_euclid(TILE_SIZE),
        left: (x - radius).div_euclid(TILE_SIZE),
        right: (x + radius - 1).div_euclid(TILE_SIZE),
    }
}

/// [`covered_tile_bounds`] in the packed transport form.
#[inline]
pub fn covered_tile_bounds_packed(x: i32, y: i32, radius: i32) -> u32 {
    covered_tile_bounds(x, y, radius).pack()
}

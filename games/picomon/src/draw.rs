//! Scaled sprite rendering for battle scenes.
//!
//! Battle sprites are the same 16x16 tiles the overworld uses, drawn six
//! times larger as one filled square per source pixel. White is the
//! transparency key everywhere a sprite overlays something.

use atomic_assets::TileBuf;
use atomic_core::color::blend_f32;
use atomic_core::{Rgb565, Surface};

pub(crate) const BLACK: Rgb565 = Rgb565::from_rgb(0, 0, 0);
pub(crate) const WHITE: Rgb565 = Rgb565::from_rgb(255, 255, 255);

/// Battle sprite magnification.
pub(crate) const SCALE: i32 = 6;

/// Weight of the flash colour when a hit lights a sprite up.
const FLASH_WEIGHT: f32 = 0.75;

/// Draw `tile` at `(x, y)` scaled up by [`SCALE`], mirrored when `flip`
/// is set. Background pixels are drawn too; callers clear by redrawing.
pub(crate) fn draw_scaled(screen: &mut dyn Surface, tile: &TileBuf, x: i32, y: i32, flip: bool) {
    for_each_scaled(tile, x, y, flip, |sx, sy, color| {
        screen.fill_rect(sx, sy, SCALE, SCALE, color);
    });
}

/// Redraw `tile` with every opaque pixel blended towards `flash`. White
/// key pixels stay untouched so the flash keeps the sprite's outline.
pub(crate) fn flash_scaled(
    screen: &mut dyn Surface,
    tile: &TileBuf,
    x: i32,
    y: i32,
    flash: Rgb565,
    flip: bool,
) {
    for_each_scaled(tile, x, y, flip, |sx, sy, color| {
        if color == WHITE {
            return;
        }
        screen.fill_rect(sx, sy, SCALE, SCALE, blend_f32(color, flash, FLASH_WEIGHT));
    });
}

fn for_each_scaled(
    tile: &TileBuf,
    x: i32,
    y: i32,
    flip: bool,
    mut plot: impl FnMut(i32, i32, Rgb565),
) {
    let width = tile.width();
    for row in 0..tile.height() {
        for col in 0..width {
            let src_col = if flip { width - 1 - col } else { col };
            let color = tile.pixel(src_col, row);
            plot(x + col as i32 * SCALE, y + row as i32 * SCALE, color);
        }
    }
}

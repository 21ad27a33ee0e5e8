//! Image-to-tileset slicer.
//!
//! Cuts a full big-endian RGB565 image into 16x16 `.tile` files plus a
//! `.tm` index, the preprocessing step that turns exported art into the
//! formats the engine draws from.

use std::fs;
use std::io;
use std::path::Path;

/// Tile edge length the slicer cuts to.
const TILE_W: usize = 16;

/// Base-26 tile id: digits are `a`..`z` with no leading-digit bias, so
/// the sequence runs `a`, `b`, .., `z`, `ba`, `bb`, ..
pub fn tile_id(mut i: usize) -> String {
    let mut s = String::new();
    loop {
        s.insert(0, (b'a' + (i % 26) as u8) as char);
        i /= 26;
        if i == 0 {
            break;
        }
    }
    s
}

/// Cut `data` (a `width x height` image) into 16x16 tiles written under
/// `out_dir`, named `a.tile`, `b.tile`, .. row-major, plus a
/// `<name>.tm` index of space-separated ids, one line per tile row.
///
/// Remainder pixels past the last whole tile on either axis are dropped.
pub fn slice_image(
    data: &[u8],
    width: usize,
    height: usize,
    out_dir: impl AsRef<Path>,
    name: &str,
) -> io::Result<()> {
    if data.len() < width * height * 2 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("image holds {} bytes, expected {} for {width}x{height}", data.len(), width * height * 2),
        ));
    }
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    let cols = width / TILE_W;
    let rows = height / TILE_W;
    let mut lines = Vec::with_capacity(rows);
    let mut count = 0;

    for ty in 0..rows {
        let mut line = Vec::with_capacity(cols);
        for tx in 0..cols {
            let id = tile_id(count);
            count += 1;
            fs::write(out_dir.join(format!("{id}.tile")), cut_tile(data, width, tx, ty))?;
            line.push(id);
        }
        lines.push(line.join(" "));
    }

    fs::write(out_dir.join(format!("{}.tm", name.to_lowercase())), lines.join("\n"))
}

/// The raw bytes of the 16x16 tile at tile coordinates `(tx, ty)`.
fn cut_tile(data: &[u8], width: usize, tx: usize, ty: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(TILE_W * TILE_W * 2);
    for row in 0..TILE_W {
        let py = ty * TILE_W + row;
        let at = (py * width + tx * TILE_W) * 2;
        out.extend_from_slice(&data[at..at + TILE_W * 2]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_run_through_the_alphabet() {
        assert_eq!(tile_id(0), "a");
        assert_eq!(tile_id(1), "b");
        assert_eq!(tile_id(25), "z");
        assert_eq!(tile_id(26), "ba");
        assert_eq!(tile_id(27), "bb");
        assert_eq!(tile_id(51), "bz");
        assert_eq!(tile_id(52), "ca");
    }

    #[test]
    fn cut_tile_extracts_the_right_block() {
        // 32x16 image: left half 0xAAAA, right half 0x5555.
        let mut data = Vec::with_capacity(32 * 16 * 2);
        for _y in 0..16 {
            for x in 0..32 {
                let px: u16 = if x < 16 { 0xAAAA } else { 0x5555 };
                data.extend_from_slice(&px.to_be_bytes());
            }
        }
        let left = cut_tile(&data, 32, 0, 0);
        let right = cut_tile(&data, 32, 1, 0);
        assert_eq!(left.len(), 512);
        assert!(left.chunks(2).all(|c| c == [0xAA, 0xAA]));
        assert!(right.chunks(2).all(|c| c == [0x55, 0x55]));
    }

    #[test]
    fn short_image_is_invalid_data() {
        let err = slice_image(&[0u8; 10], 16, 16, std::env::temp_dir(), "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}

//! Packed 16-bit colour: [`Rgb565`] and blending.

use std::fmt;

// ---------------------------------------------------------------------------
// Rgb565
// ---------------------------------------------------------------------------

/// A colour packed into a `u16`: red 5 bits, green 6 bits, blue 5 bits.
///
/// This is the native pixel format of the display panel and of `.tile`
/// assets, so the exact bit layout matters: converting from 8-bit channels
/// keeps only the top 5/6/5 bits of each.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Construct from 8-bit RGB components. Channels are masked to their
    /// retained bits, never clamped.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self((((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3))
    }

    /// Parse a 6-hex-digit colour string, optionally prefixed with `#`.
    pub fn from_hex(s: &str) -> Result<Self, HexColorError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(HexColorError::InvalidFormat(s.to_string()));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| HexColorError::InvalidFormat(s.to_string()))
        };
        let r = parse(0..2)?;
        let g = parse(2..4)?;
        let b = parse(4..6)?;
        Ok(Self::from_rgb(r, g, b))
    }

    /// Raw 5-bit red field.
    #[inline]
    pub const fn r5(self) -> u16 {
        (self.0 >> 11) & 0x1F
    }

    /// Raw 6-bit green field.
    #[inline]
    pub const fn g6(self) -> u16 {
        (self.0 >> 5) & 0x3F
    }

    /// Raw 5-bit blue field.
    #[inline]
    pub const fn b5(self) -> u16 {
        self.0 & 0x1F
    }

    /// 8-bit red, with the 3 lost low bits zeroed.
    #[inline]
    pub const fn r8(self) -> u8 {
        (self.r5() << 3) as u8
    }

    /// 8-bit green, with the 2 lost low bits zeroed.
    #[inline]
    pub const fn g8(self) -> u8 {
        (self.g6() << 2) as u8
    }

    /// 8-bit blue, with the 3 lost low bits zeroed.
    #[inline]
    pub const fn b8(self) -> u8 {
        (self.b5() << 3) as u8
    }

    /// The high byte of the packed value (sent first on the wire).
    #[inline]
    pub const fn hi(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// The low byte of the packed value.
    #[inline]
    pub const fn lo(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

// ---------------------------------------------------------------------------
// Blending
// ---------------------------------------------------------------------------

/// Blend two packed colours by an integer weight in 0..=255.
///
/// `w8 == 0` yields `a`, `w8 == 255` yields `b`, and blending a colour with
/// itself is exact at every weight. Each channel is mixed at its native
/// field width in integer arithmetic only.
#[inline]
pub const fn blend(a: Rgb565, b: Rgb565, w8: u8) -> Rgb565 {
    let w = w8 as u32;
    let inv = 255 - w;
    let r = (a.r5() as u32 * inv + b.r5() as u32 * w + 127) / 255;
    let g = (a.g6() as u32 * inv + b.g6() as u32 * w + 127) / 255;
    let bl = (a.b5() as u32 * inv + b.b5() as u32 * w + 127) / 255;
    Rgb565(((r as u16) << 11) | ((g as u16) << 5) | bl as u16)
}

/// Floating-point blend: channels are widened to 8 bits, mixed with weight
/// `w` in `[0, 1]`, and repacked.
///
/// Slower than [`blend`] and slightly different in the low bits. One caller
/// prefers its look for sprite flashes; it is not the default path.
pub fn blend_f32(a: Rgb565, b: Rgb565, w: f32) -> Rgb565 {
    let widen = |c5: u16, max: u32| (c5 as u32 * 255 / max) as f32;
    let mix = |x: f32, y: f32| (x * (1.0 - w) + y * w) as u8;
    let r = mix(widen(a.r5(), 31), widen(b.r5(), 31));
    let g = mix(widen(a.g6(), 63), widen(b.g6(), 63));
    let bl = mix(widen(a.b5(), 31), widen(b.b5(), 31));
    Rgb565::from_rgb(r, g, bl)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error parsing a hex colour string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexColorError {
    /// The string is not six hex digits (with an optional `#` prefix).
    InvalidFormat(String),
}

impl fmt::Display for HexColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "invalid hex colour \u{201c}{s}\u{201d}"),
        }
    }
}

impl std::error::Error for HexColorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_layout() {
        assert_eq!(Rgb565::from_rgb(0, 0, 0).0, 0x0000);
        assert_eq!(Rgb565::from_rgb(255, 255, 255).0, 0xFFFF);
        assert_eq!(Rgb565::from_rgb(255, 0, 0).0, 0xF800);
        assert_eq!(Rgb565::from_rgb(0, 255, 0).0, 0x07E0);
        assert_eq!(Rgb565::from_rgb(0, 0, 255).0, 0x001F);
    }

    #[test]
    fn round_trip_masks_low_bits() {
        for &(r, g, b) in &[(0, 0, 0), (255, 255, 255), (1, 2, 3), (215, 215, 215), (0x57, 0xA3, 0xE9)] {
            let c = Rgb565::from_rgb(r, g, b);
            assert_eq!(c.r8(), r & 0xF8);
            assert_eq!(c.g8(), g & 0xFC);
            assert_eq!(c.b8(), b & 0xF8);
        }
    }

    #[test]
    fn hex_parses_with_and_without_hash() {
        assert_eq!(Rgb565::from_hex("#FF0000").unwrap(), Rgb565::from_rgb(255, 0, 0));
        assert_eq!(Rgb565::from_hex("4FBF37").unwrap(), Rgb565::from_rgb(0x4F, 0xBF, 0x37));
        assert_eq!(Rgb565::from_hex("000000").unwrap(), Rgb565(0));
    }

    #[test]
    fn hex_rejects_malformed_input() {
        for bad in ["", "#", "FFF", "#12345", "1234567", "GG0000", "12 456", "#ΩΩΩΩΩΩ"] {
            assert!(Rgb565::from_hex(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn blend_boundary_weights() {
        let a = Rgb565::from_rgb(255, 0, 64);
        let b = Rgb565::from_rgb(0, 255, 128);
        assert_eq!(blend(a, b, 0), a);
        assert_eq!(blend(a, b, 255), b);
    }

    #[test]
    fn blend_self_is_identity_at_every_weight() {
        let c = Rgb565::from_rgb(215, 117, 23);
        for w in 0..=255u16 {
            assert_eq!(blend(c, c, w as u8), c, "w = {w}");
        }
    }

    #[test]
    fn blend_midpoint_lands_between() {
        let a = Rgb565::from_rgb(0, 0, 0);
        let b = Rgb565::from_rgb(255, 255, 255);
        let m = blend(a, b, 128);
        assert!(m.r5() > 0 && m.r5() < 31);
        assert!(m.g6() > 0 && m.g6() < 63);
    }

    #[test]
    fn float_blend_boundaries() {
        let a = Rgb565::from_rgb(255, 0, 0);
        let b = Rgb565::from_rgb(0, 0, 255);
        assert_eq!(blend_f32(a, b, 0.0), Rgb565::from_rgb(a.r8(), a.g8(), a.b8()));
        assert_eq!(blend_f32(a, b, 1.0), Rgb565::from_rgb(b.r8(), b.g8(), b.b8()));
    }
}

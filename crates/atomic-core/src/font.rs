//! Monospaced glyph-cell metrics.

/// A monospaced font, reduced to its glyph cell size.
///
/// Text lays out on a fixed grid of `width x height` pixel cells; the glyph
/// shapes themselves are a frontend concern.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Font {
    pub width: i32,
    pub height: i32,
}

impl Font {
    /// The large 16x32 display font.
    pub const LARGE: Font = Font { width: 16, height: 32 };

    /// The small 8x16 display font.
    pub const SMALL: Font = Font { width: 8, height: 16 };
}

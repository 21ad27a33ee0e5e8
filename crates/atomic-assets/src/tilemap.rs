//! The `.tm` biome text format.

use std::fs;
use std::io;
use std::path::Path;

/// A tile-character grid parsed from a `.tm` file: one row per line, one
/// character per tile column. Lines are trimmed and blank lines skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tilemap {
    rows: Vec<Vec<char>>,
}

impl Tilemap {
    pub fn parse(text: &str) -> Self {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();
        Self { rows }
    }

    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// The tile character at `(tx, ty)`, or `None` outside the map.
    pub fn get(&self, tx: i32, ty: i32) -> Option<char> {
        if tx < 0 || ty < 0 {
            return None;
        }
        self.rows.get(ty as usize)?.get(tx as usize).copied()
    }

    /// Columns in the first row.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: &str = "\
..G
gGr

.c.
";

    #[test]
    fn parse_skips_blank_lines_and_trims() {
        let tm = Tilemap::parse(FIELD);
        assert_eq!(tm.height(), 3);
        assert_eq!(tm.width(), 3);
        assert_eq!(tm.get(2, 0), Some('G'));
        assert_eq!(tm.get(1, 2), Some('c'));
    }

    #[test]
    fn get_is_none_outside_the_map() {
        let tm = Tilemap::parse(FIELD);
        assert_eq!(tm.get(-1, 0), None);
        assert_eq!(tm.get(0, -1), None);
        assert_eq!(tm.get(3, 0), None);
        assert_eq!(tm.get(0, 3), None);
    }

    #[test]
    fn parse_trims_indented_rows() {
        let tm = Tilemap::parse("  .g  \n\t..\t\n");
        assert_eq!(tm.get(1, 0), Some('g'));
        assert_eq!(tm.get(0, 1), Some('.'));
    }
}

//! Tile registry: a directory of `.tile` files keyed by tile character.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::tile::TileBuf;

/// Owned `char -> TileBuf` map for one tileset.
///
/// Each game session builds its own registry from its asset directory;
/// there is no shared tile cache.
#[derive(Debug, Default)]
pub struct TileRegistry {
    tiles: HashMap<char, TileBuf>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `.tile` file in `dir` as a square `tile_size` tile.
    ///
    /// A file keys by its stem with trailing underscores stripped (names
    /// that clash with reserved device names carry a `_` suffix). Stems in
    /// `aliases` map to their alias character; other multi-character stems
    /// and unreadable or short files are logged and skipped.
    pub fn scan_dir(
        dir: impl AsRef<Path>,
        tile_size: usize,
        aliases: &[(&str, char)],
    ) -> io::Result<Self> {
        let mut reg = Self::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("tile") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(key) = key_for_stem(stem, aliases) else {
                log::debug!("ignoring tile with unkeyable name {stem:?}");
                continue;
            };
            match TileBuf::load(&path, tile_size, tile_size) {
                Ok(tile) => {
                    reg.tiles.insert(key, tile);
                }
                Err(err) => {
                    log::warn!("skipping tile {}: {err}", path.display());
                }
            }
        }
        Ok(reg)
    }

    pub fn insert(&mut self, key: char, tile: TileBuf) {
        self.tiles.insert(key, tile);
    }

    pub fn get(&self, key: char) -> Option<&TileBuf> {
        self.tiles.get(&key)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Key for a tile file stem, after stripping trailing underscores and
/// applying `aliases`. Multi-character stems without an alias have no key.
fn key_for_stem(stem: &str, aliases: &[(&str, char)]) -> Option<char> {
    let stem = stem.trim_end_matches('_');
    if let Some(&(_, key)) = aliases.iter().find(|(name, _)| *name == stem) {
        return Some(key);
    }
    let mut chars = stem.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomic_core::Rgb565;

    const ALIASES: &[(&str, char)] = &[("grass", '.')];

    #[test]
    fn stems_key_by_single_char() {
        assert_eq!(key_for_stem("g", ALIASES), Some('g'));
        assert_eq!(key_for_stem("X_", ALIASES), Some('X'));
        assert_eq!(key_for_stem("r__", ALIASES), Some('r'));
    }

    #[test]
    fn aliases_apply_after_stripping() {
        assert_eq!(key_for_stem("grass", ALIASES), Some('.'));
        assert_eq!(key_for_stem("grass_", ALIASES), Some('.'));
    }

    #[test]
    fn unkeyable_stems_have_no_key() {
        assert_eq!(key_for_stem("water", ALIASES), None);
        assert_eq!(key_for_stem("", ALIASES), None);
        assert_eq!(key_for_stem("__", ALIASES), None);
    }

    #[test]
    fn insert_and_get() {
        let mut reg = TileRegistry::new();
        assert!(reg.is_empty());
        reg.insert('.', TileBuf::from_fn(2, 2, |_, _| Rgb565(0x07E0)));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get('.').map(|t| t.pixel(0, 0)), Some(Rgb565(0x07E0)));
        assert!(reg.get('g').is_none());
    }
}

//! Game assets: the biome map, terrain tiles, and creature sprites.
//!
//! Everything is generated and written into the game's library directory
//! on first boot, then read back through the shared asset formats like
//! any hand-drawn set would be. Sprites use white as the transparency
//! key, so their artwork leaves a white margin.

use std::collections::HashMap;
use std::path::Path;
use std::{fs, io};

use atomic_assets::{TileBuf, TileRegistry, Tilemap};
use atomic_core::Rgb565;
use atomic_core::color::blend;

use crate::data::{Element, SPECIES, Species};
use crate::draw::{BLACK, WHITE};

/// Terrain and sprite edge length in pixels.
pub(crate) const TILE_PX: usize = 16;

/// Base field colour, shared with the overworld staging buffer.
pub(crate) const GRASS: Rgb565 = Rgb565::from_rgb(111, 191, 79);

/// File stems that map to an alias character instead of their own stem.
const TILE_ALIASES: &[(&str, char)] = &[("grass", '.')];

/// The overworld biome, one character per tile.
const FIELD_MAP: &str = "\
...............
..ggg......rrr.
.gGGg.....rr...
..gg.......r...
...............
......ccc......
......cXc......
......ccc......
...............
.gg.......ggg..
.gGg......gGGg.
.ggg.......gg..
...............
...............
...............
";

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Everything the overworld and battles draw from.
pub(crate) struct Assets {
    pub tiles: TileRegistry,
    pub map: Tilemap,
    pub player: TileBuf,
    sprites: HashMap<&'static str, TileBuf>,
}

impl Assets {
    pub fn load(dir: &Path) -> io::Result<Self> {
        let root = dir.join("assets");
        let tiles = TileRegistry::scan_dir(root.join("tiles"), TILE_PX, TILE_ALIASES)?;
        let map = Tilemap::load(root.join("tilemaps").join("field.tm"))?;
        let player = TileBuf::load(root.join("other").join("player.tile"), TILE_PX, TILE_PX)?;
        let mut sprites = HashMap::new();
        for species in &SPECIES {
            let file = format!("{}.tile", species.name.to_lowercase());
            match TileBuf::load(root.join("picomon").join(&file), TILE_PX, TILE_PX) {
                Ok(tile) => {
                    sprites.insert(species.name, tile);
                }
                Err(err) => log::warn!("no sprite for {}: {err}", species.name),
            }
        }
        Ok(Self { tiles, map, player, sprites })
    }

    /// Battle sprite for a species, if its art loaded.
    pub fn sprite(&self, name: &str) -> Option<&TileBuf> {
        self.sprites.get(name)
    }
}

/// Write the full asset set on first boot. A present `assets/` directory
/// is left untouched, so edited art survives.
pub(crate) fn install(dir: &Path) -> io::Result<()> {
    let root = dir.join("assets");
    if root.is_dir() {
        return Ok(());
    }
    log::info!("first boot, writing assets under {}", root.display());
    let tiles = root.join("tiles");
    let maps = root.join("tilemaps");
    let sprites = root.join("picomon");
    let other = root.join("other");
    for d in [&tiles, &maps, &sprites, &other] {
        fs::create_dir_all(d)?;
    }
    fs::write(maps.join("field.tm"), FIELD_MAP)?;
    for (_, file, tile) in terrain_tiles() {
        tile.save(tiles.join(file))?;
    }
    player_sprite().save(other.join("player.tile"))?;
    for species in &SPECIES {
        let file = format!("{}.tile", species.name.to_lowercase());
        creature_sprite(species).save(sprites.join(file))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Art
// ---------------------------------------------------------------------------

/// Terrain art, keyed by map character. File stems follow the registry
/// rules: `G_` sidesteps case-folding filesystems, `grass` is aliased.
fn terrain_tiles() -> [(char, &'static str, TileBuf); 6] {
    let blade = Rgb565::from_rgb(79, 159, 55);
    let deep = Rgb565::from_rgb(55, 127, 39);
    let stone = Rgb565::from_rgb(151, 151, 151);
    let rock = Rgb565::from_rgb(71, 63, 55);
    let crack = Rgb565::from_rgb(39, 35, 31);
    let void = Rgb565::from_rgb(23, 15, 31);
    let px = |f: fn(usize, usize) -> bool, a: Rgb565, b: Rgb565| {
        TileBuf::from_fn(TILE_PX, TILE_PX, move |x, y| if f(x, y) { a } else { b })
    };
    [
        ('.', "grass.tile", px(|x, y| (x * 7 + y * 13) % 23 == 0, blade, GRASS)),
        ('g', "g.tile", px(|x, y| x % 5 == 2 && y % 4 != 0, blade, GRASS)),
        ('G', "G_.tile", px(|x, y| (x * 3 + y * 5) % 11 < 4, deep, blade)),
        ('r', "r.tile", px(|x, y| (x / 4 + y / 4) % 3 == 0, stone, GRASS)),
        ('c', "c.tile", px(|x, y| (x * 5 + y * 7) % 13 == 0, crack, rock)),
        ('X', "X.tile", px(|x, y| (x + y) % 7 == 0, Element::Dark.colour(), void)),
    ]
}

fn player_sprite() -> TileBuf {
    let hair = Rgb565::from_rgb(63, 39, 23);
    let skin = Rgb565::from_rgb(239, 199, 159);
    let shirt = Rgb565::from_rgb(207, 63, 47);
    let legs = Rgb565::from_rgb(47, 63, 127);
    TileBuf::from_fn(TILE_PX, TILE_PX, |x, y| match y {
        1..=3 if (5..=10).contains(&x) => hair,
        5 if x == 6 || x == 9 => BLACK,
        4..=6 if (5..=10).contains(&x) => skin,
        7..=11 if (4..=11).contains(&x) => shirt,
        12..=14 if (5..=6).contains(&x) || (9..=10).contains(&x) => legs,
        _ => WHITE,
    })
}

/// A species' battle and capture sprite: a lumpy body blob in its element
/// colour with a couple of eyes, shaped by a name-derived seed so each
/// species reads differently at a glance.
fn creature_sprite(species: &Species) -> TileBuf {
    let body = species.element.colour();
    let shade = blend(body, BLACK, 96);
    let glow = blend(body, WHITE, 80);
    let seed: u32 = species.name.bytes().map(u32::from).sum();
    // Girth keeps same-element species apart even when their wobble
    // phases coincide.
    let girth = (seed % 3) as i32 * 8;
    TileBuf::from_fn(TILE_PX, TILE_PX, move |x, y| {
        let dx = x as i32 - 8;
        let dy = y as i32 - 9;
        let wobble = ((x as u32 * 31 + y as u32 * 17 + seed) % 5) as i32;
        if dx * dx * 2 + dy * dy * 3 >= 110 + girth + wobble * 10 {
            return WHITE;
        }
        if y == 6 && (x == 5 || x == 10) {
            return BLACK;
        }
        match wobble {
            0 => shade,
            4 => glow,
            _ => body,
        }
    })
}

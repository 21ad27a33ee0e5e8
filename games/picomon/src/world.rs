//! The overworld: tile rendering, player movement, wild encounters.

use std::io;
use std::time::Duration;

use rand::Rng;

use atomic_assets::Tilemap;
use atomic_core::{Button, ButtonPad, Console, FrameBuffer, Surface, TILE_SIZE, pixel_to_tile};

use crate::assets::{Assets, GRASS, TILE_PX};
use crate::data::species_by_name;
use crate::party::Pico;
use crate::rules::{choose_wild_species, wild_level};

/// Map edge in tiles; the biome fills the 240x240 screen exactly.
const MAP_TILES: i32 = 15;

/// Pixel position where a new game starts.
pub(crate) const START: (i32, i32) = (88, 216);

const SPEED: i32 = 1;
const MAX_POS: i32 = 240;

/// Delay per tile during the post-battle map reveal.
const REVEAL_STEP: Duration = Duration::from_millis(10);

/// Encounter odds and element weights for a terrain character.
///
/// Weights line up with [`Element::WILD`](crate::data::Element::WILD);
/// the boss tile forces an encounter with no wild element at all.
pub(crate) fn tile_odds(tile: char) -> Option<(f64, [f64; 4])> {
    match tile {
        '.' => Some((0.001, [1.0, 1.0, 1.0, 1.0])),
        'g' => Some((0.01, [1.0, 1.0, 1.0, 1.0])),
        'G' => Some((0.025, [1.0, 1.0, 1.0, 1.0])),
        'r' => Some((0.05, [1.0, 1.0, 1.0, 1.0])),
        'c' => Some((0.001, [1.0, 1.0, 1.0, 1.0])),
        'X' => Some((1.0, [0.0; 4])),
        _ => None,
    }
}

/// Player position plus the staging buffer used to composite the sprite
/// over its background tiles in one push.
pub(crate) struct World {
    pub x: i32,
    pub y: i32,
    staging: FrameBuffer,
    anchor: Option<(i32, i32)>,
}

impl World {
    pub fn new() -> Self {
        let (x, y) = START;
        Self { x, y, staging: FrameBuffer::new(TILE_PX * 2, TILE_PX * 2), anchor: None }
    }

    /// Apply held directions, one pixel each, clamped to the field.
    /// Opposite holds cancel; diagonals move both axes. True if the
    /// position changed.
    pub fn step(&mut self, pad: &dyn ButtonPad) -> bool {
        let (mut x, mut y) = (self.x, self.y);
        if pad.pressed(Button::Left) {
            x -= SPEED;
        }
        if pad.pressed(Button::Right) {
            x += SPEED;
        }
        if pad.pressed(Button::Up) {
            y -= SPEED;
        }
        if pad.pressed(Button::Down) {
            y += SPEED;
        }
        x = x.clamp(0, MAX_POS);
        y = y.clamp(0, MAX_POS);
        let moved = (x, y) != (self.x, self.y);
        self.x = x;
        self.y = y;
        moved
    }

    pub fn draw_map(&self, screen: &mut dyn Surface, assets: &Assets) {
        for ty in 0..MAP_TILES {
            for tx in 0..MAP_TILES {
                draw_tile(screen, assets, tx, ty);
            }
        }
    }

    /// Redraw the map one tile at a time, presenting as it goes. Used
    /// coming back from a battle so the field wipes back in.
    pub fn reveal_map(&self, con: &mut Console<'_>, assets: &Assets) -> io::Result<()> {
        for ty in 0..MAP_TILES {
            for tx in 0..MAP_TILES {
                draw_tile(con.screen, assets, tx, ty);
                con.screen.present()?;
                con.delay(REVEAL_STEP);
            }
        }
        Ok(())
    }

    /// Composite the player over the up-to-four tiles it covers and push
    /// the block in one blit. When the block anchor moves to a new tile,
    /// the previously covered tiles are repainted first so no sprite
    /// trail is left behind.
    pub fn draw_player(&mut self, screen: &mut dyn Surface, assets: &Assets) {
        let ox = self.x % TILE_SIZE;
        let oy = self.y % TILE_SIZE;
        let anchor = (self.x - ox, self.y - oy);
        if let Some(old) = self.anchor {
            if old != anchor {
                repaint_block(screen, assets, old);
            }
        }
        self.anchor = Some(anchor);

        self.staging.fill(GRASS);
        let (atx, aty) = pixel_to_tile(anchor.0, anchor.1, TILE_SIZE);
        for dy in 0..2 {
            for dx in 0..2 {
                if let Some(tile) =
                    assets.map.get(atx + dx, aty + dy).and_then(|ch| assets.tiles.get(ch))
                {
                    self.staging.blit_tile(
                        tile.bytes(),
                        dx as usize * TILE_PX,
                        dy as usize * TILE_PX,
                        TILE_PX,
                    );
                }
            }
        }
        self.staging.blit_sprite(
            assets.player.bytes(),
            ox as usize,
            oy as usize,
            TILE_PX,
            TILE_PX,
            crate::draw::WHITE,
            false,
        );
        screen.blit_buffer(
            self.staging.bytes(),
            anchor.0,
            anchor.1,
            TILE_PX as i32 * 2,
            TILE_PX as i32 * 2,
        );
    }

    /// Roll for a wild encounter on the tile under the player. `None`
    /// most of the time; the boss tile always yields its keeper.
    pub fn roll_encounter(
        &self,
        rng: &mut impl Rng,
        map: &Tilemap,
        team_len: usize,
    ) -> Option<Vec<Pico>> {
        let (tx, ty) = pixel_to_tile(self.x, self.y, TILE_SIZE);
        let tile = map.get(tx, ty)?;
        let (chance, weights) = tile_odds(tile)?;
        if rng.random::<f64>() > chance {
            return None;
        }
        if tile == 'X' {
            return Some(vec![Pico::new(species_by_name("Poulter")?, 20)]);
        }
        let mut count = 1;
        while count < 4 && rng.random_range(1..=3) == 1 {
            count += 1;
        }
        let mut pack = Vec::with_capacity(count);
        for _ in 0..count {
            let species = choose_wild_species(rng, &weights);
            pack.push(Pico::new(species, wild_level(rng, team_len)));
        }
        Some(pack)
    }
}

fn draw_tile(screen: &mut dyn Surface, assets: &Assets, tx: i32, ty: i32) {
    let Some(tile) = assets.map.get(tx, ty).and_then(|ch| assets.tiles.get(ch)) else {
        return;
    };
    screen.blit_buffer(
        tile.bytes(),
        tx * TILE_SIZE,
        ty * TILE_SIZE,
        TILE_SIZE,
        TILE_SIZE,
    );
}

fn repaint_block(screen: &mut dyn Surface, assets: &Assets, anchor: (i32, i32)) {
    let (atx, aty) = pixel_to_tile(anchor.0, anchor.1, TILE_SIZE);
    for dy in 0..2 {
        for dx in 0..2 {
            draw_tile(screen, assets, atx + dx, aty + dy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    struct HeldPad(Vec<Button>);

    impl ButtonPad for HeldPad {
        fn poll(&mut self) {}

        fn read(&self, button: Button) -> bool {
            !self.0.contains(&button)
        }
    }

    fn flat_map(tile: char) -> Tilemap {
        let row: String = std::iter::repeat_n(tile, 15).collect();
        let text: String = (0..15).map(|_| format!("{row}\n")).collect();
        Tilemap::parse(&text)
    }

    #[test]
    fn held_directions_combine_and_clamp() {
        let mut world = World::new();
        world.step(&HeldPad(vec![Button::Right, Button::Down]));
        assert_eq!((world.x, world.y), (89, 217));

        world.x = 0;
        world.y = 0;
        let moved = world.step(&HeldPad(vec![Button::Left, Button::Up]));
        assert!(!moved);
        assert_eq!((world.x, world.y), (0, 0));

        world.x = MAX_POS;
        assert!(!world.step(&HeldPad(vec![Button::Right])));
    }

    #[test]
    fn opposite_directions_cancel() {
        let mut world = World::new();
        assert!(!world.step(&HeldPad(vec![Button::Left, Button::Right])));
        assert_eq!((world.x, world.y), START);
    }

    #[test]
    fn unknown_terrain_never_spawns() {
        assert!(tile_odds('?').is_none());
        let mut rng = SmallRng::seed_from_u64(1);
        let world = World::new();
        assert!(world.roll_encounter(&mut rng, &flat_map('?'), 1).is_none());
    }

    #[test]
    fn the_boss_tile_always_spawns_its_keeper() {
        let mut rng = SmallRng::seed_from_u64(2);
        let world = World::new();
        for _ in 0..20 {
            let pack = world.roll_encounter(&mut rng, &flat_map('X'), 1).unwrap();
            assert_eq!(pack.len(), 1);
            assert_eq!(pack[0].species.name, "Poulter");
            assert_eq!(pack[0].level, 20);
        }
    }

    #[test]
    fn wild_packs_hold_one_to_four() {
        let mut rng = SmallRng::seed_from_u64(3);
        let world = World::new();
        let mut seen_multi = false;
        let mut rolls = 0;
        while rolls < 400 {
            if let Some(pack) = world.roll_encounter(&mut rng, &flat_map('r'), 1) {
                assert!((1..=4).contains(&pack.len()));
                seen_multi |= pack.len() > 1;
                rolls += 1;
            }
        }
        assert!(seen_multi);
    }

    #[test]
    fn off_map_positions_never_spawn() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut world = World::new();
        world.x = MAX_POS;
        world.y = MAX_POS;
        assert!(world.roll_encounter(&mut rng, &flat_map('X'), 1).is_none());
    }
}

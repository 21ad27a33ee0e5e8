//! Boot, title card, and the overworld session.

use std::error::Error;
use std::io;
use std::path::Path;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use atomic_assets::GameInfo;
use atomic_core::{Button, ButtonPad, Console, Font, draw_text};
use atomic_session::FramePacer;

use crate::assets::{self, Assets};
use crate::battle::{self, BattleEnd};
use crate::data::{BASE_LEVEL, species_by_name};
use crate::draw::{BLACK, WHITE};
use crate::party::{Party, Pico};
use crate::world::World;

const FPS: u32 = 60;
const POLL: Duration = Duration::from_millis(10);

/// Starter species on the face buttons.
const STARTER_SELECT: [(Button, &str); 4] = [
    (Button::A, "Embash"),
    (Button::B, "Hissnake"),
    (Button::X, "Bulbomb"),
    (Button::Y, "Belugas"),
];

/// Starter level granted when Center is held during the pick.
const BOOST_LEVEL: i32 = 12;

pub(crate) fn run(con: &mut Console<'_>, dir: &Path) -> Result<(), Box<dyn Error>> {
    let version = GameInfo::load(dir)
        .map(|info| format!("v{}", info.version))
        .unwrap_or_default();
    assets::install(dir)?;
    let assets = Assets::load(dir)?;
    let mut rng = SmallRng::from_os_rng();

    let Some(starter) = title(con, &version)? else {
        return Ok(());
    };
    log::info!("starting out with {} at level {}", starter.species.name, starter.level);
    let mut party = Party::new();
    party.add(starter);

    let mut world = World::new();
    world.draw_map(con.screen, &assets);
    world.draw_player(con.screen, &assets);
    con.screen.present()?;

    let mut pacer = FramePacer::new(FPS);
    loop {
        pacer.start_frame();
        con.pad.poll();
        if con.pad.quit_requested() {
            return Ok(());
        }
        if world.step(con.pad) {
            world.draw_player(con.screen, &assets);
        }
        if direction_held(con.pad) {
            if let Some(pack) = world.roll_encounter(&mut rng, &assets.map, party.len()) {
                log::info!("ambushed by {} wild picomon", pack.len());
                if battle::run(con, &assets, &mut party, pack, &mut rng)? == BattleEnd::Quit {
                    return Ok(());
                }
                world.reveal_map(con, &assets)?;
                world.draw_player(con.screen, &assets);
            }
        }
        con.screen.present()?;
        pacer.finish_frame();
    }
}

fn direction_held(pad: &dyn ButtonPad) -> bool {
    [Button::Up, Button::Down, Button::Left, Button::Right]
        .into_iter()
        .any(|b| pad.pressed(b))
}

/// Title card and starter pick. Holding Center while choosing raises the
/// starter's level. `None` when the user quits at the title.
fn title(con: &mut Console<'_>, version: &str) -> io::Result<Option<Pico>> {
    con.screen.fill(BLACK);
    draw_text(con.screen, Font::SMALL, version, 5, 5, WHITE, Some(BLACK), 0.0, 0.0);
    draw_text(con.screen, Font::LARGE, "Picomon", 120, 110, WHITE, Some(BLACK), 0.5, 0.5);
    draw_text(con.screen, Font::SMALL, "Press A to Start", 120, 148, WHITE, Some(BLACK), 0.5, 0.5);
    draw_text(con.screen, Font::SMALL, "by Henry Gurney", 120, 235, WHITE, Some(BLACK), 0.5, 1.0);
    con.screen.present()?;
    loop {
        con.pad.poll();
        if con.pad.quit_requested() {
            return Ok(None);
        }
        for (button, name) in STARTER_SELECT {
            if !con.pad.pressed(button) {
                continue;
            }
            let Some(species) = species_by_name(name) else {
                continue;
            };
            let level =
                if con.pad.pressed(Button::Center) { BOOST_LEVEL } else { BASE_LEVEL };
            con.wait_release(button);
            return Ok(Some(Pico::new(species, level)));
        }
        con.delay(POLL);
    }
}

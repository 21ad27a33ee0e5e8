//! **watt-seconds** — idle power-grid tycoon for the atomic handheld.
//!
//! The grid is gone and electricity sells for a dollar per watt-second.
//! Crank a hand crank, buy generators up to the Large Nuclear Reactor,
//! then prestige the run away for perk points.

mod economy;
mod format;
mod game;
mod perks;
mod state;
mod ui;

use std::error::Error;
use std::path::Path;

use atomic_core::{Console, Game};

pub use economy::{CATALOG, Family, GenDef, Generator, UpgradeDef};
pub use perks::{Perk, PerkSet};

/// Menu metadata seeded into the library on first boot.
pub const INFO: &str = r#"{
    "title": "Watt Seconds",
    "description": "Build an energy empire one watt at a time",
    "version": "1.5",
    "reqAtomic": "1.1",
    "priority": 1
}
"#;

/// The game entry point.
#[derive(Default)]
pub struct WattSeconds;

impl WattSeconds {
    pub fn new() -> Self {
        Self
    }
}

impl Game for WattSeconds {
    fn run(&mut self, con: &mut Console<'_>, dir: &Path) -> Result<(), Box<dyn Error>> {
        game::run(con, dir)
    }
}

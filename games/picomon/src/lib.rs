//! **picomon** — creature catching and battling for the atomic handheld.
//!
//! Roam a tiled overworld, trigger wild encounters, and fight with a
//! team of up to four elemental creatures. Moves follow a five-element
//! chart; beaten or caught, every battle ends with the team healed.

mod assets;
mod battle;
mod data;
mod draw;
mod game;
mod party;
mod rules;
mod world;

use std::error::Error;
use std::path::Path;

use atomic_core::{Console, Game};

pub use data::{Element, MOVES, MoveDef, SPECIES, Species, power_rating, type_multiplier};
pub use party::{Party, Pico};

/// Menu metadata seeded into the library on first boot.
pub const INFO: &str = r#"{
    "title": "Picomon",
    "description": "Catch and battle wild Picomon",
    "version": "1.7",
    "reqAtomic": "1.2",
    "priority": 2
}
"#;

/// The game entry point.
#[derive(Default)]
pub struct Picomon;

impl Picomon {
    pub fn new() -> Self {
        Self
    }
}

impl Game for Picomon {
    fn run(&mut self, con: &mut Console<'_>, dir: &Path) -> Result<(), Box<dyn Error>> {
        game::run(con, dir)
    }
}

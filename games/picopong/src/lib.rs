//! **picopong** — single-paddle pong for the atomic handheld.
//!
//! Four difficulties on the face buttons, one paddle, one ball, and a
//! floor that ends the round.

mod game;
mod modes;

use std::error::Error;
use std::path::Path;

use atomic_core::{Console, Game};

pub use modes::{MODE_SELECT, Mode};

/// Menu metadata seeded into the library on first boot.
pub const INFO: &str = r#"{
    "title": "PicoPong",
    "description": "Keep the ball off the floor",
    "version": "1.3",
    "reqAtomic": "",
    "priority": 1
}
"#;

/// The game entry point.
#[derive(Default)]
pub struct PicoPong;

impl PicoPong {
    pub fn new() -> Self {
        Self
    }
}

impl Game for PicoPong {
    fn run(&mut self, con: &mut Console<'_>, dir: &Path) -> Result<(), Box<dyn Error>> {
        game::run(con, dir)
    }
}

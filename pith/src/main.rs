//! PithOS — the menu that boots the handheld's games.

mod catalog;
mod menu;
mod screens;
mod version;

use std::error::Error;
use std::path::{Path, PathBuf};

use atomic_term::TermConsole;

use catalog::GameDef;
use menu::MenuChoice;

const DISPLAY_W: usize = 240;
const DISPLAY_H: usize = 240;

/// Every game this build ships with.
fn registry() -> Vec<GameDef> {
    vec![
        GameDef {
            slug: "picomon",
            info: picomon::INFO,
            make: || Box::new(picomon::Picomon::new()),
        },
        GameDef {
            slug: "picopong",
            info: picopong::INFO,
            make: || Box::new(picopong::PicoPong::new()),
        },
        GameDef {
            slug: "watt-seconds",
            info: watt_seconds::INFO,
            make: || Box::new(watt_seconds::WattSeconds::new()),
        },
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("library"));
    let defs = registry();
    catalog::ensure_installed(&root, &defs)?;

    let mut term = TermConsole::new(DISPLAY_W, DISPLAY_H);
    term.init()?;
    let result = run(&mut term, &root, &defs);
    term.close();
    result
}

fn run(term: &mut TermConsole, root: &Path, defs: &[GameDef]) -> Result<(), Box<dyn Error>> {
    screens::title_screen(&mut term.console())?;
    loop {
        // Rescan every pass so metadata edits show up without a reboot.
        let games = catalog::load_games(root, defs);
        let choice = {
            let con = term.console();
            menu::run_menu(con.screen, con.pad, &games)?
        };
        match choice {
            MenuChoice::Quit => return Ok(()),
            MenuChoice::Launch(idx) => {
                let entry = &games[idx];
                let Some(def) = defs.iter().find(|d| d.slug == entry.slug) else {
                    continue;
                };
                log::info!("booting {}", entry.slug);
                let mut game = (def.make)();
                if let Err(err) = game.run(&mut term.console(), &root.join(&entry.slug)) {
                    log::error!("{} exited with error: {err}", entry.slug);
                    screens::error_screen(&mut term.console(), &err.to_string())?;
                }
            }
        }
    }
}

//! Discovers installed games and the metadata their menu rows show.

use std::fs;
use std::io;
use std::path::Path;

use atomic_assets::GameInfo;
use atomic_core::Game;

/// A compiled-in game: its library slug, the metadata it ships with, and
/// its constructor.
pub struct GameDef {
    pub slug: &'static str,
    pub info: &'static str,
    pub make: fn() -> Box<dyn Game>,
}

/// One menu row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameEntry {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub req_atomic: String,
    pub priority: i32,
}

/// Create each game's library directory and seed its metadata file.
/// Existing files are left alone, so edits survive upgrades.
pub fn ensure_installed(root: &Path, defs: &[GameDef]) -> io::Result<()> {
    for def in defs {
        let dir = root.join(def.slug);
        fs::create_dir_all(&dir)?;
        let info = dir.join("info.json");
        if !info.exists() {
            fs::write(&info, def.info)?;
        }
    }
    Ok(())
}

/// List every registered game present under `root`, highest priority
/// first, ties broken by case-insensitive title.
pub fn load_games(root: &Path, defs: &[GameDef]) -> Vec<GameEntry> {
    let mut games: Vec<GameEntry> = defs
        .iter()
        .filter(|def| root.join(def.slug).is_dir())
        .map(|def| entry_for(def.slug, GameInfo::load(root.join(def.slug))))
        .collect();
    sort_entries(&mut games);
    games
}

/// Shape one menu row from a metadata read.
///
/// A game with unreadable metadata still gets a row (and can still be
/// launched); the row just says what went wrong in place of a blurb.
fn entry_for(slug: &str, info: io::Result<GameInfo>) -> GameEntry {
    match info {
        Ok(info) => GameEntry {
            slug: slug.to_string(),
            title: if info.title.is_empty() { slug.to_string() } else { info.title },
            description: info.description,
            version: info.version,
            req_atomic: info.req_atomic,
            priority: info.priority,
        },
        Err(err) => {
            log::warn!("no usable metadata for {slug}: {err}");
            let description = if err.kind() == io::ErrorKind::NotFound {
                "No game information found"
            } else {
                "Error loading game information"
            };
            GameEntry {
                slug: slug.to_string(),
                title: "ERROR".to_string(),
                description: description.to_string(),
                version: String::new(),
                req_atomic: String::new(),
                priority: 0,
            }
        }
    }
}

fn sort_entries(entries: &mut [GameEntry]) {
    entries.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, priority: i32) -> GameEntry {
        GameEntry {
            slug: title.to_lowercase(),
            title: title.to_string(),
            description: String::new(),
            version: String::new(),
            req_atomic: String::new(),
            priority,
        }
    }

    #[test]
    fn sorts_by_priority_then_title() {
        let mut entries = vec![
            entry("zebra", 1),
            entry("Apple", 1),
            entry("banana", 2),
            entry("ERROR", 0),
        ];
        sort_entries(&mut entries);
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["banana", "Apple", "zebra", "ERROR"]);
    }

    #[test]
    fn title_ties_ignore_case() {
        let mut entries = vec![entry("beta", 1), entry("Alpha", 1), entry("ALSO", 1)];
        sort_entries(&mut entries);
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Alpha", "ALSO", "beta"]);
    }

    #[test]
    fn parsed_metadata_fills_the_row() {
        let info = GameInfo {
            title: "Picomon".to_string(),
            description: "Catch them all".to_string(),
            version: "1.7".to_string(),
            req_atomic: "1.2".to_string(),
            priority: 2,
        };
        let row = entry_for("picomon", Ok(info));
        assert_eq!(row.title, "Picomon");
        assert_eq!(row.slug, "picomon");
        assert_eq!(row.priority, 2);
    }

    #[test]
    fn missing_title_falls_back_to_the_slug() {
        let row = entry_for("picopong", Ok(GameInfo::default()));
        assert_eq!(row.title, "picopong");
        assert_eq!(row.priority, 1);
    }

    #[test]
    fn metadata_failures_become_error_rows() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "no info.json");
        let row = entry_for("picomon", Err(missing));
        assert_eq!(row.title, "ERROR");
        assert_eq!(row.description, "No game information found");
        assert_eq!(row.priority, 0);

        let garbled = io::Error::new(io::ErrorKind::InvalidData, "bad json");
        let row = entry_for("picomon", Err(garbled));
        assert_eq!(row.description, "Error loading game information");
        assert_eq!(row.slug, "picomon");
    }
}

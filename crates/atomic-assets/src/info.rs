//! Game metadata (`info.json`).

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Metadata a game ships next to its assets.
///
/// Field names follow the on-disk format; unknown keys are ignored so
/// newer games stay loadable on older launchers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameInfo {
    pub title: String,
    pub description: String,
    pub version: String,
    #[serde(rename = "reqAtomic")]
    pub req_atomic: String,
    pub priority: i32,
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            version: String::new(),
            req_atomic: String::new(),
            priority: 1,
        }
    }
}

impl GameInfo {
    /// Read `info.json` from a game directory.
    ///
    /// Malformed JSON is `InvalidData`; a missing file surfaces as the
    /// usual `NotFound`.
    pub fn load(dir: impl AsRef<Path>) -> io::Result<Self> {
        let text = fs::read_to_string(dir.as_ref().join("info.json"))?;
        serde_json::from_str(&text).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_full_shape() {
        let info: GameInfo = serde_json::from_str(
            r#"{
                "title": "Picomon",
                "description": "Catch them all",
                "version": "1.7",
                "reqAtomic": "1.2",
                "priority": 2
            }"#,
        )
        .unwrap();
        assert_eq!(info.title, "Picomon");
        assert_eq!(info.req_atomic, "1.2");
        assert_eq!(info.priority, 2);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let info: GameInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info.title, "");
        assert_eq!(info.description, "");
        assert_eq!(info.version, "");
        assert_eq!(info.req_atomic, "");
        assert_eq!(info.priority, 1);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let info: GameInfo =
            serde_json::from_str(r#"{"title": "x", "author": "someone"}"#).unwrap();
        assert_eq!(info.title, "x");
    }
}

//! File-backed save storage.

use std::fs;
use std::path::PathBuf;

use mq_engine::{PlayerSnapshot, SaveStore};

/// Stores the player snapshot as pretty-printed JSON in a single file.
///
/// Failures are reported on stderr and otherwise swallowed: a broken save
/// file behaves like no save file at all.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SaveStore for JsonFileStore {
    fn save(&mut self, snapshot: &PlayerSnapshot) {
        match serde_json::to_string_pretty(snapshot) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    eprintln!("could not write save file {}: {err}", self.path.display());
                }
            }
            Err(err) => eprintln!("could not serialize save: {err}"),
        }
    }

    fn load(&mut self) -> Option<PlayerSnapshot> {
        let data = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&data).ok()
    }
}

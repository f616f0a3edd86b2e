//! Persisted per-user answer store.
//!
//! Persisted questions (author name, email, website, GitHub username,
//! package manager) default to the value accepted on a previous run. The
//! store is read once at resolution start and written once at resolution
//! end; racing invocations are last-writer-wins.

use indexmap::IndexMap;
use log::debug;
use std::io;
use std::path::PathBuf;

use crate::error::Result;

/// Key-value store for persisted answers, keyed by question name.
pub trait AnswerStore {
    fn get(&self, key: &str) -> Option<serde_json::Value>;
    fn set(&mut self, key: &str, value: serde_json::Value);
    /// Flushes pending writes. Called once after resolution completes.
    fn save(&mut self) -> Result<()>;
}

/// JSON-file-backed store under the user's configuration directory.
pub struct JsonFileStore {
    path: PathBuf,
    values: IndexMap<String, serde_json::Value>,
}

impl JsonFileStore {
    /// Opens the store at `path`, starting empty when the file does not
    /// exist or cannot be parsed (a corrupt store is not fatal).
    pub fn open(path: PathBuf) -> Self {
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                debug!("Ignoring unreadable answer store {}: {}", path.display(), e);
                IndexMap::new()
            }),
            Err(_) => {
                debug!("Answer store {} does not exist yet", path.display());
                IndexMap::new()
            }
        };
        Self { path, values }
    }

    /// Opens the store at its default location: `$KILN_HOME/answers.json`
    /// or `~/.config/kiln/answers.json`. Without a home directory the
    /// store lands under the system temp directory rather than a relative
    /// path dependent on the working directory.
    pub fn open_default() -> Self {
        let base = std::env::var("KILN_HOME").map(PathBuf::from).unwrap_or_else(|_| {
            match std::env::var("HOME") {
                Ok(home) if !home.is_empty() => {
                    PathBuf::from(home).join(".config").join("kiln")
                }
                _ => std::env::temp_dir().join("kiln"),
            }
        });
        Self::open(base.join("answers.json"))
    }
}

impl AnswerStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: serde_json::Value) {
        self.values.insert(key.to_string(), value);
    }

    fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents =
            serde_json::to_string_pretty(&self.values).map_err(io::Error::from)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// In-memory store for tests and for runs that must not touch the user's
/// configuration.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: IndexMap<String, serde_json::Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnswerStore for MemoryStore {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: serde_json::Value) {
        self.values.insert(key.to_string(), value);
    }

    fn save(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("answers.json");

        let mut store = JsonFileStore::open(path.clone());
        assert!(store.get("author").is_none());
        store.set("author", serde_json::json!("Ada"));
        store.save().unwrap();

        let reopened = JsonFileStore::open(path);
        assert_eq!(reopened.get("author"), Some(serde_json::json!("Ada")));
    }

    #[test]
    fn test_open_default_honors_kiln_home() {
        let dir = tempfile::TempDir::new().unwrap();
        // KILN_HOME is only read here; set and remove within one test.
        std::env::set_var("KILN_HOME", dir.path());
        let mut store = JsonFileStore::open_default();
        store.set("pm", serde_json::json!("yarn"));
        let saved = store.save();
        std::env::remove_var("KILN_HOME");

        saved.unwrap();
        assert!(dir.path().join("answers.json").exists());
    }

    #[test]
    fn test_file_store_ignores_corrupt_contents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(path);
        assert!(store.get("author").is_none());
    }
}

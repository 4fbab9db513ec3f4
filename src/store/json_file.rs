//! JSON file backed store

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use super::KeyValueStore;

/// Store that keeps every key in a single JSON object on disk.
///
/// The whole file is rewritten on each `set`/`remove`; the timer only writes
/// on state transitions, so the file stays tiny and writes stay rare.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty; the next write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_values(&path) {
            Ok(values) => {
                debug!("Loaded {} stored values from {}", values.len(), path.display());
                values
            }
            Err(e) => {
                warn!("Ignoring stored state: {}", e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    fn flush(&self) -> Result<(), String> {
        let text = serde_json::to_string_pretty(&self.values)
            .map_err(|e| format!("Failed to serialize store: {}", e))?;
        fs::write(&self.path, format!("{text}\n"))
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, String>, String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(format!("unable to read {}: {}", path.display(), e)),
    };
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&content).map_err(|e| {
        format!(
            "invalid JSON in {} at line {}, column {}: {}",
            path.display(),
            e.line(),
            e.column(),
            e
        )
    })
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), String> {
        if self.values.remove(key).is_none() {
            return Ok(());
        }
        self.flush()
    }
}

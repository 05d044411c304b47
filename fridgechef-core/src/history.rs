//! Persisted history of past ingredient submissions.
//!
//! The history is an append-only ordered sequence, mirrored in memory and
//! persisted as a single JSON file that is rewritten in full on every
//! append. Entries are never removed by the application.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::HistoryError;

/// One past ingredient submission, optionally annotated with the recipe
/// name it produced.
///
/// Serialized field names are the persisted contract: `id`, `ingredients`,
/// `recipeName` (omitted when absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique, time-ordered id.
    pub id: String,
    /// The raw ingredient text as submitted.
    pub ingredients: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_name: Option<String>,
}

impl HistoryEntry {
    pub fn new(ingredients: impl Into<String>, recipe_name: Option<String>) -> Self {
        Self {
            id: new_entry_id(),
            ingredients: ingredients.into(),
            recipe_name,
        }
    }
}

/// Generate a unique, time-derived entry id.
pub fn new_entry_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Repository interface for the submission history.
///
/// Insertion order is chronological order. Implementations must be safe to
/// share behind an `Arc`.
pub trait HistoryStore: Send + Sync {
    /// Load all entries in insertion order.
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// Append one entry and persist the updated sequence.
    fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError>;
}

/// History persisted as a single JSON file.
///
/// A missing file loads as an empty history; the whole file is rewritten on
/// every append. There is no schema versioning.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `$FRIDGECHEF_DATA_DIR/history.json`, falling back
    /// to `~/.fridgechef/history.json`.
    pub fn default_path() -> PathBuf {
        std::env::var("FRIDGECHEF_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|h| h.join(".fridgechef"))
                    .unwrap_or_else(|| PathBuf::from("data"))
            })
            .join("history.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| HistoryError::Corrupt(e.to_string()))
    }

    fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.load()?;
        entries.push(entry);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.entries.read().unwrap().clone())
    }

    fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        self.entries.write().unwrap().push(entry);
        Ok(())
    }
}

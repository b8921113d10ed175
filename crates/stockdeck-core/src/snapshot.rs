// ── Persistence adapter ──
//
// Serializes a {items, categories} snapshot to one JSON file and restores
// it at startup. Persistence is an optimization for reload continuity,
// never a correctness requirement: save is best-effort and load tolerates
// missing or corrupt data.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::Product;

/// The persisted payload: canonical items plus the derived category set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub items: Vec<Product>,
    pub categories: Vec<String>,
}

/// File-backed snapshot storage.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot, overwriting any previous one.
    ///
    /// Failures are logged and swallowed.
    pub fn save(&self, snapshot: &Snapshot) {
        if let Err(e) = self.try_save(snapshot) {
            warn!(path = %self.path.display(), error = %e, "failed to persist snapshot");
        }
    }

    fn try_save(&self, snapshot: &Snapshot) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(snapshot)?;
        fs::write(&self.path, json)
    }

    /// Read back the previously saved snapshot.
    ///
    /// Returns `None` when the file is missing, unreadable, or malformed.
    pub fn load(&self) -> Option<Snapshot> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no persisted snapshot");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read snapshot");
                return None;
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding malformed snapshot");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::ProductId;

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            items: vec![Product {
                id: ProductId::Number(1),
                title: "Apple".into(),
                price: 3.0,
                stock: 10,
                category: "fruit".into(),
                thumbnail: String::new(),
            }],
            categories: vec!["fruit".into()],
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot.json"));

        let snapshot = sample_snapshot();
        store.save(&snapshot);

        assert_eq!(store.load(), Some(snapshot));
    }

    #[test]
    fn save_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested/deeper/snapshot.json"));

        store.save(&sample_snapshot());
        assert!(store.load().is_some());
    }

    #[test]
    fn load_returns_none_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("missing.json"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn load_returns_none_on_corrupt_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, b"{ not json").unwrap();

        let store = SnapshotStore::new(path);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn save_swallows_write_failures() {
        // Point at a path whose parent is a regular file -- create_dir_all fails.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let store = SnapshotStore::new(blocker.join("snapshot.json"));
        store.save(&sample_snapshot());
    }
}

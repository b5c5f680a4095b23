//! Durable list of saved snapshots, kept in a file separate from the ledger.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::{
    EngineError, ResultEngine, Snapshot,
    persist::{read_json_file, write_json_file},
};

#[derive(Debug)]
pub struct SnapshotStore {
    path: PathBuf,
    snapshots: RwLock<Vec<Snapshot>>,
}

impl SnapshotStore {
    /// Load the snapshots at `path`. A missing file is an empty store and is
    /// only created by the first save.
    pub fn open(path: impl AsRef<Path>) -> ResultEngine<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshots: Vec<Snapshot> = read_json_file(&path)
            .map_err(|err| EngineError::storage("loading snapshots", err))?
            .unwrap_or_default();
        tracing::debug!("loaded {} snapshots from {}", snapshots.len(), path.display());

        Ok(Self {
            path,
            snapshots: RwLock::new(snapshots),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `snapshot` and persist the whole list.
    pub fn add(&self, snapshot: Snapshot) -> ResultEngine<()> {
        let mut guard = self.snapshots.write();
        guard.push(snapshot);
        self.persist("saving snapshot", &guard)
    }

    /// Remove the snapshot with `id`. Returns `false` when none matched.
    pub fn remove(&self, id: &str) -> ResultEngine<bool> {
        let mut guard = self.snapshots.write();
        let before = guard.len();
        guard.retain(|snapshot| snapshot.id != id);
        if guard.len() == before {
            return Ok(false);
        }
        self.persist("removing snapshot", &guard)?;
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<Snapshot> {
        self.snapshots
            .read()
            .iter()
            .find(|snapshot| snapshot.id == id)
            .cloned()
    }

    /// Copies of all snapshots, newest first.
    pub fn list(&self) -> Vec<Snapshot> {
        let mut snapshots = self.snapshots.read().clone();
        snapshots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        snapshots
    }

    pub fn count(&self) -> usize {
        self.snapshots.read().len()
    }

    fn persist(&self, operation: &str, snapshots: &[Snapshot]) -> ResultEngine<()> {
        write_json_file(&self.path, &snapshots).map_err(|err| {
            tracing::error!("{operation}: failed to persist snapshots: {err}");
            EngineError::storage(operation, err)
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::{Summary, prices::PriceMap};

    fn snapshot(note: &str) -> Snapshot {
        Snapshot::from_summary(&Summary::default(), &PriceMap::new(), note).unwrap()
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path().join("snapshots.json")).unwrap();
        assert_eq!(store.count(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_is_a_loading_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshots.json");
        std::fs::write(&path, "{").unwrap();
        let err = SnapshotStore::open(&path).unwrap_err();
        assert_eq!(
            err,
            EngineError::storage("loading snapshots", std::io::Error::other("any"))
        );
    }

    #[test]
    fn list_is_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path().join("snapshots.json")).unwrap();

        let base = snapshot("base");
        let mut later = snapshot("later");
        later.timestamp = base.timestamp + Duration::hours(1);
        let mut earlier = snapshot("earlier");
        earlier.timestamp = base.timestamp - Duration::hours(1);

        for snap in [base, later, earlier] {
            store.add(snap).unwrap();
        }
        let notes: Vec<String> = store.list().into_iter().map(|s| s.note).collect();
        assert_eq!(notes, ["later", "base", "earlier"]);
    }

    #[test]
    fn saved_snapshots_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/snapshots.json");
        let store = SnapshotStore::open(&path).unwrap();
        let snap = snapshot("keep me");
        let id = snap.id.clone();
        store.add(snap.clone()).unwrap();

        let reopened = SnapshotStore::open(&path).unwrap();
        assert_eq!(reopened.get(&id), Some(snap));
        assert_eq!(reopened.get("missing"), None);
    }

    #[test]
    fn remove_reports_whether_anything_matched() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path().join("snapshots.json")).unwrap();
        let snap = snapshot("");
        let id = snap.id.clone();
        store.add(snap).unwrap();

        assert!(!store.remove("nope").unwrap());
        assert!(store.remove(&id).unwrap());
        assert_eq!(store.count(), 0);
        assert!(!store.remove(&id).unwrap());
    }
}

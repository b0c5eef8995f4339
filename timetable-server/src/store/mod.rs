//! Persisted timetable store.
//!
//! The whole store is one JSON document, read in full at the start of an
//! update cycle and replaced in full at the end.

mod document;
mod error;

use std::path::{Path, PathBuf};

use tracing::debug;

pub use document::{StationRecord, StoreDocument};
pub use error::StoreError;

/// A JSON file holding the [`StoreDocument`].
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole store.
    pub fn load(&self) -> Result<StoreDocument, StoreError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| StoreError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Replace the store with `document`.
    ///
    /// The document is written to a sibling temporary file and renamed into
    /// place, so readers never observe a half-written store. Creates parent
    /// directories if they don't exist.
    pub fn save(&self, document: &StoreDocument) -> Result<(), StoreError> {
        let write_err = |e: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(document).map_err(|e| StoreError::Serialize {
            message: e.to_string(),
        })?;

        let tmp = self.temp_path();
        std::fs::write(&tmp, json).map_err(write_err)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(write_err(e));
        }

        debug!(path = %self.path.display(), stations = document.stations.len(), "store saved");
        Ok(())
    }

    /// [`load`](Self::load) on the blocking thread pool.
    pub async fn load_async(&self) -> Result<StoreDocument, StoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.load())
            .await
            .map_err(|e| StoreError::Task {
                message: e.to_string(),
            })?
    }

    /// [`save`](Self::save) on the blocking thread pool.
    pub async fn save_async(&self, document: StoreDocument) -> Result<(), StoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.save(&document))
            .await
            .map_err(|e| StoreError::Task {
                message: e.to_string(),
            })?
    }

    /// Write `seed` if no store file exists yet.
    ///
    /// Returns whether a file was created.
    pub fn ensure_exists(&self, seed: &StoreDocument) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(seed)?;
        Ok(true)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "store.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Departure, StationConfig, StationTimetables, Timetable};
    use tempfile::tempdir;

    fn document() -> StoreDocument {
        let config = StationConfig::new("kichijoji", "22449", vec![])
            .with_display("吉祥寺", "JR中央線", "#f15a22");
        let mut record = StationRecord::from_config(&config);
        record.timetables = StationTimetables {
            weekdays: vec![
                Timetable::non_empty("東京方面", vec![Departure::new(5, 1).unwrap()]).unwrap(),
            ],
            holidays: vec![],
        };
        StoreDocument {
            stations: vec![record],
        }
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("timetables.json"));

        store.save(&document()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, document());
    }

    #[test]
    fn save_replaces_whole_file() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("timetables.json"));

        store.save(&document()).unwrap();
        store.save(&StoreDocument::default()).unwrap();
        assert!(store.load().unwrap().stations.is_empty());
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("timetables.json");
        let store = JsonStore::new(&path);

        store.save(&document()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn missing_file_is_read_error() {
        let store = JsonStore::new("/nonexistent/path/timetables.json");
        assert!(matches!(store.load(), Err(StoreError::Read { .. })));
    }

    #[test]
    fn corrupt_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timetables.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn unwritable_location_is_write_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        // Parent "directory" is a regular file
        let store = JsonStore::new(blocker.join("timetables.json"));
        assert!(matches!(store.save(&document()), Err(StoreError::Write { .. })));
    }

    #[tokio::test]
    async fn async_save_and_load() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("timetables.json"));

        store.save_async(document()).await.unwrap();
        assert_eq!(store.load_async().await.unwrap(), document());
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn async_load_reports_missing_file() {
        let store = JsonStore::new("/nonexistent/path/timetables.json");
        assert!(matches!(store.load_async().await, Err(StoreError::Read { .. })));
    }

    #[test]
    fn ensure_exists_only_writes_once() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("timetables.json"));

        assert!(store.ensure_exists(&document()).unwrap());
        assert!(!store.ensure_exists(&StoreDocument::default()).unwrap());
        assert_eq!(store.load().unwrap(), document());
    }
}

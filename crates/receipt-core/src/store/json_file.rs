//! Receipt store persisted as a single JSON file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{MemoryStore, ReceiptStore, Result};
use crate::models::receipt::ReceiptRecord;

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    receipts: Vec<ReceiptRecord>,
}

/// Receipt store that rewrites its file after every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let inner = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let file: StoreFile = serde_json::from_str(&content)?;
            debug!(
                "loaded {} receipts from {} (format v{})",
                file.receipts.len(),
                path.display(),
                file.version
            );
            MemoryStore::from_records(file.receipts)
        } else {
            info!("creating new receipt store at {}", path.display());
            MemoryStore::new()
        };

        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let file = StoreFile {
            version: FORMAT_VERSION,
            receipts: self.inner.list()?,
        };
        let content = serde_json::to_vec_pretty(&file)?;

        // Write next to the target, then rename over it
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(&content)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!("saved {} receipts to {}", file.receipts.len(), self.path.display());
        Ok(())
    }
}

impl ReceiptStore for JsonFileStore {
    fn insert(&mut self, record: ReceiptRecord) -> Result<()> {
        self.inner.insert(record)?;
        self.save()
    }

    fn get(&self, id: &str) -> Result<ReceiptRecord> {
        self.inner.get(id)
    }

    fn update(&mut self, record: ReceiptRecord) -> Result<()> {
        self.inner.update(record)?;
        self.save()
    }

    fn remove(&mut self, id: &str) -> Result<ReceiptRecord> {
        let removed = self.inner.remove(id)?;
        self.save()?;
        Ok(removed)
    }

    fn list(&self) -> Result<Vec<ReceiptRecord>> {
        self.inner.list()
    }

    fn clear(&mut self) -> Result<usize> {
        let count = self.inner.clear()?;
        self.save()?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(file: &str) -> ReceiptRecord {
        ReceiptRecord::pending(file, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("receipts.json")).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_changes_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("receipts.json");

        let mut r = record("a.jpg");
        r.complete("合計 1,100");
        let id = r.id.clone();

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.insert(r).unwrap();
            store.insert(record("b.jpg")).unwrap();
        }

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
        assert_eq!(store.get(&id).unwrap().amount, 1100);

        let mut updated = store.get(&id).unwrap();
        updated.set_amount(1200);
        store.update(updated).unwrap();
        drop(store);

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(&id).unwrap().amount, 1200);

        store.remove(&id).unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipts.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.insert(record("a.jpg")).unwrap();
        assert_eq!(store.clear().unwrap(), 1);

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipts.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Serde(_))));
    }
}

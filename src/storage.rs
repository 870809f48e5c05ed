//! Dataset storage collaborator.
//!
//! [`DatasetStore`] is the interface the upload flow hands a [`ParsedTable`] to. The store owns
//! the table from then on. [`MemoryDatasetStore`] is a volatile, thread-safe implementation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde::Serialize;

use crate::ingestion::observability::unix_ts;
use crate::types::ParsedTable;

/// A dataset about to be stored (no id yet).
#[derive(Debug, Clone, PartialEq)]
pub struct NewDataset {
    /// Display name.
    pub name: String,
    /// Free-form description (may be empty).
    pub description: String,
    /// Original file name of the upload.
    pub file_name: String,
    /// Declared upload size in bytes.
    pub file_size: u64,
    /// Short format label (`csv`, `json`, `xlsx`).
    pub file_type: String,
    /// Id of the uploading user.
    pub uploaded_by: u64,
    /// Normalized table content.
    pub table: ParsedTable,
}

/// A stored dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
    pub uploaded_by: u64,
    #[serde(flatten)]
    pub table: ParsedTable,
    /// Creation time, seconds since the Unix epoch.
    pub created_at: u64,
}

/// Repository interface for datasets, keyed by auto-incrementing id.
pub trait DatasetStore: Send + Sync {
    /// Assign an id and creation timestamp, store, and return the dataset.
    fn create_dataset(&self, new: NewDataset) -> Dataset;

    /// Fetch a dataset by id.
    fn get_dataset(&self, id: u64) -> Option<Dataset>;

    /// All datasets in id order.
    fn list_datasets(&self) -> Vec<Dataset>;

    /// Datasets uploaded by `user_id`, in id order.
    fn list_datasets_by_user(&self, user_id: u64) -> Vec<Dataset> {
        self.list_datasets()
            .into_iter()
            .filter(|d| d.uploaded_by == user_id)
            .collect()
    }

    /// Remove a dataset. Returns `true` if it existed.
    fn delete_dataset(&self, id: u64) -> bool;
}

/// In-memory [`DatasetStore`]. Ids start at 1 and are never reused.
pub struct MemoryDatasetStore {
    next_id: AtomicU64,
    datasets: RwLock<BTreeMap<u64, Dataset>>,
}

impl MemoryDatasetStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            datasets: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored datasets.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Poisoning is ignored: every write is a single insert/remove.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<u64, Dataset>> {
        self.datasets.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<u64, Dataset>> {
        self.datasets.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryDatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryDatasetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDatasetStore")
            .field("next_id", &self.next_id.load(Ordering::SeqCst))
            .field("datasets_len", &self.len())
            .finish()
    }
}

impl DatasetStore for MemoryDatasetStore {
    fn create_dataset(&self, new: NewDataset) -> Dataset {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let dataset = Dataset {
            id,
            name: new.name,
            description: new.description,
            file_name: new.file_name,
            file_size: new.file_size,
            file_type: new.file_type,
            uploaded_by: new.uploaded_by,
            table: new.table,
            created_at: unix_ts(),
        };
        self.write().insert(id, dataset.clone());
        dataset
    }

    fn get_dataset(&self, id: u64) -> Option<Dataset> {
        self.read().get(&id).cloned()
    }

    fn list_datasets(&self) -> Vec<Dataset> {
        self.read().values().cloned().collect()
    }

    fn delete_dataset(&self, id: u64) -> bool {
        self.write().remove(&id).is_some()
    }
}

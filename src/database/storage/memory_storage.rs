use std::{collections::HashMap, path::PathBuf, sync::RwLock};

use crate::{
    database::{check_batch, BatchReader, DatasetMetadata, StorageEngine, StorageError},
    executor::{Batch, Row},
};

/// Storage engine keeping every dataset's rows in memory, keyed by file url.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    stores: RwLock<HashMap<PathBuf, Vec<Row>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows stored for a dataset, `None` if it is not allocated.
    pub fn row_count(&self, metadata: &DatasetMetadata) -> Option<usize> {
        let stores = self.stores.read().ok()?;
        stores.get(&metadata.file_url).map(Vec::len)
    }

    fn missing(metadata: &DatasetMetadata) -> StorageError {
        StorageError::NotAllocated(metadata.file_url.display().to_string())
    }
}

impl StorageEngine for MemoryStorage {
    fn create(&self, metadata: &DatasetMetadata) -> Result<(), StorageError> {
        let mut stores = self.stores.write().map_err(|_| StorageError::Unavailable)?;
        if stores.contains_key(&metadata.file_url) {
            return Err(StorageError::AlreadyAllocated(metadata.file_url.display().to_string()));
        }
        stores.insert(metadata.file_url.clone(), Vec::new());
        Ok(())
    }

    fn write(&self, metadata: &DatasetMetadata, batch: &Batch) -> Result<(), StorageError> {
        check_batch(metadata, batch)?;

        let mut stores = self.stores.write().map_err(|_| StorageError::Unavailable)?;
        let rows = stores.get_mut(&metadata.file_url).ok_or_else(|| Self::missing(metadata))?;
        rows.extend(batch.rows().iter().cloned());
        Ok(())
    }

    fn read(&self, metadata: &DatasetMetadata, batch_size: usize) -> Result<BatchReader, StorageError> {
        let stores = self.stores.read().map_err(|_| StorageError::Unavailable)?;
        let rows = stores.get(&metadata.file_url).ok_or_else(|| Self::missing(metadata))?.clone();

        Ok(Box::new(MemoryBatchReader {
            rows: rows.into_iter(),
            batch_size: batch_size.max(1),
        }))
    }

    fn drop_dataset(&self, metadata: &DatasetMetadata) -> Result<(), StorageError> {
        let mut stores = self.stores.write().map_err(|_| StorageError::Unavailable)?;
        stores.remove(&metadata.file_url).map(|_| ()).ok_or_else(|| Self::missing(metadata))
    }
}

/// Chunks a snapshot of stored rows into batches.
struct MemoryBatchReader {
    rows: std::vec::IntoIter<Row>,
    batch_size: usize,
}

impl Iterator for MemoryBatchReader {
    type Item = Result<Batch, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rows = self.rows.by_ref().take(self.batch_size).collect::<Vec<_>>();
        if rows.is_empty() {
            None
        } else {
            Some(Ok(Batch::new(rows)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{ColumnMetadata, ColumnType};
    use serde_json::json;

    fn meta() -> DatasetMetadata {
        DatasetMetadata::new("t", PathBuf::from("mem/t"), vec![
            ColumnMetadata::scalar("id", ColumnType::Integer),
            ColumnMetadata::scalar("name", ColumnType::Text),
        ])
    }

    #[test]
    fn test_create_is_not_idempotent() {
        let storage = MemoryStorage::new();
        storage.create(&meta()).unwrap();
        let err = storage.create(&meta()).unwrap_err();
        assert_eq!(err, StorageError::AlreadyAllocated("mem/t".into()));
    }

    #[test]
    fn test_write_requires_allocation() {
        let storage = MemoryStorage::new();
        let batch = Batch::from_json(json!([[1, "a"]])).unwrap();
        let err = storage.write(&meta(), &batch).unwrap_err();
        assert_eq!(err, StorageError::NotAllocated("mem/t".into()));
    }

    #[test]
    fn test_read_rechunks_in_write_order() {
        let storage = MemoryStorage::new();
        let meta = meta();
        storage.create(&meta).unwrap();
        storage.write(&meta, &Batch::from_json(json!([[1, "a"], [2, "b"], [3, "c"]])).unwrap()).unwrap();
        storage.write(&meta, &Batch::from_json(json!([[4, "d"]])).unwrap()).unwrap();
        assert_eq!(storage.row_count(&meta), Some(4));

        let batches = storage.read(&meta, 3).unwrap().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len(), 3);
        assert_eq!(batches[1].rows()[0], Row(vec![json!(4), json!("d")]));
    }

    #[test]
    fn test_rejected_batch_stores_nothing() {
        let storage = MemoryStorage::new();
        let meta = meta();
        storage.create(&meta).unwrap();
        let batch = Batch::from_json(json!([[1, "a"], ["two", "b"]])).unwrap();
        assert!(matches!(storage.write(&meta, &batch), Err(StorageError::SchemaViolation { row: 1, .. })));
        assert_eq!(storage.row_count(&meta), Some(0));
    }

    #[test]
    fn test_drop_dataset() {
        let storage = MemoryStorage::new();
        let meta = meta();
        storage.create(&meta).unwrap();
        storage.drop_dataset(&meta).unwrap();
        assert_eq!(storage.row_count(&meta), None);
        assert!(storage.drop_dataset(&meta).is_err());
    }
}

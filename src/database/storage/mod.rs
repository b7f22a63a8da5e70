use std::sync::Arc;

use crate::{database::DatasetMetadata, executor::Batch};

pub mod storage_error;
pub use storage_error::*;

pub mod memory_storage;
pub use memory_storage::*;

pub mod json_storage;
pub use json_storage::*;

pub type StorageRef = Arc<dyn StorageEngine>;

/// Lazy stream of stored batches, in physical row order.
pub type BatchReader = Box<dyn Iterator<Item = Result<Batch, StorageError>> + Send>;

/// Backing store for dataset rows, addressed by `DatasetMetadata::file_url`.
pub trait StorageEngine: Send + Sync {
    /// Allocate the backing store. Not idempotent: a second call for the
    /// same location fails with `AlreadyAllocated`.
    fn create(&self, metadata: &DatasetMetadata) -> Result<(), StorageError>;

    /// Append a batch. Rows must fit `metadata.columns`; a batch with any
    /// offending row is rejected before anything from it is stored.
    fn write(&self, metadata: &DatasetMetadata, batch: &Batch) -> Result<(), StorageError>;

    /// Stream the stored rows in batches of at most `batch_size` rows.
    fn read(&self, metadata: &DatasetMetadata, batch_size: usize) -> Result<BatchReader, StorageError>;

    /// Release the backing store.
    fn drop_dataset(&self, metadata: &DatasetMetadata) -> Result<(), StorageError>;
}

/// Check every row of `batch` against the dataset columns.
pub fn check_batch(metadata: &DatasetMetadata, batch: &Batch) -> Result<(), StorageError> {
    for (i, row) in batch.rows().iter().enumerate() {
        if row.len() != metadata.columns.len() {
            return Err(StorageError::SchemaViolation {
                dataset: metadata.name.clone(),
                row: i,
                reason: format!("expected {} values, found {}", metadata.columns.len(), row.len()),
            });
        }
        for (column, value) in metadata.columns.iter().zip(row.values()) {
            if !column.conforms(value) {
                return Err(StorageError::SchemaViolation {
                    dataset: metadata.name.clone(),
                    row: i,
                    reason: format!("value {value} does not fit column {}", column.name),
                });
            }
        }
    }
    Ok(())
}

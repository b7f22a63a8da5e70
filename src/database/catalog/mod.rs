use std::{path::Path, sync::Arc};

use crate::database::{ColumnMetadata, ColumnType, DatasetMetadata};

pub mod catalog_error;
pub use catalog_error::*;

pub mod memory_catalog;
pub use memory_catalog::*;

pub type CatalogRef = Arc<dyn Catalog>;

/// Dataset metadata store.
///
/// Executors receive a catalog handle instead of reaching for a global one,
/// so tests can inject their own implementation.
pub trait Catalog: Send + Sync {
    /// Look up a dataset by name. `Ok(None)` when it does not exist.
    fn get_dataset_metadata(&self, name: &str) -> Result<Option<DatasetMetadata>, CatalogError>;

    fn create_column_metadata(&self, name: &str, ty: ColumnType, is_array: bool, array_dimensions: Vec<usize>) -> ColumnMetadata {
        ColumnMetadata::new(name, ty, is_array, array_dimensions)
    }

    /// Register a new dataset. Fails with `AlreadyExists` if the name is
    /// taken at the moment of registration, even when an earlier lookup
    /// reported it free.
    fn create_metadata(&self, name: &str, file_url: &Path, columns: Vec<ColumnMetadata>) -> Result<DatasetMetadata, CatalogError>;

    /// Remove a dataset record, returning it if it existed.
    fn drop_metadata(&self, name: &str) -> Result<Option<DatasetMetadata>, CatalogError>;

    /// Registered dataset names in registration order.
    fn list_datasets(&self) -> Result<Vec<String>, CatalogError>;
}

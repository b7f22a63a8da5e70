use std::path::Path;

use tracing::{info, warn};

use crate::{
    database::{Catalog, ColumnMetadata, DatasetMetadata, StorageEngine},
    executor::ExecutorError,
};

/// Commits a new dataset: catalog record first, then backing storage.
pub struct MetadataRegistrar;

impl MetadataRegistrar {
    /// Storage is only allocated after the catalog accepted the record. If
    /// allocation fails the record is removed again, so a dataset is either
    /// registered with storage or not registered at all.
    pub fn register(
        catalog: &dyn Catalog,
        storage: &dyn StorageEngine,
        name: &str,
        file_url: &Path,
        columns: Vec<ColumnMetadata>,
    ) -> Result<DatasetMetadata, ExecutorError> {
        let metadata = catalog
            .create_metadata(name, file_url, columns)
            .map_err(ExecutorError::CatalogRegistrationFailure)?;

        if let Err(e) = storage.create(&metadata) {
            if let Err(drop_err) = catalog.drop_metadata(&metadata.name) {
                warn!(dataset = %metadata.name, error = %drop_err, "could not unregister dataset after failed allocation");
            }
            return Err(ExecutorError::StorageAllocationFailure(e));
        }

        info!(
            dataset = %metadata.name,
            id = %metadata.id,
            file_url = %metadata.file_url.display(),
            columns = metadata.columns.len(),
            "registered dataset"
        );
        Ok(metadata)
    }
}

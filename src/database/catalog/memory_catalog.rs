use std::{collections::HashSet, fs::{self, File}, io::BufWriter, path::Path, sync::RwLock};

use indexmap::IndexMap;
use tracing::debug;

use crate::database::{normalize_name, Catalog, CatalogError, ColumnMetadata, DatasetMetadata};

/// In-memory catalog keyed by normalized dataset name.
///
/// Registration order is preserved so listings and snapshots are stable.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    datasets: RwLock<IndexMap<String, DatasetMetadata>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, CatalogError> {
        let datasets = self.datasets.read().map_err(|_| CatalogError::Unavailable)?;
        Ok(datasets.len())
    }

    pub fn is_empty(&self) -> Result<bool, CatalogError> {
        Ok(self.len()? == 0)
    }

    fn check_columns(name: &str, columns: &[ColumnMetadata]) -> Result<(), CatalogError> {
        if columns.is_empty() {
            return Err(CatalogError::EmptySchema(name.to_string()));
        }
        let mut seen = HashSet::new();
        for column in columns {
            if !seen.insert(column.name.as_str()) {
                return Err(CatalogError::DuplicateColumn {
                    dataset: name.to_string(),
                    column: column.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Save every registered dataset record to a JSON file.
    pub fn write_to_file(&self, file_path: &Path) -> Result<(), CatalogError> {
        let datasets = self.datasets.read().map_err(|_| CatalogError::Unavailable)?;
        let records = datasets.values().collect::<Vec<_>>();

        let file = File::create(file_path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", file_path.display())))?;
        let mut w = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut w, &records)
            .map_err(|e| CatalogError::Serde(e.to_string()))
    }

    /// Build a catalog from a snapshot written by [`MemoryCatalog::write_to_file`].
    pub fn load_from_file(file_path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(file_path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", file_path.display())))?;
        let records = serde_json::from_str::<Vec<DatasetMetadata>>(&content)
            .map_err(|e| CatalogError::Serde(e.to_string()))?;

        let mut datasets = IndexMap::new();
        for record in records {
            let key = normalize_name(&record.name);
            if datasets.contains_key(&key) {
                return Err(CatalogError::AlreadyExists(key));
            }
            Self::check_columns(&key, &record.columns)?;
            datasets.insert(key, record);
        }

        Ok(Self { datasets: RwLock::new(datasets) })
    }
}

impl Catalog for MemoryCatalog {
    fn get_dataset_metadata(&self, name: &str) -> Result<Option<DatasetMetadata>, CatalogError> {
        let datasets = self.datasets.read().map_err(|_| CatalogError::Unavailable)?;
        Ok(datasets.get(&normalize_name(name)).cloned())
    }

    fn create_metadata(&self, name: &str, file_url: &Path, columns: Vec<ColumnMetadata>) -> Result<DatasetMetadata, CatalogError> {
        let key = normalize_name(name);
        Self::check_columns(&key, &columns)?;

        // existence check and insert under the same write lock
        let mut datasets = self.datasets.write().map_err(|_| CatalogError::Unavailable)?;
        if datasets.contains_key(&key) {
            return Err(CatalogError::AlreadyExists(key));
        }

        let metadata = DatasetMetadata::new(&key, file_url.to_path_buf(), columns);
        datasets.insert(key, metadata.clone());
        debug!(dataset = %metadata.name, id = %metadata.id, "registered dataset metadata");

        Ok(metadata)
    }

    fn drop_metadata(&self, name: &str) -> Result<Option<DatasetMetadata>, CatalogError> {
        let mut datasets = self.datasets.write().map_err(|_| CatalogError::Unavailable)?;
        Ok(datasets.shift_remove(&normalize_name(name)))
    }

    fn list_datasets(&self) -> Result<Vec<String>, CatalogError> {
        let datasets = self.datasets.read().map_err(|_| CatalogError::Unavailable)?;
        Ok(datasets.keys().cloned().collect())
    }
}

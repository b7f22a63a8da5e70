use std::sync::Arc;

use tracing::warn;

use crate::{
    database::{
        generate_file_path, is_valid_dataset_name, CatalogRef, ColumnMetadata, DatasetMetadata, EngineConfig,
        JsonFileStorage, MemoryCatalog, MemoryStorage, StorageError, StorageRef,
    },
    executor::{
        Batch, ConflictResolver, CreateMaterializedViewExecutor, Executor, ExecutorError, MatViewOutcome,
        MetadataRegistrar, PlanExecutor, Row,
    },
    planner::{CreateMaterializedViewPlan, PlanNode},
};

/// Catalog, storage engine and configuration bundled for statement
/// execution. Cloning shares the underlying catalog and storage.
#[derive(Clone)]
pub struct Db {
    config: EngineConfig,
    catalog: CatalogRef,
    storage: StorageRef,
}

impl Db {
    /// In-memory catalog with JSON-lines files under `config.data_dir`.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_parts(config, Arc::new(MemoryCatalog::new()), Arc::new(JsonFileStorage::new()))
    }

    /// Catalog and storage both in memory.
    pub fn in_memory() -> Self {
        Self::with_parts(EngineConfig::default(), Arc::new(MemoryCatalog::new()), Arc::new(MemoryStorage::new()))
    }

    pub fn with_parts(config: EngineConfig, catalog: CatalogRef, storage: StorageRef) -> Self {
        Self { config, catalog, storage }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogRef {
        &self.catalog
    }

    pub fn storage(&self) -> &StorageRef {
        &self.storage
    }

    /// Metadata of an existing dataset.
    pub fn dataset(&self, name: &str) -> Result<DatasetMetadata, ExecutorError> {
        self.catalog
            .get_dataset_metadata(name)?
            .ok_or_else(|| ExecutorError::UnknownDataset(name.to_string()))
    }

    /// Register and allocate a base dataset with an explicit column list.
    pub fn create_table(&self, name: &str, columns: Vec<ColumnMetadata>) -> Result<DatasetMetadata, ExecutorError> {
        if !is_valid_dataset_name(name) {
            return Err(ExecutorError::InvalidDatasetName(name.to_string()));
        }
        ConflictResolver::resolve(self.catalog.as_ref(), name, false)?;

        let file_url = generate_file_path(&self.config, name);
        MetadataRegistrar::register(self.catalog.as_ref(), self.storage.as_ref(), name, &file_url, columns)
    }

    /// Append rows to a dataset; returns the number of rows written.
    pub fn insert(&self, name: &str, batch: &Batch) -> Result<usize, ExecutorError> {
        let metadata = self.dataset(name)?;
        self.storage
            .write(&metadata, batch)
            .map_err(ExecutorError::StorageWriteFailure)?;
        Ok(batch.len())
    }

    /// Every row of a dataset in storage order.
    pub fn scan(&self, name: &str) -> Result<Vec<Row>, ExecutorError> {
        let metadata = self.dataset(name)?;
        let reader = self.storage
            .read(&metadata, self.config.effective_batch_size())
            .map_err(ExecutorError::StorageReadFailure)?;

        let mut rows = Vec::new();
        for batch in reader {
            rows.extend(batch.map_err(ExecutorError::StorageReadFailure)?.into_rows());
        }
        Ok(rows)
    }

    /// Build, validate and drain a plan.
    pub fn execute(&self, plan: &PlanNode) -> Result<Vec<Batch>, ExecutorError> {
        let mut exec = PlanExecutor::build(plan, self)?;
        exec.validate()?;

        let mut out = Vec::new();
        while let Some(batch) = exec.next_batch()? {
            out.push(batch);
        }
        Ok(out)
    }

    /// Run a CREATE MATERIALIZED VIEW statement and report what happened.
    pub fn create_materialized_view(&self, plan: CreateMaterializedViewPlan) -> Result<MatViewOutcome, ExecutorError> {
        let child = PlanExecutor::build(&plan.child, self)?;
        let mut exec = CreateMaterializedViewExecutor::new(
            plan,
            child,
            Arc::clone(&self.catalog),
            Arc::clone(&self.storage),
            self.config.clone(),
        );
        exec.run()
    }

    /// Remove a dataset's backing store and catalog record. Returns `false`
    /// when no such dataset is registered. A record whose store is already
    /// gone is still unregistered.
    pub fn drop_dataset(&self, name: &str) -> Result<bool, ExecutorError> {
        let Some(metadata) = self.catalog.get_dataset_metadata(name)? else {
            return Ok(false);
        };
        match self.storage.drop_dataset(&metadata) {
            Ok(()) => {}
            Err(StorageError::NotAllocated(location)) => {
                warn!(dataset = %metadata.name, %location, "backing store already gone, unregistering");
            }
            Err(e) => return Err(ExecutorError::StorageDropFailure(e)),
        }
        self.catalog.drop_metadata(&metadata.name)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{ColumnType, StorageEngine};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn columns() -> Vec<ColumnMetadata> {
        vec![
            ColumnMetadata::scalar("id", ColumnType::Integer),
            ColumnMetadata::scalar("cat", ColumnType::Text),
        ]
    }

    #[test]
    fn test_create_insert_scan() {
        let db = Db::in_memory();
        let meta = db.create_table("T", columns()).unwrap();
        assert_eq!(meta.file_url, generate_file_path(db.config(), "t"));

        let written = db.insert("t", &Batch::from_json(json!([[1, "a"], [2, "b"]])).unwrap()).unwrap();
        assert_eq!(written, 2);
        assert_eq!(db.scan("t").unwrap(), vec![
            Row(vec![json!(1), json!("a")]),
            Row(vec![json!(2), json!("b")]),
        ]);
    }

    #[test]
    fn test_create_table_twice_fails() {
        let db = Db::in_memory();
        db.create_table("t", columns()).unwrap();
        let err = db.create_table("t", columns()).unwrap_err();
        assert_eq!(err, ExecutorError::DatasetAlreadyExists("t".into()));
    }

    #[test]
    fn test_create_table_rejects_bad_name() {
        let db = Db::in_memory();
        let err = db.create_table("../t", columns()).unwrap_err();
        assert_eq!(err, ExecutorError::InvalidDatasetName("../t".into()));
    }

    #[test]
    fn test_insert_checks_schema() {
        let db = Db::in_memory();
        db.create_table("t", columns()).unwrap();
        let err = db.insert("t", &Batch::from_json(json!([["x", "a"]])).unwrap()).unwrap_err();
        assert!(matches!(err, ExecutorError::StorageWriteFailure(StorageError::SchemaViolation { .. })));
        assert_eq!(db.insert("nope", &Batch::default()).unwrap_err(), ExecutorError::UnknownDataset("nope".into()));
    }

    #[test]
    fn test_drop_dataset() {
        let db = Db::in_memory();
        db.create_table("t", columns()).unwrap();
        assert!(db.drop_dataset("t").unwrap());
        assert!(!db.drop_dataset("t").unwrap());
        assert!(db.create_table("t", columns()).is_ok());
    }

    #[test]
    fn test_drop_dataset_with_missing_store_unregisters() {
        let db = Db::in_memory();
        let meta = db.create_table("t", columns()).unwrap();
        db.storage().drop_dataset(&meta).unwrap();

        assert!(db.drop_dataset("t").unwrap());
        assert_eq!(db.dataset("t").unwrap_err(), ExecutorError::UnknownDataset("t".into()));
    }

    #[test]
    fn test_drop_dataset_storage_failure_keeps_record() {
        let temp_dir = TempDir::new().unwrap();
        let db = Db::new(EngineConfig::with_data_dir(temp_dir.path()));
        let meta = db.create_table("t", columns()).unwrap();
        // a directory at the file location cannot be removed as a file
        fs::remove_file(&meta.file_url).unwrap();
        fs::create_dir(&meta.file_url).unwrap();

        let err = db.drop_dataset("t").unwrap_err();
        assert!(matches!(err, ExecutorError::StorageDropFailure(StorageError::Io { .. })));
        assert_eq!(db.dataset("t").unwrap(), meta);
    }

    #[test]
    fn test_file_backed_db() {
        let temp_dir = TempDir::new().unwrap();
        let db = Db::new(EngineConfig::with_data_dir(temp_dir.path()).batch_size(1));
        let meta = db.create_table("t", columns()).unwrap();
        assert!(meta.file_url.starts_with(temp_dir.path()));
        assert!(meta.file_url.exists());

        db.insert("t", &Batch::from_json(json!([[1, "a"], [2, null]])).unwrap()).unwrap();
        let rows = db.scan("t").unwrap();
        assert_eq!(rows[1], Row(vec![json!(2), json!(null)]));
    }
}

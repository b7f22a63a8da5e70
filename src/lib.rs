pub mod expression;

pub mod database;
pub use database::{Db, EngineConfig, Catalog, CatalogRef, MemoryCatalog, StorageEngine, StorageRef, MemoryStorage, JsonFileStorage, ColumnMetadata, ColumnType, DatasetMetadata};

pub mod planner;

pub mod executor;
pub use executor::{Batch, Row, Executor, ExecutorError, CreateMaterializedViewExecutor, MatViewOutcome};

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::ColumnMetadata;

/// Catalog record of a persisted dataset (base table or materialized view).
///
/// Created exactly once by the catalog and then handed to the storage
/// engine for allocation and every subsequent write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Catalog-assigned identifier
    pub id: Uuid,
    /// Normalized (lowercase) dataset name, unique within the catalog
    pub name: String,
    /// Backing storage location derived from the name
    pub file_url: PathBuf,
    /// Ordered column list; rows are positional against it
    pub columns: Vec<ColumnMetadata>,
    pub created_at: DateTime<Utc>,
}

impl DatasetMetadata {
    pub fn new(name: &str, file_url: PathBuf, columns: Vec<ColumnMetadata>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            file_url,
            columns,
            created_at: Utc::now(),
        }
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Column name -> position, in column order.
    pub fn column_positions(&self) -> IndexMap<String, usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }
}

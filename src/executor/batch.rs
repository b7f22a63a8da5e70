use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::executor::Row;

/// Ordered, finite chunk of rows moved as a unit between operators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    rows: Vec<Row>,
}

impl Batch {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Build a batch from a JSON array of arrays. Anything that is not an
    /// array of arrays is rejected.
    pub fn from_json(value: Value) -> Result<Self, String> {
        let Value::Array(items) = value else {
            return Err("batch JSON must be an array of rows".to_string());
        };

        let mut rows = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            match item {
                Value::Array(values) => rows.push(Row(values)),
                other => return Err(format!("row {i} is not an array: {other}")),
            }
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

use tracing::debug;

use crate::{
    database::{BatchReader, DatasetMetadata, StorageRef},
    executor::{Batch, Executor, ExecutorError},
    expression::{ColumnPositions, Eval, ProjectionExpression},
    planner::PlanOprType,
};

/// Reads every row of a dataset in storage order and evaluates the
/// projection list over each row.
pub struct SeqScanExecutor {
    source: DatasetMetadata,
    columns: Vec<ProjectionExpression>,
    positions: ColumnPositions,
    storage: StorageRef,
    batch_size: usize,
    reader: Option<BatchReader>,
    exhausted: bool,
}

impl SeqScanExecutor {
    /// An empty projection list reads every source column. Column
    /// references must match the source's type and array shape.
    pub fn new(source: DatasetMetadata, columns: Vec<ProjectionExpression>, storage: StorageRef, batch_size: usize) -> Result<Self, ExecutorError> {
        let positions = source.column_positions();
        let columns = if columns.is_empty() {
            source.columns.iter().cloned().map(ProjectionExpression::Column).collect()
        } else {
            columns
        };
        for expr in &columns {
            Eval::check_columns(expr, &source.columns)?;
        }

        Ok(Self {
            source,
            columns,
            positions,
            storage,
            batch_size: batch_size.max(1),
            reader: None,
            exhausted: false,
        })
    }
}

impl Executor for SeqScanExecutor {
    fn opr_type(&self) -> PlanOprType {
        PlanOprType::SequentialScan
    }

    fn project_expr(&self) -> &[ProjectionExpression] {
        &self.columns
    }

    fn next_batch(&mut self) -> Result<Option<Batch>, ExecutorError> {
        if self.exhausted {
            return Ok(None);
        }

        if self.reader.is_none() {
            debug!(dataset = %self.source.name, batch_size = self.batch_size, "opening sequential scan");
            let reader = self.storage
                .read(&self.source, self.batch_size)
                .map_err(ExecutorError::StorageReadFailure)?;
            self.reader = Some(reader);
        }
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        match reader.next() {
            None => {
                self.exhausted = true;
                self.reader = None;
                Ok(None)
            }
            Some(Err(e)) => {
                self.exhausted = true;
                Err(ExecutorError::StorageReadFailure(e))
            }
            Some(Ok(batch)) => {
                let mut rows = Vec::with_capacity(batch.len());
                for row in batch.rows() {
                    rows.push(Eval::project(&self.columns, row, &self.positions)?);
                }
                Ok(Some(Batch::new(rows)))
            }
        }
    }
}

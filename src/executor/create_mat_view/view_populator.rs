use tracing::debug;

use crate::{
    database::{DatasetMetadata, StorageEngine},
    executor::{Executor, ExecutorError},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PopulateStats {
    pub batches: usize,
    pub rows: usize,
}

/// Streams a child's output into a registered dataset.
pub struct ViewPopulator;

impl ViewPopulator {
    /// Pull one batch, write it, repeat. The next batch is not requested
    /// until the current write returned. The first failing write stops the
    /// loop; rows written before it stay in storage.
    pub fn populate(storage: &dyn StorageEngine, metadata: &DatasetMetadata, child: &mut dyn Executor) -> Result<PopulateStats, ExecutorError> {
        let mut stats = PopulateStats::default();

        while let Some(batch) = child.next_batch()? {
            storage
                .write(metadata, &batch)
                .map_err(ExecutorError::StorageWriteFailure)?;

            stats.batches += 1;
            stats.rows += batch.len();
            debug!(dataset = %metadata.name, batch = stats.batches, rows = batch.len(), "wrote batch");
        }

        Ok(stats)
    }
}

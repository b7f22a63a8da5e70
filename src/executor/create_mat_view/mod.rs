use serde_json::Value;
use tracing::{error, info};

use crate::{
    database::{generate_file_path, is_valid_dataset_name, CatalogRef, DatasetMetadata, EngineConfig, StorageRef},
    executor::{Batch, Executor, ExecutorError, Row},
    expression::ProjectionExpression,
    planner::{CreateMaterializedViewPlan, PlanOprType},
};

pub mod schema_deriver;
pub use schema_deriver::*;

pub mod conflict_resolver;
pub use conflict_resolver::*;

pub mod metadata_registrar;
pub use metadata_registrar::*;

pub mod view_populator;
pub use view_populator::*;

/// Result of a CREATE MATERIALIZED VIEW statement.
#[derive(Debug, Clone, PartialEq)]
pub enum MatViewOutcome {
    /// The view was registered and fully populated
    Created { metadata: DatasetMetadata, batches: usize, rows: usize },
    /// A dataset of that name existed and IF NOT EXISTS was given
    AlreadyExists { name: String },
}

impl MatViewOutcome {
    pub fn rows(&self) -> usize {
        match self {
            MatViewOutcome::Created { rows, .. } => *rows,
            MatViewOutcome::AlreadyExists { .. } => 0,
        }
    }
}

/// Executes `CREATE MATERIALIZED VIEW`.
///
/// Steps run in a fixed order and stop at the first failure:
/// shape and child checks, schema derivation, conflict check, registration,
/// population. Everything before registration is free of side effects.
pub struct CreateMaterializedViewExecutor {
    plan: CreateMaterializedViewPlan,
    child: Box<dyn Executor>,
    catalog: CatalogRef,
    storage: StorageRef,
    config: EngineConfig,
    finished: bool,
}

impl CreateMaterializedViewExecutor {
    pub fn new(
        plan: CreateMaterializedViewPlan,
        child: Box<dyn Executor>,
        catalog: CatalogRef,
        storage: StorageRef,
        config: EngineConfig,
    ) -> Self {
        Self { plan, child, catalog, storage, config, finished: false }
    }

    /// Run the statement to completion.
    pub fn run(&mut self) -> Result<MatViewOutcome, ExecutorError> {
        let result = self.run_steps();
        if let Err(e) = &result {
            error!(view = %self.plan.view, error = %e, "create materialized view failed");
        }
        result
    }

    fn run_steps(&mut self) -> Result<MatViewOutcome, ExecutorError> {
        self.validate()?;

        let columns = SchemaDeriver::derive(self.catalog.as_ref(), &self.plan.col_list, self.child.project_expr())?;

        if ConflictResolver::resolve(self.catalog.as_ref(), &self.plan.view, self.plan.if_not_exists)? == Resolution::Skip {
            return Ok(MatViewOutcome::AlreadyExists { name: self.plan.view.clone() });
        }

        let file_url = generate_file_path(&self.config, &self.plan.view);
        let metadata = MetadataRegistrar::register(
            self.catalog.as_ref(),
            self.storage.as_ref(),
            &self.plan.view,
            &file_url,
            columns,
        )?;

        let stats = ViewPopulator::populate(self.storage.as_ref(), &metadata, self.child.as_mut())?;
        info!(view = %metadata.name, batches = stats.batches, rows = stats.rows, "materialized view populated");

        Ok(MatViewOutcome::Created { metadata, batches: stats.batches, rows: stats.rows })
    }
}

impl Executor for CreateMaterializedViewExecutor {
    fn opr_type(&self) -> PlanOprType {
        PlanOprType::CreateMaterializedView
    }

    fn project_expr(&self) -> &[ProjectionExpression] {
        &[]
    }

    fn validate(&self) -> Result<(), ExecutorError> {
        ConflictResolver::check_shape(self.child.opr_type())?;
        self.child.validate()?;
        if !is_valid_dataset_name(&self.plan.view) {
            return Err(ExecutorError::InvalidDatasetName(self.plan.view.clone()));
        }
        SchemaDeriver::check_lengths(&self.plan.col_list, self.child.project_expr())
    }

    /// Runs the statement on the first pull and yields one status row
    /// holding the number of rows written.
    fn next_batch(&mut self) -> Result<Option<Batch>, ExecutorError> {
        if self.finished {
            return Ok(None);
        }
        self.finished = true;

        let outcome = self.run()?;
        Ok(Some(Batch::new(vec![Row(vec![Value::from(outcome.rows() as u64)])])))
    }
}

use tracing::warn;

use crate::{
    database::Catalog,
    executor::ExecutorError,
    planner::PlanOprType,
};

/// What to do with a create statement once the target name was looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Name is free; register and populate
    Proceed,
    /// Name is taken and IF NOT EXISTS was given; finish without writing
    Skip,
}

pub struct ConflictResolver;

impl ConflictResolver {
    /// Materialization only reads from sequential scans.
    pub fn check_shape(child: PlanOprType) -> Result<(), ExecutorError> {
        if child != PlanOprType::SequentialScan {
            return Err(ExecutorError::UnsupportedPlanShape {
                expected: PlanOprType::SequentialScan,
                found: child,
            });
        }
        Ok(())
    }

    pub fn resolve(catalog: &dyn Catalog, name: &str, if_not_exists: bool) -> Result<Resolution, ExecutorError> {
        match catalog.get_dataset_metadata(name)? {
            None => Ok(Resolution::Proceed),
            Some(existing) if if_not_exists => {
                warn!(dataset = %existing.name, "dataset already exists, skipping creation");
                Ok(Resolution::Skip)
            }
            Some(existing) => Err(ExecutorError::DatasetAlreadyExists(existing.name)),
        }
    }
}

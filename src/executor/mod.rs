use crate::{expression::ProjectionExpression, planner::PlanOprType};

pub mod row;
pub use row::*;

pub mod batch;
pub use batch::*;

pub mod executor_error;
pub use executor_error::*;

pub mod seq_scan;
pub use seq_scan::*;

pub mod limit;
pub use limit::*;

pub mod create_mat_view;
pub use create_mat_view::*;

pub mod plan_executor;
pub use plan_executor::*;


/// A pull-based operator.
///
/// Callers repeatedly ask for the next batch until `Ok(None)`; an operator
/// does no work for batch `n + 1` before it is asked for it.
pub trait Executor {
    fn opr_type(&self) -> PlanOprType;

    /// Output expressions, in output order.
    fn project_expr(&self) -> &[ProjectionExpression] {
        &[]
    }

    /// Structural checks that need no catalog or storage mutation.
    fn validate(&self) -> Result<(), ExecutorError> {
        Ok(())
    }

    fn next_batch(&mut self) -> Result<Option<Batch>, ExecutorError>;
}

use crate::{
    executor::{Batch, Executor, ExecutorError},
    expression::ProjectionExpression,
    planner::PlanOprType,
};

/// Passes through the first `limit` rows of its child, then stops pulling.
pub struct LimitExecutor {
    child: Box<dyn Executor>,
    limit: usize,
    emitted: usize,
}

impl LimitExecutor {
    pub fn new(child: Box<dyn Executor>, limit: usize) -> Self {
        Self { child, limit, emitted: 0 }
    }
}

impl Executor for LimitExecutor {
    fn opr_type(&self) -> PlanOprType {
        PlanOprType::Limit
    }

    fn project_expr(&self) -> &[ProjectionExpression] {
        self.child.project_expr()
    }

    fn validate(&self) -> Result<(), ExecutorError> {
        self.child.validate()
    }

    fn next_batch(&mut self) -> Result<Option<Batch>, ExecutorError> {
        if self.emitted >= self.limit {
            return Ok(None);
        }
        let Some(batch) = self.child.next_batch()? else {
            return Ok(None);
        };

        let remaining = self.limit - self.emitted;
        let rows = batch.into_rows().into_iter().take(remaining).collect::<Vec<_>>();
        self.emitted += rows.len();
        Ok(Some(Batch::new(rows)))
    }
}

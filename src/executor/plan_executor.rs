use crate::{
    executor::{CreateMaterializedViewExecutor, Executor, ExecutorError, LimitExecutor, SeqScanExecutor},
    planner::PlanNode,
    Db,
};

/// Turns a plan tree into an executor tree bound to a database.
pub struct PlanExecutor;

impl PlanExecutor {
    pub fn build(plan: &PlanNode, db: &Db) -> Result<Box<dyn Executor>, ExecutorError> {
        match plan {
            PlanNode::SeqScan(scan) => {
                let source = db.dataset(&scan.table)?;
                let exec = SeqScanExecutor::new(
                    source,
                    scan.columns.clone(),
                    db.storage().clone(),
                    db.config().effective_batch_size(),
                )?;
                Ok(Box::new(exec))
            }
            PlanNode::Limit(limit) => {
                let child = Self::build(&limit.child, db)?;
                Ok(Box::new(LimitExecutor::new(child, limit.limit)))
            }
            PlanNode::CreateMaterializedView(create) => {
                let child = Self::build(&create.child, db)?;
                Ok(Box::new(CreateMaterializedViewExecutor::new(
                    create.clone(),
                    child,
                    db.catalog().clone(),
                    db.storage().clone(),
                    db.config().clone(),
                )))
            }
        }
    }
}

use std::fmt::Display;

use crate::expression::ProjectionExpression;

/// Shape of a plan node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanOprType {
    SequentialScan,
    Limit,
    CreateMaterializedView,
}

impl Display for PlanOprType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlanOprType::SequentialScan => "SEQUENTIAL_SCAN",
            PlanOprType::Limit => "LIMIT",
            PlanOprType::CreateMaterializedView => "CREATE_MATERIALIZED_VIEW",
        };
        f.write_str(name)
    }
}

/// A requested output column of a created dataset. Position is the
/// position in the owning list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
}

impl ColumnDefinition {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

/// Read every row of `table` in storage order, producing `columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqScanPlan {
    pub table: String,
    pub columns: Vec<ProjectionExpression>,
}

/// Pass through at most `limit` rows of `child`.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitPlan {
    pub limit: usize,
    pub child: Box<PlanNode>,
}

/// `CREATE MATERIALIZED VIEW [IF NOT EXISTS] view (col_list) AS child`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMaterializedViewPlan {
    pub view: String,
    pub col_list: Vec<ColumnDefinition>,
    pub if_not_exists: bool,
    pub child: Box<PlanNode>,
}

impl CreateMaterializedViewPlan {
    pub fn new(view: &str, col_list: Vec<ColumnDefinition>, if_not_exists: bool, child: PlanNode) -> Self {
        Self {
            view: view.to_string(),
            col_list,
            if_not_exists,
            child: Box::new(child),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanNode {
    SeqScan(SeqScanPlan),
    Limit(LimitPlan),
    CreateMaterializedView(CreateMaterializedViewPlan),
}

impl PlanNode {
    pub fn seq_scan(table: &str, columns: Vec<ProjectionExpression>) -> Self {
        PlanNode::SeqScan(SeqScanPlan { table: table.to_string(), columns })
    }

    pub fn limit(limit: usize, child: PlanNode) -> Self {
        PlanNode::Limit(LimitPlan { limit, child: Box::new(child) })
    }

    pub fn opr_type(&self) -> PlanOprType {
        match self {
            PlanNode::SeqScan(_) => PlanOprType::SequentialScan,
            PlanNode::Limit(_) => PlanOprType::Limit,
            PlanNode::CreateMaterializedView(_) => PlanOprType::CreateMaterializedView,
        }
    }
}

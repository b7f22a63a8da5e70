use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    database::ColumnMetadata,
    executor::Row,
    expression::{ExpressionError, ProjectionExpression},
};

/// Source column name -> position in the source row.
pub type ColumnPositions = IndexMap<String, usize>;

pub struct Eval;

impl Eval {
    /// Fail if the expression reads a column the source does not have, or
    /// declares it with a type or array shape other than the source's.
    pub fn check_columns(expr: &ProjectionExpression, source: &[ColumnMetadata]) -> Result<(), ExpressionError> {
        for declared in expr.referenced_columns() {
            let Some(column) = source.iter().find(|c| c.name == declared.name) else {
                return Err(ExpressionError::UnknownColumn {
                    name: declared.name.clone(),
                    candidates: source.iter().map(|c| c.name.clone()).collect(),
                });
            };
            if !column.same_shape(declared) {
                return Err(ExpressionError::ColumnShapeMismatch {
                    name: declared.name.clone(),
                    source: column.clone(),
                    declared: declared.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn eval(expr: &ProjectionExpression, row: &Row, positions: &ColumnPositions) -> Result<Value, ExpressionError> {
        match expr {
            ProjectionExpression::Column(column) => {
                let position = positions
                    .get(&column.name)
                    .ok_or_else(|| Self::unknown(&column.name, positions))?;
                Ok(row.get(*position).cloned().unwrap_or(Value::Null))
            }
            ProjectionExpression::Function(f) => {
                let args = f.args
                    .iter()
                    .map(|a| Self::eval(a, row, positions))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(f.function.eval(args))
            }
            ProjectionExpression::Constant(literal) => Ok(literal.to_value()),
        }
    }

    /// Evaluate a whole projection list into a new positional row.
    pub fn project(exprs: &[ProjectionExpression], row: &Row, positions: &ColumnPositions) -> Result<Row, ExpressionError> {
        exprs
            .iter()
            .map(|e| Self::eval(e, row, positions))
            .collect::<Result<Vec<_>, _>>()
            .map(Row)
    }

    fn unknown(name: &str, positions: &ColumnPositions) -> ExpressionError {
        ExpressionError::UnknownColumn {
            name: name.to_string(),
            candidates: positions.keys().cloned().collect(),
        }
    }
}

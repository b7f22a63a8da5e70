use crate::{
    database::{Catalog, ColumnMetadata},
    executor::ExecutorError,
    expression::ProjectionExpression,
    planner::ColumnDefinition,
};

/// Derives the column list of a new dataset from the requested column
/// names and the child's projection list.
pub struct SchemaDeriver;

impl SchemaDeriver {
    pub fn check_lengths(col_list: &[ColumnDefinition], project_expr: &[ProjectionExpression]) -> Result<(), ExecutorError> {
        if col_list.len() != project_expr.len() {
            return Err(ExecutorError::SchemaMismatch {
                expected: col_list.len(),
                actual: project_expr.len(),
            });
        }
        Ok(())
    }

    /// Column `i` takes its name from `col_list[i]` and its type, array-ness
    /// and dimensions from `project_expr[i]`.
    pub fn derive(catalog: &dyn Catalog, col_list: &[ColumnDefinition], project_expr: &[ProjectionExpression]) -> Result<Vec<ColumnMetadata>, ExecutorError> {
        Self::check_lengths(col_list, project_expr)?;

        col_list
            .iter()
            .zip(project_expr)
            .enumerate()
            .map(|(position, (col_def, expr))| {
                let col_obj = match expr {
                    ProjectionExpression::Column(column) => column,
                    ProjectionExpression::Function(function) => &function.output,
                    ProjectionExpression::Constant(_) => {
                        return Err(ExecutorError::UnsupportedExpression {
                            position,
                            expression: expr.to_string(),
                        });
                    }
                };
                Ok(catalog.create_column_metadata(
                    &col_def.name,
                    col_obj.ty,
                    col_obj.is_array,
                    col_obj.array_dimensions.clone(),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        database::{ColumnType, MemoryCatalog},
        expression::{FunctionExpression, Literal, ScalarFunction},
    };

    fn defs(names: &[&str]) -> Vec<ColumnDefinition> {
        names.iter().map(|n| ColumnDefinition::new(n)).collect()
    }

    fn direct(name: &str, ty: ColumnType) -> ProjectionExpression {
        ProjectionExpression::column(ColumnMetadata::scalar(name, ty))
    }

    fn computed(output: ColumnMetadata) -> ProjectionExpression {
        ProjectionExpression::Function(FunctionExpression::with_output(ScalarFunction::Array, vec![], output))
    }

    #[test]
    fn test_derive_copies_types_positionally() {
        let catalog = MemoryCatalog::new();
        let exprs = vec![
            direct("id", ColumnType::Integer),
            computed(ColumnMetadata::array("features", ColumnType::Float, vec![3])),
            direct("label", ColumnType::Text),
        ];
        let columns = SchemaDeriver::derive(&catalog, &defs(&["a", "b", "c"]), &exprs).unwrap();

        assert_eq!(columns, vec![
            ColumnMetadata::scalar("a", ColumnType::Integer),
            ColumnMetadata::array("b", ColumnType::Float, vec![3]),
            ColumnMetadata::scalar("c", ColumnType::Text),
        ]);
    }

    #[test]
    fn test_derive_preserves_length_for_many_columns() {
        let catalog = MemoryCatalog::new();
        for n in 1..8 {
            let names = (0..n).map(|i| format!("c{i}")).collect::<Vec<_>>();
            let col_list = names.iter().map(|s| ColumnDefinition::new(s)).collect::<Vec<_>>();
            let exprs = (0..n).map(|i| direct(&format!("src{i}"), ColumnType::Integer)).collect::<Vec<_>>();

            let columns = SchemaDeriver::derive(&catalog, &col_list, &exprs).unwrap();
            assert_eq!(columns.len(), n);
            assert!(columns.iter().zip(&names).all(|(c, name)| &c.name == name));
        }
    }

    #[test]
    fn test_length_mismatch() {
        let catalog = MemoryCatalog::new();
        let exprs = vec![direct("x", ColumnType::Integer), direct("y", ColumnType::Integer)];
        let err = SchemaDeriver::derive(&catalog, &defs(&["a", "b", "c"]), &exprs).unwrap_err();
        assert_eq!(err, ExecutorError::SchemaMismatch { expected: 3, actual: 2 });
    }

    #[test]
    fn test_constant_projection_is_unsupported() {
        let catalog = MemoryCatalog::new();
        let exprs = vec![direct("x", ColumnType::Integer), ProjectionExpression::constant(Literal::Int(1))];
        let err = SchemaDeriver::derive(&catalog, &defs(&["a", "b"]), &exprs).unwrap_err();
        assert_eq!(err, ExecutorError::UnsupportedExpression { position: 1, expression: "1".into() });
    }

    #[test]
    fn test_empty_lists_derive_nothing() {
        let catalog = MemoryCatalog::new();
        assert!(SchemaDeriver::derive(&catalog, &[], &[]).unwrap().is_empty());
    }
}

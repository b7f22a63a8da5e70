use std::fmt::Display;

use crate::{
    database::ColumnMetadata,
    expression::{ExpressionError, Literal, ScalarFunction},
};

/// A computed projection: a function over other projections plus the
/// descriptor of what it produces.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpression {
    pub function: ScalarFunction,
    pub args: Vec<ProjectionExpression>,
    pub output: ColumnMetadata,
}

impl FunctionExpression {
    /// Build a function call, inferring its output descriptor from the
    /// arguments.
    pub fn new(output_name: &str, function: ScalarFunction, args: Vec<ProjectionExpression>) -> Result<Self, ExpressionError> {
        let descriptors = args.iter().map(ProjectionExpression::arg_descriptor).collect::<Vec<_>>();
        let output = function.output(output_name, &descriptors)?;
        Ok(Self { function, args, output })
    }

    /// Build a function call whose output descriptor was inferred elsewhere.
    pub fn with_output(function: ScalarFunction, args: Vec<ProjectionExpression>, output: ColumnMetadata) -> Self {
        Self { function, args, output }
    }
}

/// One entry of an operator's output list.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionExpression {
    /// Direct reference to a source column; carries the backing column
    Column(ColumnMetadata),
    /// Computed value; carries its output descriptor
    Function(FunctionExpression),
    /// Constant value; has neither a backing column nor an output descriptor
    Constant(Literal),
}

impl ProjectionExpression {
    pub fn column(column: ColumnMetadata) -> Self {
        ProjectionExpression::Column(column)
    }

    pub fn function(output_name: &str, function: ScalarFunction, args: Vec<ProjectionExpression>) -> Result<Self, ExpressionError> {
        FunctionExpression::new(output_name, function, args).map(ProjectionExpression::Function)
    }

    pub fn constant(literal: Literal) -> Self {
        ProjectionExpression::Constant(literal)
    }

    /// Output name of the expression.
    pub fn name(&self) -> String {
        match self {
            ProjectionExpression::Column(column) => column.name.clone(),
            ProjectionExpression::Function(f) => f.output.name.clone(),
            ProjectionExpression::Constant(literal) => literal.to_string(),
        }
    }

    /// Descriptor used when this expression is a function argument.
    /// NULL constants have none.
    pub(crate) fn arg_descriptor(&self) -> Option<ColumnMetadata> {
        match self {
            ProjectionExpression::Column(column) => Some(column.clone()),
            ProjectionExpression::Function(f) => Some(f.output.clone()),
            ProjectionExpression::Constant(literal) => literal
                .column_type()
                .map(|ty| ColumnMetadata::scalar(&literal.to_string(), ty)),
        }
    }

    /// Every source column the expression reads, as declared by the plan,
    /// in evaluation order.
    pub fn referenced_columns(&self) -> Vec<&ColumnMetadata> {
        match self {
            ProjectionExpression::Column(column) => vec![column],
            ProjectionExpression::Function(f) => f.args.iter().flat_map(|a| a.referenced_columns()).collect(),
            ProjectionExpression::Constant(_) => Vec::new(),
        }
    }
}

impl Display for ProjectionExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionExpression::Column(column) => f.write_str(&column.name),
            ProjectionExpression::Function(func) => {
                let args = func.args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(", ");
                write!(f, "{}({})", func.function, args)
            }
            ProjectionExpression::Constant(literal) => write!(f, "{literal}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ColumnType;
    use ordered_float::NotNan;

    fn col(name: &str, ty: ColumnType) -> ProjectionExpression {
        ProjectionExpression::column(ColumnMetadata::scalar(name, ty))
    }

    #[test]
    fn test_function_infers_output_from_args() {
        let expr = ProjectionExpression::function("emb", ScalarFunction::Array, vec![
            col("x", ColumnType::Float),
            col("y", ColumnType::Float),
            ProjectionExpression::constant(Literal::Float(NotNan::new(0.0).unwrap())),
        ]).unwrap();

        let ProjectionExpression::Function(f) = &expr else { panic!("expected function") };
        assert_eq!(f.output, ColumnMetadata::array("emb", ColumnType::Float, vec![3]));
        assert_eq!(expr.name(), "emb");
        assert_eq!(expr.to_string(), "array(x, y, 0)");
        let names = expr.referenced_columns().iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_function_rejects_bad_args() {
        let err = ProjectionExpression::function("u", ScalarFunction::Upper, vec![col("n", ColumnType::Integer)])
            .unwrap_err();
        assert!(matches!(err, ExpressionError::FunctionArgMismatch { .. }));
    }

    #[test]
    fn test_null_constant_has_no_descriptor() {
        assert_eq!(ProjectionExpression::constant(Literal::Null).arg_descriptor(), None);
        let d = ProjectionExpression::constant(Literal::Int(1)).arg_descriptor().unwrap();
        assert_eq!(d.ty, ColumnType::Integer);
    }

    #[test]
    fn test_nested_function_arguments() {
        let upper = ProjectionExpression::function("u", ScalarFunction::Upper, vec![col("name", ColumnType::Text)]).unwrap();
        let len = ProjectionExpression::function("n", ScalarFunction::Length, vec![upper]).unwrap();
        let ProjectionExpression::Function(f) = &len else { panic!("expected function") };
        assert_eq!(f.output.ty, ColumnType::Integer);
        assert_eq!(len.to_string(), "length(upper(name))");
    }
}

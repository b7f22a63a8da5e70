use std::fmt::Display;

use crate::database::{ColumnMetadata, ColumnType};

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// Arguments do not fit the function; `got` lists argument types (None = NULL)
    FunctionArgMismatch { name: String, expected: String, got: Vec<Option<ColumnType>> },
    UnknownColumn { name: String, candidates: Vec<String> },
    /// A column reference declares a type or array shape the source column does not have
    ColumnShapeMismatch { name: String, source: ColumnMetadata, declared: ColumnMetadata },
}

fn shape(column: &ColumnMetadata) -> String {
    if !column.is_array {
        return column.ty.to_string();
    }
    if column.array_dimensions.is_empty() {
        return format!("{}[]", column.ty);
    }
    let dims = column.array_dimensions.iter().map(|d| format!("[{d}]")).collect::<String>();
    format!("{}{dims}", column.ty)
}

impl Display for ExpressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpressionError::FunctionArgMismatch { name, expected, got } => {
                let got = got
                    .iter()
                    .map(|t| t.map(|t| t.to_string()).unwrap_or_else(|| "null".to_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "function {name} expects {expected}, got ({got})")
            }
            ExpressionError::UnknownColumn { name, candidates } =>
                write!(f, "unknown column {name}; available: {}", candidates.join(", ")),
            ExpressionError::ColumnShapeMismatch { name, source, declared } =>
                write!(f, "column {name} is {} in the source but referenced as {}", shape(source), shape(declared)),
        }
    }
}

impl std::error::Error for ExpressionError {}

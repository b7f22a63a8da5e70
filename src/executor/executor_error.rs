use std::fmt::Display;

use crate::{
    database::{CatalogError, StorageError},
    expression::ExpressionError,
    planner::PlanOprType,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ExecutorError {
    /// Requested column count differs from the child's projection count
    SchemaMismatch { expected: usize, actual: usize },
    /// Child operator has a shape this executor cannot consume
    UnsupportedPlanShape { expected: PlanOprType, found: PlanOprType },
    /// Projection kind without column type information: (position, expression)
    UnsupportedExpression { position: usize, expression: String },
    DatasetAlreadyExists(String),
    InvalidDatasetName(String),
    UnknownDataset(String),
    CatalogRegistrationFailure(CatalogError),
    StorageAllocationFailure(StorageError),
    StorageWriteFailure(StorageError),
    StorageReadFailure(StorageError),
    StorageDropFailure(StorageError),
    Catalog(CatalogError),
    Expression(ExpressionError),
}

impl Display for ExecutorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutorError::SchemaMismatch { expected, actual } =>
                write!(f, "projected columns mismatch, expected {expected} found {actual}"),
            ExecutorError::UnsupportedPlanShape { expected, found } =>
                write!(f, "invalid query {found}, expected {expected}"),
            ExecutorError::UnsupportedExpression { position, expression } =>
                write!(f, "projection {position} ({expression}) has no column type information"),
            ExecutorError::DatasetAlreadyExists(name) => write!(f, "dataset {name} already exists"),
            ExecutorError::InvalidDatasetName(name) => write!(f, "invalid dataset name {name:?}"),
            ExecutorError::UnknownDataset(name) => write!(f, "unknown dataset {name}"),
            ExecutorError::CatalogRegistrationFailure(e) => write!(f, "catalog registration failed: {e}"),
            ExecutorError::StorageAllocationFailure(e) => write!(f, "storage allocation failed: {e}"),
            ExecutorError::StorageWriteFailure(e) => write!(f, "storage write failed: {e}"),
            ExecutorError::StorageReadFailure(e) => write!(f, "storage read failed: {e}"),
            ExecutorError::StorageDropFailure(e) => write!(f, "storage drop failed: {e}"),
            ExecutorError::Catalog(e) => write!(f, "catalog error: {e}"),
            ExecutorError::Expression(e) => write!(f, "expression error: {e}"),
        }
    }
}

impl std::error::Error for ExecutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecutorError::CatalogRegistrationFailure(e) | ExecutorError::Catalog(e) => Some(e),
            ExecutorError::StorageAllocationFailure(e)
            | ExecutorError::StorageWriteFailure(e)
            | ExecutorError::StorageReadFailure(e)
            | ExecutorError::StorageDropFailure(e) => Some(e),
            ExecutorError::Expression(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CatalogError> for ExecutorError {
    fn from(e: CatalogError) -> Self {
        ExecutorError::Catalog(e)
    }
}

impl From<ExpressionError> for ExecutorError {
    fn from(e: ExpressionError) -> Self {
        ExecutorError::Expression(e)
    }
}

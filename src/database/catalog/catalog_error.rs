use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A dataset with this name is already registered
    AlreadyExists(String),
    /// Datasets need at least one column
    EmptySchema(String),
    /// Column name used twice in one dataset: (dataset, column)
    DuplicateColumn { dataset: String, column: String },
    /// The catalog cannot be accessed (poisoned lock)
    Unavailable,
    Io(String),
    Serde(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::AlreadyExists(name) => write!(f, "dataset {name} is already registered"),
            CatalogError::EmptySchema(name) => write!(f, "dataset {name} has no columns"),
            CatalogError::DuplicateColumn { dataset, column } =>
                write!(f, "dataset {dataset} declares column {column} more than once"),
            CatalogError::Unavailable => f.write_str("catalog is unavailable"),
            CatalogError::Io(message) => write!(f, "catalog io error: {message}"),
            CatalogError::Serde(message) => write!(f, "catalog snapshot error: {message}"),
        }
    }
}

impl std::error::Error for CatalogError {}

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Backing store for this location already exists
    AlreadyAllocated(String),
    /// No backing store at this location
    NotAllocated(String),
    /// A row does not match the dataset columns
    SchemaViolation { dataset: String, row: usize, reason: String },
    /// The storage engine cannot be accessed (poisoned lock)
    Unavailable,
    Io { path: String, message: String },
    Serde { path: String, message: String },
}

impl StorageError {
    pub(crate) fn io(path: &std::path::Path, e: &std::io::Error) -> Self {
        StorageError::Io { path: path.display().to_string(), message: e.to_string() }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::AlreadyAllocated(path) => write!(f, "storage already allocated at {path}"),
            StorageError::NotAllocated(path) => write!(f, "no storage allocated at {path}"),
            StorageError::SchemaViolation { dataset, row, reason } =>
                write!(f, "row {row} does not fit dataset {dataset}: {reason}"),
            StorageError::Unavailable => f.write_str("storage engine is unavailable"),
            StorageError::Io { path, message } => write!(f, "io error on {path}: {message}"),
            StorageError::Serde { path, message } => write!(f, "malformed data in {path}: {message}"),
        }
    }
}

impl std::error::Error for StorageError {}

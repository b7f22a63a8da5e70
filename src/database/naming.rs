use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::database::EngineConfig;

static DATASET_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap()
});

/// Catalog key for a dataset name. Names are case-insensitive.
pub fn normalize_name(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Whether `name` can be used as a dataset name (and therefore as a file
/// stem under the data directory).
pub fn is_valid_dataset_name(name: &str) -> bool {
    DATASET_NAME.is_match(name)
}

/// Backing storage location of a dataset: `<data_dir>/<name>.<ext>`.
///
/// Pure; no file is touched. Two names map to the same path only if they
/// normalize to the same catalog key.
pub fn generate_file_path(config: &EngineConfig, name: &str) -> PathBuf {
    config
        .data_dir
        .join(format!("{}.{}", normalize_name(name), config.file_extension))
}

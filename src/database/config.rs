use std::{fs, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};

/// Engine configuration shared by the catalog, the storage engine and the
/// executors.
///
/// - `data_dir` is the directory holding one backing file per dataset.
/// - `batch_size` is the number of rows a scan pulls per batch.
/// - `file_extension` is appended to the dataset name to form its file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory for dataset files
    pub data_dir: PathBuf,
    /// Rows per scanned batch
    pub batch_size: usize,
    /// Extension of dataset files, without the dot
    pub file_extension: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            batch_size: 1024,
            file_extension: "jsonl".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration rooted at `data_dir` with default batch size.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Replace the scan batch size; zero is clamped to one.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Effective batch size; a zero read from a config file counts as one.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    /// Load configuration from a JSON file. Missing keys take their default.
    pub fn load_from_file(file_path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(file_path)
            .map_err(|e| format!("could not read config file {}: {e}", file_path.display()))?;

        serde_json::from_str::<EngineConfig>(&content)
            .map_err(|e| format!("config file {} is not valid: {e}", file_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs::File, io::Write};
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::new();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.batch_size, 1024);
        assert_eq!(config.file_extension, "jsonl");
    }

    #[test]
    fn test_batch_size_is_clamped() {
        let config = EngineConfig::with_data_dir("/tmp/x").batch_size(0);
        assert_eq!(config.batch_size, 1);
    }

    #[test]
    fn test_load_from_file_fills_missing_keys() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("engine.json");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(br#"{ "data_dir": "/var/lib/views", "batch_size": 0 }"#).unwrap();

        let config = EngineConfig::load_from_file(&file_path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/views"));
        assert_eq!(config.effective_batch_size(), 1);
        assert_eq!(config.file_extension, "jsonl");
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("broken.json");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"{ not json").unwrap();

        let result = EngineConfig::load_from_file(&file_path);
        assert!(result.unwrap_err().contains("is not valid"));
    }

    #[test]
    fn test_load_from_file_missing() {
        let result = EngineConfig::load_from_file(Path::new("/definitely/not/here.json"));
        assert!(result.unwrap_err().contains("could not read"));
    }
}

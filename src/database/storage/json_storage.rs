use std::{
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, ErrorKind, Lines, Write},
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{
    database::{check_batch, BatchReader, DatasetMetadata, StorageEngine, StorageError},
    executor::{Batch, Row},
};

/// Storage engine writing one JSON-lines file per dataset.
///
/// Each line holds one row as an object keyed by column name, so files stay
/// readable by other tools. Rows are appended in write order and read back
/// in the same order.
#[derive(Debug, Default, Clone)]
pub struct JsonFileStorage;

impl JsonFileStorage {
    pub fn new() -> Self {
        Self
    }

    fn open_err(path: &Path, e: std::io::Error) -> StorageError {
        match e.kind() {
            ErrorKind::NotFound => StorageError::NotAllocated(path.display().to_string()),
            ErrorKind::AlreadyExists => StorageError::AlreadyAllocated(path.display().to_string()),
            _ => StorageError::io(path, &e),
        }
    }
}

impl StorageEngine for JsonFileStorage {
    fn create(&self, metadata: &DatasetMetadata) -> Result<(), StorageError> {
        let path = &metadata.file_url;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, &e))?;
        }

        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| Self::open_err(path, e))?;
        Ok(())
    }

    fn write(&self, metadata: &DatasetMetadata, batch: &Batch) -> Result<(), StorageError> {
        check_batch(metadata, batch)?;

        let path = &metadata.file_url;
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| Self::open_err(path, e))?;
        let mut w = BufWriter::new(file);

        for row in batch.rows() {
            let mut object = Map::new();
            for (column, value) in metadata.columns.iter().zip(row.values()) {
                object.insert(column.name.clone(), value.clone());
            }
            serde_json::to_writer(&mut w, &Value::Object(object))
                .map_err(|e| StorageError::Serde { path: path.display().to_string(), message: e.to_string() })?;
            w.write_all(b"\n").map_err(|e| StorageError::io(path, &e))?;
        }

        w.flush().map_err(|e| StorageError::io(path, &e))
    }

    fn read(&self, metadata: &DatasetMetadata, batch_size: usize) -> Result<BatchReader, StorageError> {
        let path = &metadata.file_url;
        let file = File::open(path).map_err(|e| Self::open_err(path, e))?;

        Ok(Box::new(JsonBatchReader {
            lines: BufReader::new(file).lines(),
            columns: metadata.column_names(),
            batch_size: batch_size.max(1),
            path: path.clone(),
            line_no: 0,
            done: false,
        }))
    }

    fn drop_dataset(&self, metadata: &DatasetMetadata) -> Result<(), StorageError> {
        let path = &metadata.file_url;
        fs::remove_file(path).map_err(|e| Self::open_err(path, e))
    }
}

/// Streams a JSON-lines file back as positional batches.
struct JsonBatchReader {
    lines: Lines<BufReader<File>>,
    columns: Vec<String>,
    batch_size: usize,
    path: PathBuf,
    line_no: usize,
    done: bool,
}

impl JsonBatchReader {
    fn parse_line(&self, line: &str) -> Result<Row, StorageError> {
        let malformed = |message: String| StorageError::Serde {
            path: self.path.display().to_string(),
            message: format!("line {}: {message}", self.line_no),
        };

        let value = serde_json::from_str::<Value>(line).map_err(|e| malformed(e.to_string()))?;
        let Value::Object(mut object) = value else {
            return Err(malformed("row is not a JSON object".to_string()));
        };

        let values = self.columns
            .iter()
            .map(|name| object.remove(name).unwrap_or(Value::Null))
            .collect();
        Ok(Row(values))
    }
}

impl Iterator for JsonBatchReader {
    type Item = Result<Batch, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut rows = Vec::with_capacity(self.batch_size);
        while rows.len() < self.batch_size {
            let Some(line) = self.lines.next() else {
                self.done = true;
                break;
            };
            self.line_no += 1;

            let parsed = line
                .map_err(|e| StorageError::io(&self.path, &e))
                .and_then(|line| {
                    if line.trim().is_empty() { Ok(None) } else { self.parse_line(&line).map(Some) }
                });

            match parsed {
                Ok(Some(row)) => rows.push(row),
                Ok(None) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        if rows.is_empty() {
            None
        } else {
            Some(Ok(Batch::new(rows)))
        }
    }
}

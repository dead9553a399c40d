//! Source module for the hotel migrator pipeline.
//!
//! Provides the `RecordSource` trait and its JSON implementations. A source
//! document is a single JSON object whose values are hotel records; keys are
//! arbitrary and only their order matters.
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::SourceError;

/// Trait for anything that can produce the ordered records of a source document.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Loads every record, in document order.
    async fn load(&self) -> Result<Vec<Value>, SourceError>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Reads the source document from a file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<Value>, SourceError> {
        load_records(&self.path).await
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a source document that is already in memory.
#[derive(Debug, Clone)]
pub struct JsonTextSource {
    text: String,
}

impl JsonTextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl RecordSource for JsonTextSource {
    async fn load(&self) -> Result<Vec<Value>, SourceError> {
        parse_records(&self.text)
    }

    fn describe(&self) -> String {
        format!("inline document ({} bytes)", self.text.len())
    }
}

/// Reads and parses the source document at `path`.
///
/// # Returns
///
/// * `Ok(Vec<Value>)` - The values of the top-level object, in document order
/// * `Err(SourceError::NotFound)` - `path` does not name a regular file we may read
/// * `Err(SourceError::Read)` - The file exists but could not be read
/// * `Err(SourceError::Parse)` / `Err(SourceError::InvalidShape)` - See [`parse_records`]
pub async fn load_records(path: &Path) -> Result<Vec<Value>, SourceError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|source| read_failure(path, source))?;
    if !metadata.is_file() {
        error!(path = %path.display(), "Source path is not a file");
        return Err(SourceError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| read_failure(path, source))?;
    parse_records(&text)
}

/// A path that is missing or that we may not open does not resolve to a
/// readable file; any other I/O failure is reported as a read error.
fn read_failure(path: &Path, source: std::io::Error) -> SourceError {
    match source.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
            error!(path = %path.display(), error = %source, "Source file not found or not readable");
            SourceError::NotFound {
                path: path.to_path_buf(),
            }
        }
        _ => SourceError::Read {
            path: path.to_path_buf(),
            source,
        },
    }
}

/// Parses an in-memory source document.
///
/// # Returns
///
/// * `Ok(Vec<Value>)` - The values of the top-level object, in document order
/// * `Err(SourceError::Parse)` - `text` is not valid JSON
/// * `Err(SourceError::InvalidShape)` - `text` is valid JSON but not an object
pub fn parse_records(text: &str) -> Result<Vec<Value>, SourceError> {
    let document: Value = serde_json::from_str(text).map_err(|e| {
        error!(error = %e, "Invalid JSON format");
        SourceError::Parse(e)
    })?;

    match document {
        Value::Object(records) => {
            debug!(records = records.len(), "Parsed source document");
            Ok(records.into_iter().map(|(_, record)| record).collect())
        }
        other => Err(SourceError::InvalidShape(format!(
            "expected an object of hotel records at the top level, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_records_keeps_document_order() {
        let records =
            parse_records(r#"{"b": {"property_id": 2}, "a": {"property_id": 1}, "c": {"property_id": 3}}"#)
                .unwrap();

        let ids: Vec<i64> = records
            .iter()
            .map(|r| r["property_id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_parse_records_rejects_malformed_json() {
        let result = parse_records(r#"{"0": {"property_id": 1,}"#);

        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_parse_records_rejects_non_object_document() {
        let result = parse_records(r#"[{"property_id": 1}]"#);

        match result {
            Err(SourceError::InvalidShape(message)) => assert!(message.contains("an array")),
            other => panic!("Expected InvalidShape, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_records("{}").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_records_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"0": {"property_id": 10000527}}"#).unwrap();

        let records = JsonFileSource::new(file.path()).load().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["property_id"], 10000527);
    }

    #[tokio::test]
    async fn test_load_records_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        let result = load_records(&missing).await;

        match result {
            Err(SourceError::NotFound { path }) => assert_eq!(path, missing),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_permission_denied_counts_as_not_found() {
        let path = Path::new("/srv/hotels.json");
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let invalid = std::io::Error::from(std::io::ErrorKind::InvalidData);

        assert!(matches!(read_failure(path, denied), SourceError::NotFound { .. }));
        assert!(matches!(read_failure(path, invalid), SourceError::Read { .. }));
    }

    #[tokio::test]
    async fn test_load_records_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let result = load_records(dir.path()).await;

        assert!(matches!(result, Err(SourceError::NotFound { .. })));
    }
}

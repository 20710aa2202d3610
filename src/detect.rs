//! Ingestion shape detection.

use crate::error::{Error, Result};
use crate::ingest::flat::FLAT_RECORDS_KEY;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// The two accepted input shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    /// Analysis result with discrete paragraphs and tables
    Structured,
    /// Unordered list of bounding-boxed text lines
    Flat,
}

impl std::fmt::Display for InputShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputShape::Structured => write!(f, "structured analysis result"),
            InputShape::Flat => write!(f, "flat OCR records"),
        }
    }
}

/// Keys that mark a structured analysis result.
const STRUCTURED_KEYS: [&str; 2] = ["paragraphs", "tables"];

/// Detect the ingestion shape of a JSON value.
///
/// Only the top-level container is inspected. A top-level array or an object
/// carrying `extracted_text` is flat; an object carrying `paragraphs` or
/// `tables` is structured. When both markers are present the flat one wins.
///
/// # Returns
/// * `Ok(InputShape)` for a recognizable container
/// * `Err(Error::InvalidIngestionShape)` otherwise
///
/// # Example
/// ```
/// use ocrlayout::detect::{detect_shape, InputShape};
/// use serde_json::json;
///
/// let shape = detect_shape(&json!({"paragraphs": []})).unwrap();
/// assert_eq!(shape, InputShape::Structured);
/// ```
pub fn detect_shape(value: &Value) -> Result<InputShape> {
    match value {
        Value::Array(_) => Ok(InputShape::Flat),
        Value::Object(object) => {
            if object.contains_key(FLAT_RECORDS_KEY) {
                Ok(InputShape::Flat)
            } else if STRUCTURED_KEYS.iter().any(|k| object.contains_key(*k)) {
                Ok(InputShape::Structured)
            } else {
                Err(Error::InvalidIngestionShape(format!(
                    "expected '{}', 'paragraphs' or 'tables'",
                    FLAT_RECORDS_KEY
                )))
            }
        }
        other => Err(Error::InvalidIngestionShape(format!(
            "expected a JSON object or array, found {}",
            json_kind(other)
        ))),
    }
}

/// Detect the ingestion shape of a JSON file.
pub fn detect_shape_from_path<P: AsRef<Path>>(path: P) -> Result<InputShape> {
    let data = fs::read(path)?;
    let value: Value = serde_json::from_slice(&data)?;
    detect_shape(&value)
}

/// Check if a JSON value is a recognizable OCR payload.
pub fn is_ocr_payload(value: &Value) -> bool {
    detect_shape(value).is_ok()
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
    use serde_json::json;

    #[test]
    fn test_detect_flat() {
        assert_eq!(detect_shape(&json!([])).unwrap(), InputShape::Flat);
        assert_eq!(
            detect_shape(&json!({"extracted_text": []})).unwrap(),
            InputShape::Flat
        );
    }

    #[test]
    fn test_detect_structured() {
        assert_eq!(
            detect_shape(&json!({"tables": []})).unwrap(),
            InputShape::Structured
        );
        assert_eq!(
            detect_shape(&json!({"paragraphs": [], "tables": []})).unwrap(),
            InputShape::Structured
        );
    }

    #[test]
    fn test_flat_marker_wins() {
        let value = json!({"extracted_text": [], "paragraphs": []});
        assert_eq!(detect_shape(&value).unwrap(), InputShape::Flat);
    }

    #[test]
    fn test_unrecognized() {
        assert!(detect_shape(&json!({"pages": []})).is_err());
        assert!(detect_shape(&json!(null)).is_err());
        let err = detect_shape(&json!("text")).unwrap_err();
        assert!(err.to_string().contains("a string"));
        assert!(!is_ocr_payload(&json!(3)));
    }

    #[test]
    fn test_detect_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocr.json");
        std::fs::write(&path, r#"{"extracted_text": []}"#).unwrap();
        assert_eq!(detect_shape_from_path(&path).unwrap(), InputShape::Flat);

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            detect_shape_from_path(&path),
            Err(Error::Json(_))
        ));
    }
}

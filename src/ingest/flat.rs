//! Flat OCR line records.
//!
//! The flat shape is an unordered list of recognized lines, each with its
//! text, a bounding box (4 or 8 interleaved coordinates) and an optional
//! confidence. It may be given as a bare array or wrapped as
//! `{"extracted_text": [...]}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::Fragment;

use super::Decoded;

/// Key wrapping the record list in the object form.
pub const FLAT_RECORDS_KEY: &str = "extracted_text";

/// A single recognized line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrRecord {
    /// Recognized text
    #[serde(default)]
    pub text: String,

    /// Interleaved polygon coordinates
    #[serde(rename = "boundingBox", alias = "bounding_box", alias = "polygon")]
    pub bounding_box: Vec<f64>,

    /// Recognition confidence in `[0, 1]`
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl OcrRecord {
    /// Create a record.
    pub fn new(text: impl Into<String>, bounding_box: Vec<f64>, confidence: Option<f64>) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            confidence,
        }
    }

    /// Decode a record list element by element.
    ///
    /// Accepts a bare array or an object with an `extracted_text` array.
    /// Elements that fail to decode are skipped and reported.
    pub fn decode_all(value: &Value) -> Result<Decoded<Vec<Self>>> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(object) => match object.get(FLAT_RECORDS_KEY) {
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Err(Error::InvalidIngestionShape(format!(
                        "'{}' must be a list",
                        FLAT_RECORDS_KEY
                    )))
                }
                None => {
                    return Err(Error::InvalidIngestionShape(format!(
                        "missing '{}'",
                        FLAT_RECORDS_KEY
                    )))
                }
            },
            _ => {
                return Err(Error::InvalidIngestionShape(
                    "flat OCR input must be a list of records".to_string(),
                ))
            }
        };

        let mut records = Vec::with_capacity(items.len());
        let mut issues = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match Self::deserialize(item) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("skipping fragment {}: {}", index, e);
                    issues.push(Error::invalid_record("fragment", index, e));
                }
            }
        }

        Ok(Decoded {
            input: records,
            issues,
        })
    }
}

impl From<OcrRecord> for Fragment {
    fn from(record: OcrRecord) -> Self {
        Fragment::new(record.text, record.bounding_box, record.confidence)
    }
}

impl From<&Fragment> for OcrRecord {
    fn from(fragment: &Fragment) -> Self {
        OcrRecord::new(
            fragment.text(),
            fragment.polygon().to_vec(),
            fragment.confidence(),
        )
    }
}

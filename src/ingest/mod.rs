//! Ingestion adapters.
//!
//! Two input shapes are accepted: a structured analysis result
//! ([`AnalysisResult`]) and a flat list of OCR line records ([`OcrRecord`]).
//! Both decode leniently: a bad element is skipped and reported, never fatal
//! to the rest of the input.

pub mod flat;
pub mod structured;

pub use flat::OcrRecord;
pub use structured::{
    AnalysisResult, AnalyzedCell, AnalyzedParagraph, AnalyzedSpan, AnalyzedTable, Appearance,
};

use serde::Serialize;
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use crate::detect::{detect_shape, InputShape};
use crate::error::{Error, Result};

/// Reconstruction input, dispatched on shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Input {
    /// Already-segmented paragraphs and tables
    Structured(AnalysisResult),
    /// Unordered bounding-boxed lines
    Flat(Vec<OcrRecord>),
}

impl Input {
    /// Detect the shape of a JSON value and decode it.
    pub fn from_value(value: &Value) -> Result<Decoded<Input>> {
        match detect_shape(value)? {
            InputShape::Flat => OcrRecord::decode_all(value).map(|d| d.map(Input::Flat)),
            InputShape::Structured => {
                AnalysisResult::decode(value).map(|d| d.map(Input::Structured))
            }
        }
    }

    /// The shape of this input.
    pub fn shape(&self) -> InputShape {
        match self {
            Input::Structured(_) => InputShape::Structured,
            Input::Flat(_) => InputShape::Flat,
        }
    }

    /// Serializable echo of this input.
    pub fn to_raw(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<AnalysisResult> for Input {
    fn from(result: AnalysisResult) -> Self {
        Input::Structured(result)
    }
}

impl From<Vec<OcrRecord>> for Input {
    fn from(records: Vec<OcrRecord>) -> Self {
        Input::Flat(records)
    }
}

/// A decoded input together with the elements that were skipped.
#[derive(Debug)]
pub struct Decoded<T> {
    /// Successfully decoded input
    pub input: T,
    /// One entry per skipped element
    pub issues: Vec<Error>,
}

impl<T> Decoded<T> {
    /// Wrap an input with no issues.
    pub fn clean(input: T) -> Self {
        Self {
            input,
            issues: Vec::new(),
        }
    }

    /// Transform the decoded input, keeping the issues.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        Decoded {
            input: f(self.input),
            issues: self.issues,
        }
    }
}

/// Source positions of the `count` elements of `kind` that survived decoding.
///
/// Skipped elements are the ones with an `InvalidRecord` issue of the same
/// kind, so survivors take the remaining positions in order.
pub fn source_positions(issues: &[Error], kind: &str, count: usize) -> Vec<usize> {
    let mut skipped: Vec<usize> = issues
        .iter()
        .filter_map(|issue| match issue {
            Error::InvalidRecord {
                kind: skipped_kind,
                index,
                ..
            } if *skipped_kind == kind => Some(*index),
            _ => None,
        })
        .collect();
    skipped.sort_unstable();

    (0..)
        .filter(|position| skipped.binary_search(position).is_err())
        .take(count)
        .collect()
}

/// Normalize fragment text.
///
/// Applies NFC composition when `nfc` is set so that visually identical text
/// compares equal regardless of how the recognizer encoded it.
pub fn normalize_text(text: &str, nfc: bool) -> String {
    if nfc {
        text.nfc().collect()
    } else {
        text.to_string()
    }
}

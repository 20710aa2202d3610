//! Structured analysis results.
//!
//! A structured result arrives already segmented into paragraphs (optionally
//! with per-span style metadata) and tables with authoritative cell indices.
//! Both snake_case and camelCase field names are accepted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Paragraph, TextStyle};

use super::Decoded;

/// A layout-analysis result with discrete paragraphs and tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Paragraphs in reading order
    #[serde(default)]
    pub paragraphs: Vec<AnalyzedParagraph>,

    /// Tables in source order
    #[serde(default)]
    pub tables: Vec<AnalyzedTable>,
}

impl AnalysisResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paragraph and return self.
    pub fn with_paragraph(mut self, paragraph: AnalyzedParagraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    /// Add a table and return self.
    pub fn with_table(mut self, table: AnalyzedTable) -> Self {
        self.tables.push(table);
        self
    }

    /// Decode a JSON object element by element.
    ///
    /// The `paragraphs` and `tables` keys, when present, must be arrays;
    /// otherwise the whole value is rejected. Elements that fail to decode
    /// are skipped and reported in [`Decoded::issues`].
    pub fn decode(value: &Value) -> Result<Decoded<Self>> {
        let object = value.as_object().ok_or_else(|| {
            Error::InvalidIngestionShape("structured result must be a JSON object".to_string())
        })?;

        let mut issues = Vec::new();
        let paragraphs = decode_array(object.get("paragraphs"), "paragraph", &mut issues)?;
        let tables = decode_array(object.get("tables"), "table", &mut issues)?;

        Ok(Decoded {
            input: Self { paragraphs, tables },
            issues,
        })
    }
}

fn decode_array<T: serde::de::DeserializeOwned>(
    value: Option<&Value>,
    kind: &'static str,
    issues: &mut Vec<Error>,
) -> Result<Vec<T>> {
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(Error::InvalidIngestionShape(format!(
                "'{}s' must be a list",
                kind
            )))
        }
    };

    let mut decoded = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match T::deserialize(item) {
            Ok(v) => decoded.push(v),
            Err(e) => {
                log::warn!("skipping {} {}: {}", kind, index, e);
                issues.push(Error::invalid_record(kind, index, e));
            }
        }
    }
    Ok(decoded)
}

/// A paragraph reported by the analysis service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedParagraph {
    /// Paragraph text
    pub content: String,

    /// Styled spans, if the service reported any
    #[serde(default)]
    pub spans: Vec<AnalyzedSpan>,
}

impl AnalyzedParagraph {
    /// Create an unstyled paragraph.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            spans: Vec::new(),
        }
    }

    /// Add a styled span and return self.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.spans.push(AnalyzedSpan {
            style: Some(style),
            appearance: None,
        });
        self
    }

    /// Styles of all spans that carry one.
    pub fn styles(&self) -> Vec<TextStyle> {
        self.spans.iter().filter_map(|s| s.effective_style()).collect()
    }

    /// Convert into a model paragraph.
    pub fn to_paragraph(&self) -> Paragraph {
        Paragraph::with_text(self.content.clone()).with_styles(self.styles())
    }
}

/// A span of a paragraph with optional style metadata.
///
/// The style may be given directly (`style`) or nested under
/// `appearance.style`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedSpan {
    /// Direct style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,

    /// Nested appearance block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<Appearance>,
}

impl AnalyzedSpan {
    /// The style of this span, preferring the direct one.
    pub fn effective_style(&self) -> Option<TextStyle> {
        self.style
            .clone()
            .or_else(|| self.appearance.as_ref().and_then(|a| a.style.clone()))
    }
}

/// Appearance block wrapping a span style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    /// The style
    #[serde(default)]
    pub style: Option<TextStyle>,
}

/// A table with declared dimensions and indexed cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedTable {
    /// Declared number of rows
    #[serde(alias = "rowCount")]
    pub row_count: usize,

    /// Declared number of columns
    #[serde(alias = "columnCount")]
    pub column_count: usize,

    /// Cells with content; positions may be missing
    #[serde(default)]
    pub cells: Vec<AnalyzedCell>,
}

impl AnalyzedTable {
    /// Create a table with no cells.
    pub fn new(row_count: usize, column_count: usize) -> Self {
        Self {
            row_count,
            column_count,
            cells: Vec::new(),
        }
    }

    /// Add a cell and return self.
    pub fn with_cell(mut self, row: usize, column: usize, content: impl Into<String>) -> Self {
        self.cells.push(AnalyzedCell::new(row, column, content));
        self
    }
}

/// A single table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedCell {
    /// Zero-based row
    #[serde(alias = "rowIndex")]
    pub row_index: usize,

    /// Zero-based column
    #[serde(alias = "columnIndex")]
    pub column_index: usize,

    /// Cell text
    #[serde(default)]
    pub content: String,
}

impl AnalyzedCell {
    /// Create a cell.
    pub fn new(row_index: usize, column_index: usize, content: impl Into<String>) -> Self {
        Self {
            row_index,
            column_index,
            content: content.into(),
        }
    }
}

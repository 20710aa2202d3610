//! Paragraph and text-style types.

use serde::{Deserialize, Serialize};

use super::Line;

/// A paragraph of text assembled from one or more lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Space-joined text of the source lines, in assembly order
    pub content: String,

    /// Lines this paragraph was assembled from (empty for paragraphs that
    /// arrive already segmented from a structured analysis result)
    pub source_lines: Vec<Line>,

    /// Style metadata reported by the source, one entry per styled span
    pub styles: Vec<TextStyle>,
}

impl Paragraph {
    /// Create a paragraph with plain text and no source lines.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            ..Default::default()
        }
    }

    /// Build a paragraph from assembled lines, joining their trimmed text
    /// with single spaces.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        let content = lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            content,
            source_lines: lines,
            styles: Vec::new(),
        }
    }

    /// Attach style metadata and return self.
    pub fn with_styles(mut self, styles: Vec<TextStyle>) -> Self {
        self.styles = styles;
        self
    }

    /// Trimmed paragraph text.
    pub fn trimmed(&self) -> &str {
        self.content.trim()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Check if any span of the paragraph is bold.
    pub fn is_bold(&self) -> bool {
        self.styles.iter().any(|s| s.is_bold)
    }

    /// Largest font size reported for any span.
    pub fn max_font_size(&self) -> Option<f64> {
        self.styles
            .iter()
            .filter_map(|s| s.font_size)
            .max_by(|a, b| a.total_cmp(b))
    }
}

/// Text styling reported by a structured analysis result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    #[serde(default, alias = "isBold")]
    pub is_bold: bool,

    /// Font size in points
    #[serde(default, alias = "fontSize")]
    pub font_size: Option<f64>,
}

impl TextStyle {
    /// Create a bold style.
    pub fn bold() -> Self {
        Self {
            is_bold: true,
            font_size: None,
        }
    }

    /// Create a style with the given font size.
    pub fn sized(font_size: f64) -> Self {
        Self {
            is_bold: false,
            font_size: Some(font_size),
        }
    }
}

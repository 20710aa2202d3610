//! # ocrlayout
//!
//! Document layout reconstruction from raw OCR output.
//!
//! This library takes the output of an OCR or layout-analysis service (an
//! unordered list of bounding-boxed text lines, or an already-segmented
//! analysis result) and reconstructs a structured document: reading-ordered
//! paragraphs, headings, list items, questions and tables.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ocrlayout::{reconstruct_file, render};
//!
//! fn main() -> ocrlayout::Result<()> {
//!     // Reconstruct an OCR result stored as JSON
//!     let doc = reconstruct_file("ocr.json")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two input shapes**: flat OCR lines or structured analysis results
//! - **Reading order**: vertical clustering of lines into paragraphs
//! - **Pluggable classification**: replaceable heading/list/question rules
//! - **Tables**: dense grids from cell-indexed results
//! - **Graceful degradation**: bad records become `Error` nodes, never panics
//! - **Parallel batches**: uses Rayon for many independent inputs

pub mod detect;
pub mod error;
pub mod ingest;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_shape, detect_shape_from_path, is_ocr_payload, InputShape};
pub use error::{Error, Result};
pub use ingest::{AnalysisResult, AnalyzedCell, AnalyzedParagraph, AnalyzedTable, Input, OcrRecord};
pub use model::{Document, DocumentNode, Fragment, Line, NodeKind, Paragraph, Table, TableMap, TextStyle};
pub use parser::{
    ClassificationPolicy, ClassificationRule, ErrorMode, HeadingConfig, LayoutParser, Rect,
    ReconstructOptions, RuleSet, ThresholdBoundary,
};
pub use render::{DocumentStats, JsonFormat, RenderOptions, TableFallback};

use rayon::prelude::*;
use serde_json::Value;
use std::path::Path;

/// Reconstruct a document from typed input with default options.
///
/// # Example
///
/// ```
/// use ocrlayout::{reconstruct, Input, OcrRecord};
///
/// let records = vec![OcrRecord::new("Hello", vec![0.0, 0.0, 40.0, 0.0, 40.0, 10.0, 0.0, 10.0], Some(0.98))];
/// let doc = reconstruct(Input::Flat(records));
/// assert_eq!(doc.paragraphs, vec!["Hello"]);
/// ```
pub fn reconstruct(input: Input) -> Document {
    LayoutParser::new().parse(input)
}

/// Reconstruct a document from typed input with custom options.
pub fn reconstruct_with_options(input: Input, options: &ReconstructOptions) -> Document {
    LayoutParser::with_options(options.clone()).parse(input)
}

/// Reconstruct a document from a JSON value of either shape.
///
/// Never fails: an unrecognizable value yields a document holding a single
/// `Error` node.
///
/// # Example
///
/// ```
/// use ocrlayout::{reconstruct_value, NodeKind};
/// use serde_json::json;
///
/// let doc = reconstruct_value(&json!({"paragraphs": [{"content": "Title"}]}));
/// assert_eq!(doc.nodes[0].kind, NodeKind::Heading);
/// ```
pub fn reconstruct_value(value: &Value) -> Document {
    LayoutParser::new().parse_value(value)
}

/// Reconstruct a document from a JSON value with custom options.
pub fn reconstruct_value_with_options(value: &Value, options: &ReconstructOptions) -> Document {
    LayoutParser::with_options(options.clone()).parse_value(value)
}

/// Reconstruct a document from a JSON string.
///
/// Fails only if the string is not valid JSON.
pub fn reconstruct_str(json: &str) -> Result<Document> {
    reconstruct_str_with_options(json, &ReconstructOptions::default())
}

/// Reconstruct a document from a JSON string with custom options.
pub fn reconstruct_str_with_options(json: &str, options: &ReconstructOptions) -> Result<Document> {
    let value: Value = serde_json::from_str(json)?;
    Ok(reconstruct_value_with_options(&value, options))
}

/// Reconstruct a document from a JSON file.
///
/// # Arguments
///
/// * `path` - Path to a JSON file holding OCR output
///
/// # Returns
///
/// A `Result` containing the reconstructed `Document`, or an error if the
/// file cannot be read or is not valid JSON.
///
/// # Example
///
/// ```no_run
/// use ocrlayout::reconstruct_file;
///
/// let doc = reconstruct_file("ocr.json").unwrap();
/// println!("Paragraphs: {}", doc.paragraphs.len());
/// ```
pub fn reconstruct_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    reconstruct_file_with_options(path, &ReconstructOptions::default())
}

/// Reconstruct a document from a JSON file with custom options.
///
/// # Example
///
/// ```no_run
/// use ocrlayout::{reconstruct_file_with_options, ReconstructOptions};
///
/// let options = ReconstructOptions::new()
///     .with_y_threshold(12.0)
///     .strict();
/// let doc = reconstruct_file_with_options("ocr.json", &options).unwrap();
/// ```
pub fn reconstruct_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ReconstructOptions,
) -> Result<Document> {
    let data = std::fs::read(path)?;
    let value: Value = serde_json::from_slice(&data)?;
    Ok(reconstruct_value_with_options(&value, options))
}

/// Reconstruct a document from a JSON file without blocking the runtime.
///
/// Only the file read is asynchronous; reconstruction itself is synchronous.
#[cfg(feature = "async")]
pub async fn reconstruct_file_async<P: AsRef<Path>>(
    path: P,
    options: &ReconstructOptions,
) -> Result<Document> {
    let data = tokio::fs::read(path).await?;
    let value: Value = serde_json::from_slice(&data)?;
    Ok(reconstruct_value_with_options(&value, options))
}

/// Reconstruct many independent inputs in parallel.
///
/// Output order matches input order.
pub fn reconstruct_batch(inputs: &[Value], options: &ReconstructOptions) -> Vec<Document> {
    let parser = LayoutParser::with_options(options.clone());
    let documents: Vec<Document> = inputs.par_iter().map(|v| parser.parse_value(v)).collect();
    log::debug!("reconstruct_batch: {} documents", documents.len());
    documents
}

/// Convert an OCR JSON file to Markdown.
///
/// # Example
///
/// ```no_run
/// use ocrlayout::to_markdown;
///
/// let markdown = to_markdown("ocr.json").unwrap();
/// std::fs::write("output.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = reconstruct_file(path)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert an OCR JSON file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = reconstruct_file(path)?;
    render::to_text(&doc, options)
}

/// Convert an OCR JSON file to document JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = reconstruct_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for reconstructing and rendering documents.
///
/// # Example
///
/// ```no_run
/// use ocrlayout::{OcrLayout, RuleSet};
///
/// let markdown = OcrLayout::new()
///     .with_y_threshold(15.0)
///     .with_rule_set(RuleSet::Structured)
///     .lenient()
///     .reconstruct_file("ocr.json")?
///     .to_markdown()?;
/// # Ok::<(), ocrlayout::Error>(())
/// ```
pub struct OcrLayout {
    options: ReconstructOptions,
    render_options: RenderOptions,
}

impl OcrLayout {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            options: ReconstructOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Set the vertical clustering threshold.
    pub fn with_y_threshold(mut self, threshold: f64) -> Self {
        self.options = self.options.with_y_threshold(threshold);
        self
    }

    /// Only merge lines strictly closer than the threshold.
    pub fn exclusive_threshold(mut self) -> Self {
        self.options = self.options.exclusive_threshold();
        self
    }

    /// Force a classifier rule subset.
    pub fn with_rule_set(mut self, rule_set: RuleSet) -> Self {
        self.options = self.options.with_rule_set(rule_set);
        self
    }

    /// Use a custom classification policy.
    pub fn with_policy(mut self, policy: ClassificationPolicy) -> Self {
        self.options = self.options.with_policy(policy);
        self
    }

    /// Drop fragments below a confidence floor.
    pub fn with_min_confidence(mut self, floor: f64) -> Self {
        self.options = self.options.with_min_confidence(floor);
        self
    }

    /// Skip bad records and report them in a trailing error node.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Replace the document with a single error node on any bad record.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Set render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Reconstruct typed input.
    pub fn reconstruct(self, input: Input) -> ReconstructResult {
        let document = reconstruct_with_options(input, &self.options);
        self.wrap(document)
    }

    /// Reconstruct a JSON value.
    pub fn reconstruct_value(self, value: &Value) -> ReconstructResult {
        let document = reconstruct_value_with_options(value, &self.options);
        self.wrap(document)
    }

    /// Reconstruct a JSON file.
    pub fn reconstruct_file<P: AsRef<Path>>(self, path: P) -> Result<ReconstructResult> {
        let document = reconstruct_file_with_options(path, &self.options)?;
        Ok(self.wrap(document))
    }

    fn wrap(self, document: Document) -> ReconstructResult {
        ReconstructResult {
            document,
            render_options: self.render_options,
        }
    }
}

impl Default for OcrLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of reconstructing a document.
pub struct ReconstructResult {
    /// The reconstructed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl ReconstructResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Node, paragraph and table counts.
    pub fn stats(&self) -> DocumentStats {
        DocumentStats::from_document(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

//! Final document assembly.

use serde_json::Value;

use crate::error::Error;
use crate::model::{Document, DocumentNode, Paragraph, TableMap};

use super::options::ErrorMode;

/// Everything the pipeline produced for one input.
#[derive(Debug, Default)]
pub struct DocumentParts {
    /// Classifier output
    pub nodes: Vec<DocumentNode>,
    /// Assembled paragraphs in reading order
    pub paragraphs: Vec<Paragraph>,
    /// Extracted tables
    pub tables: TableMap,
    /// Elements skipped along the way
    pub issues: Vec<Error>,
    /// Source echo
    pub raw: Value,
}

/// Composes pipeline outputs into a [`Document`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentAssembler {
    error_mode: ErrorMode,
}

impl DocumentAssembler {
    /// Create an assembler for the given error mode.
    pub fn new(error_mode: ErrorMode) -> Self {
        Self { error_mode }
    }

    /// Assemble the final document.
    ///
    /// Nodes keep classifier order. If the classifier produced nothing while
    /// paragraphs exist, one `Text` node per paragraph is emitted instead.
    /// Skipped elements become a single trailing `Error` node, or in strict
    /// mode replace the whole document.
    pub fn assemble(&self, parts: DocumentParts) -> Document {
        let DocumentParts {
            mut nodes,
            paragraphs,
            tables,
            issues,
            raw,
        } = parts;

        for issue in &issues {
            log::warn!("{}", issue);
        }

        if !issues.is_empty() && self.error_mode == ErrorMode::Strict {
            return Document::from_error(summarize_issues(&issues), raw);
        }

        if nodes.is_empty() && !paragraphs.is_empty() {
            log::debug!(
                "DocumentAssembler: no nodes classified, falling back to {} text nodes",
                paragraphs.len()
            );
            nodes = paragraphs
                .iter()
                .map(|p| DocumentNode::text(p.content.clone()))
                .collect();
        }

        if !issues.is_empty() {
            nodes.push(DocumentNode::error(summarize_issues(&issues)));
        }

        Document {
            nodes,
            paragraphs: paragraphs.into_iter().map(|p| p.content).collect(),
            tables,
            raw,
        }
    }
}

/// Human-readable summary of skipped elements.
pub fn summarize_issues(issues: &[Error]) -> String {
    let details: Vec<String> = issues.iter().map(|e| e.to_string()).collect();
    format!(
        "Skipped {} invalid record(s): {}",
        issues.len(),
        details.join("; ")
    )
}

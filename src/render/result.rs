//! Rendering result with statistics.

use crate::model::{Document, NodeKind};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, text, etc.)
    pub content: String,

    /// Document statistics
    pub stats: DocumentStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: DocumentStats) -> Self {
        Self { content, stats }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            stats: DocumentStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counts describing a reconstructed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of `Heading` nodes
    pub heading_count: u32,

    /// Number of `Text` nodes
    pub text_count: u32,

    /// Number of `List` nodes
    pub list_count: u32,

    /// Number of `Question` nodes
    pub question_count: u32,

    /// Number of `Error` nodes
    pub error_count: u32,

    /// Items attached to sections
    pub list_item_count: u32,

    /// Number of assembled paragraphs
    pub paragraph_count: u32,

    /// Number of extracted tables
    pub table_count: u32,

    /// Approximate word count of the rendered output
    pub word_count: u32,

    /// Character count of the rendered output (excluding whitespace)
    pub char_count: u32,
}

impl DocumentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect node, paragraph and table counts from a document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        for node in &doc.nodes {
            stats.add_node(node.kind);
            stats.list_item_count += node.items.len() as u32;
        }
        stats.paragraph_count = doc.paragraphs.len() as u32;
        stats.table_count = doc.tables.len() as u32;
        stats
    }

    /// Increment the counter for a node kind.
    pub fn add_node(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::Heading => self.heading_count += 1,
            NodeKind::Text => self.text_count += 1,
            NodeKind::List => self.list_count += 1,
            NodeKind::Question => self.question_count += 1,
            NodeKind::Error => self.error_count += 1,
        }
    }

    /// Count of nodes of one kind.
    pub fn node_count(&self, kind: NodeKind) -> u32 {
        match kind {
            NodeKind::Heading => self.heading_count,
            NodeKind::Text => self.text_count,
            NodeKind::List => self.list_count,
            NodeKind::Question => self.question_count,
            NodeKind::Error => self.error_count,
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        // Word count: whitespace-separated tokens
        self.word_count += text.split_whitespace().count() as u32;

        // Character count: non-whitespace characters
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &DocumentStats) {
        self.heading_count += other.heading_count;
        self.text_count += other.text_count;
        self.list_count += other.list_count;
        self.question_count += other.question_count;
        self.error_count += other.error_count;
        self.list_item_count += other.list_item_count;
        self.paragraph_count += other.paragraph_count;
        self.table_count += other.table_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentNode, Table};

    #[test]
    fn test_stats_count_text() {
        let mut stats = DocumentStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_stats_from_document() {
        let mut doc = Document::new();
        doc.nodes = vec![
            DocumentNode::heading("Title"),
            DocumentNode::list("List items:", vec!["- a".into(), "- b".into()]),
            DocumentNode::text("Body"),
            DocumentNode::error("bad"),
        ];
        doc.paragraphs = vec!["Title".into(), "- a".into(), "- b".into(), "Body".into()];
        doc.tables.insert(1, Table::blank(1, 1));

        let stats = DocumentStats::from_document(&doc);
        assert_eq!(stats.node_count(NodeKind::Heading), 1);
        assert_eq!(stats.list_count, 1);
        assert_eq!(stats.error_count, 1);
        assert_eq!(stats.question_count, 0);
        assert_eq!(stats.list_item_count, 2);
        assert_eq!(stats.paragraph_count, 4);
        assert_eq!(stats.table_count, 1);
    }

    #[test]
    fn test_stats_merge() {
        let mut stats1 = DocumentStats {
            paragraph_count: 5,
            table_count: 2,
            ..Default::default()
        };
        let stats2 = DocumentStats {
            paragraph_count: 3,
            table_count: 1,
            question_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.table_count, 3);
        assert_eq!(stats1.question_count, 4);
    }

    #[test]
    fn test_render_result_content_only() {
        let result = RenderResult::content_only("## Hello".to_string());
        assert_eq!(result.content_len(), 8);
        assert_eq!(result.stats, DocumentStats::default());
    }
}

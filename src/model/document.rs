//! Document-level types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Table, TableMap};

/// A reconstructed document.
///
/// This is the terminal artifact of a reconstruction: the ordered node tree,
/// the flat paragraph list, the extracted tables and an echo of the source
/// input for audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Structural nodes in reading order
    pub nodes: Vec<DocumentNode>,

    /// Paragraph texts in reading order
    pub paragraphs: Vec<String>,

    /// Tables keyed by 1-based index
    pub tables: TableMap,

    /// The original input, echoed verbatim
    pub raw: Value,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document consisting of a single error node.
    pub fn from_error(message: impl Into<String>, raw: Value) -> Self {
        Self {
            nodes: vec![DocumentNode::error(message)],
            raw,
            ..Self::default()
        }
    }

    /// Check if the document has no nodes, paragraphs or tables.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.paragraphs.is_empty() && self.tables.is_empty()
    }

    /// Get a table by number (1-indexed).
    pub fn table(&self, index: u32) -> Option<&Table> {
        self.tables.get(&index)
    }

    /// Iterate over nodes of the given kind.
    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &DocumentNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Count nodes of the given kind.
    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes_of(kind).count()
    }

    /// Check if reconstruction reported any problem.
    pub fn has_errors(&self) -> bool {
        self.nodes.iter().any(|n| n.kind == NodeKind::Error)
    }

    /// Get plain text content of the node tree.
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(|node| node.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A single structural element of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// What kind of element this is
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Element text
    pub content: String,

    /// Attached list items. Always present, empty unless this node is a
    /// section that collected list paragraphs.
    #[serde(default)]
    pub items: Vec<String>,
}

impl DocumentNode {
    /// Create a node with no items.
    pub fn new(kind: NodeKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            items: Vec::new(),
        }
    }

    /// Create a heading node.
    pub fn heading(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Heading, content)
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Text, content)
    }

    /// Create a question node.
    pub fn question(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Question, content)
    }

    /// Create an error node.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NodeKind::Error, message)
    }

    /// Create a list node with the given items.
    pub fn list(content: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            kind: NodeKind::List,
            content: content.into(),
            items,
        }
    }

    /// Whether list items may attach to this node.
    pub fn is_section(&self) -> bool {
        matches!(self.kind, NodeKind::Heading | NodeKind::List)
    }

    /// Get plain text of the node and its items.
    pub fn plain_text(&self) -> String {
        let mut lines = vec![self.content.clone()];
        lines.extend(self.items.iter().cloned());
        lines.join("\n")
    }
}

/// Kind of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A section heading; opens a section that list items attach to
    Heading,
    /// A regular paragraph
    Text,
    /// A list section synthesized for items with no open heading
    List,
    /// A numbered question (flat OCR input)
    Question,
    /// A problem encountered during reconstruction
    Error,
}

impl NodeKind {
    /// All kinds, in declaration order.
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Heading,
        NodeKind::Text,
        NodeKind::List,
        NodeKind::Question,
        NodeKind::Error,
    ];

    /// Display name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Heading => "Heading",
            NodeKind::Text => "Text",
            NodeKind::List => "List",
            NodeKind::Question => "Question",
            NodeKind::Error => "Error",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert!(!doc.has_errors());
        assert_eq!(doc.raw, Value::Null);
    }

    #[test]
    fn test_from_error() {
        let doc = Document::from_error("bad input", Value::Bool(true));
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.nodes[0].kind, NodeKind::Error);
        assert!(doc.nodes[0].items.is_empty());
        assert!(doc.paragraphs.is_empty());
        assert!(doc.has_errors());
    }

    #[test]
    fn test_node_serializes_items_when_empty() {
        let node = DocumentNode::text("Hello");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "Text", "content": "Hello", "items": []})
        );
    }

    #[test]
    fn test_counts_and_plain_text() {
        let mut doc = Document::new();
        doc.nodes.push(DocumentNode::heading("Intro:"));
        doc.nodes[0].items.push("- a".to_string());
        doc.nodes.push(DocumentNode::text("Body"));

        assert_eq!(doc.count(NodeKind::Heading), 1);
        assert_eq!(doc.count(NodeKind::List), 0);
        assert_eq!(doc.plain_text(), "Intro:\n- a\n\nBody");
        assert!(doc.nodes[0].is_section());
        assert!(!doc.nodes[1].is_section());
    }
}

//! Plain text rendering for reconstructed documents.

use crate::error::Result;
use crate::model::{Document, NodeKind};

use super::RenderOptions;

/// Convert a document to plain text.
///
/// Node contents and their items go one per line, with a blank line between
/// nodes. Tables follow, tab-separated.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut blocks: Vec<String> = doc
        .nodes
        .iter()
        .filter(|n| options.include_errors || n.kind != NodeKind::Error)
        .map(|n| n.plain_text())
        .collect();

    if options.include_tables {
        blocks.extend(
            doc.tables
                .values()
                .filter(|t| !t.is_empty())
                .map(|t| t.plain_text()),
        );
    }

    Ok(blocks.join("\n\n").trim().to_string())
}

//! Markdown rendering for reconstructed documents.

use crate::error::Result;
use crate::model::{Document, DocumentNode, NodeKind, Table};
use crate::parser::{is_numbered_item, BULLET_MARKERS};

use super::{DocumentStats, RenderOptions, RenderResult, TableFallback};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(self, doc: &Document) -> Result<String> {
        Ok(self.render_internal(doc))
    }

    /// Render a document to Markdown with statistics.
    pub fn render_with_stats(self, doc: &Document) -> Result<RenderResult> {
        let content = self.render_internal(doc);

        let mut stats = DocumentStats::from_document(doc);
        stats.count_text(&content);

        Ok(RenderResult::new(content, stats))
    }

    fn render_internal(&self, doc: &Document) -> String {
        let mut output = String::new();

        for node in &doc.nodes {
            self.render_node(&mut output, node);
        }

        if self.options.include_tables {
            for (number, table) in &doc.tables {
                self.render_table(&mut output, *number, table);
            }
        }

        output.trim().to_string()
    }

    fn render_node(&self, output: &mut String, node: &DocumentNode) {
        let content = self.escape(&node.content);

        match node.kind {
            NodeKind::Heading => {
                output.push_str(&"#".repeat(self.options.heading_level as usize));
                output.push(' ');
                output.push_str(&content);
                output.push_str("\n\n");
            }
            NodeKind::List => {
                output.push_str(&content);
                output.push_str("\n\n");
            }
            NodeKind::Question => {
                output.push_str(&format!("**{}**\n\n", content));
            }
            NodeKind::Text => {
                if content.is_empty() {
                    return;
                }
                output.push_str(&content);
                output.push_str("\n\n");
            }
            NodeKind::Error => {
                if self.options.include_errors {
                    output.push_str(&format!("> **Error:** {}\n\n", content));
                }
                return;
            }
        }

        if !node.items.is_empty() {
            for item in &node.items {
                self.render_list_item(output, item);
            }
            output.push('\n');
        }
    }

    fn render_list_item(&self, output: &mut String, item: &str) {
        let item = item.trim();

        // Numbered items are already valid ordered-list lines
        if is_numbered_item(item) {
            output.push_str(&self.escape(item));
            output.push('\n');
            return;
        }

        let body = item
            .strip_prefix(&BULLET_MARKERS[..])
            .map(str::trim_start)
            .unwrap_or(item);

        output.push(self.options.list_marker);
        output.push(' ');
        output.push_str(&self.escape(body));
        output.push('\n');
    }

    fn render_table(&self, output: &mut String, number: u32, table: &Table) {
        if table.is_empty() {
            return;
        }

        output.push_str(&format!("**Table {}**\n\n", number));

        match self.options.table_fallback {
            TableFallback::Markdown => self.render_table_markdown(output, table),
            TableFallback::Html => self.render_table_html(output, table),
        }
    }

    fn render_table_markdown(&self, output: &mut String, table: &Table) {
        let col_count = table.column_count();
        if col_count == 0 {
            return;
        }

        for (i, row) in table.rows().iter().enumerate() {
            output.push('|');
            for cell in row {
                let content = cell.replace('\n', " ").replace('|', "\\|");
                output.push_str(&format!(" {} |", content.trim()));
            }
            output.push('\n');

            // Separator after header row
            if i == 0 {
                output.push('|');
                for _ in 0..col_count {
                    output.push_str(" --- |");
                }
                output.push('\n');
            }
        }

        output.push('\n');
    }

    fn render_table_html(&self, output: &mut String, table: &Table) {
        output.push_str("<table>\n");

        for (i, row) in table.rows().iter().enumerate() {
            let tag = if i == 0 { "th" } else { "td" };
            output.push_str("<tr>");
            for cell in row {
                output.push_str(&format!("<{}>{}</{}>", tag, escape_html(cell), tag));
            }
            output.push_str("</tr>\n");
        }

        output.push_str("</table>\n\n");
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(nodes: Vec<DocumentNode>) -> Document {
        Document {
            nodes,
            ..Document::default()
        }
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
    }

    #[test]
    fn test_numbered_items_keep_their_marker() {
        let list = DocumentNode::list(
            "List items:",
            vec!["12) Twelfth".into(), ". nothing".into(), "1.5 kg".into()],
        );
        let result = to_markdown(&doc_with(vec![list]), &RenderOptions::new()).unwrap();
        assert_eq!(result, "List items:\n\n12) Twelfth\n- . nothing\n1.5 kg");
    }

    #[test]
    fn test_render_heading_with_items() {
        let mut heading = DocumentNode::heading("Summary:");
        heading.items = vec!["- item one".into(), "• item two".into(), "3. third".into()];

        let result = to_markdown(&doc_with(vec![heading]), &RenderOptions::new()).unwrap();
        assert_eq!(result, "## Summary:\n\n- item one\n- item two\n3. third");
    }

    #[test]
    fn test_render_kinds() {
        let doc = doc_with(vec![
            DocumentNode::question("1. What is it?"),
            DocumentNode::text("Plain."),
            DocumentNode::error("Skipped 1 invalid record(s)"),
        ]);

        let result = to_markdown(&doc, &RenderOptions::new()).unwrap();
        assert!(result.contains("**1. What is it?**"));
        assert!(result.contains("Plain."));
        assert!(result.contains("> **Error:** Skipped 1 invalid record(s)"));

        let result = to_markdown(&doc, &RenderOptions::new().with_errors(false)).unwrap();
        assert!(!result.contains("Error"));
    }

    #[test]
    fn test_custom_list_marker() {
        let list = DocumentNode::list("List items:", vec!["* starred".into()]);
        let options = RenderOptions::new().with_list_marker('+');
        let result = to_markdown(&doc_with(vec![list]), &options).unwrap();
        assert_eq!(result, "List items:\n\n+ starred");
    }

    #[test]
    fn test_render_table() {
        let mut doc = Document::new();
        doc.tables
            .insert(2, Table::from_rows(vec![vec!["Name", "Qty"], vec!["a|b", ""]]));

        let result = to_markdown(&doc, &RenderOptions::new()).unwrap();
        assert_eq!(
            result,
            "**Table 2**\n\n| Name | Qty |\n| --- | --- |\n| a\\|b |  |"
        );

        let html = to_markdown(
            &doc,
            &RenderOptions::new().with_table_fallback(TableFallback::Html),
        )
        .unwrap();
        assert!(html.contains("<tr><th>Name</th><th>Qty</th></tr>"));
        assert!(html.contains("<td>a|b</td>"));

        let none = to_markdown(&doc, &RenderOptions::new().with_tables(false)).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_render_with_stats() {
        let doc = doc_with(vec![
            DocumentNode::heading("Title"),
            DocumentNode::text("two words"),
        ]);
        let result = to_markdown_with_stats(&doc, &RenderOptions::new()).unwrap();
        assert_eq!(result.stats.heading_count, 1);
        assert_eq!(result.stats.text_count, 1);
        // "##", "Title", "two", "words"
        assert_eq!(result.stats.word_count, 4);
        assert_eq!(
            result.content,
            to_markdown(&doc, &RenderOptions::new()).unwrap()
        );
    }
}

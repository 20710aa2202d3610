//! Rendering options and configuration.

/// Options for rendering a reconstructed document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Markdown heading level used for `Heading` nodes (1-6)
    pub heading_level: u8,

    /// Character to use for list item markers
    pub list_marker: char,

    /// Render extracted tables after the node tree
    pub include_tables: bool,

    /// Render `Error` nodes
    pub include_errors: bool,

    /// How to render tables in Markdown
    pub table_fallback: TableFallback,

    /// Escape special Markdown characters in node text
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Markdown heading level.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Include or omit tables.
    pub fn with_tables(mut self, include: bool) -> Self {
        self.include_tables = include;
        self
    }

    /// Include or omit error nodes.
    pub fn with_errors(mut self, include: bool) -> Self {
        self.include_errors = include;
        self
    }

    /// Set the table fallback mode.
    pub fn with_table_fallback(mut self, fallback: TableFallback) -> Self {
        self.table_fallback = fallback;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            heading_level: 2,
            list_marker: '-',
            include_tables: true,
            include_errors: true,
            table_fallback: TableFallback::Markdown,
            escape_special_chars: true,
        }
    }
}

/// How to render tables in Markdown output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFallback {
    /// Pipe table with the first row as header
    #[default]
    Markdown,
    /// HTML table tags
    Html,
}

//! Table types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tables keyed by their 1-based position in the source.
pub type TableMap = BTreeMap<u32, Table>;

/// A dense rectangular grid of cell text.
///
/// Cells with no recognized content hold the empty string, so every row has
/// exactly `column_count` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a blank `row_count × column_count` grid.
    pub fn blank(row_count: usize, column_count: usize) -> Self {
        Self {
            rows: vec![vec![String::new(); column_count]; row_count],
        }
    }

    /// Create a table from rows of text values. Short rows are padded with
    /// empty cells to the width of the widest row.
    pub fn from_rows<S: Into<String>>(rows: impl IntoIterator<Item = Vec<S>>) -> Self {
        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of the grid.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Get the text of a cell (0-based indices).
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Set the text of a cell. Returns `false` if the position is outside
    /// the grid.
    pub fn set_cell(&mut self, row: usize, column: usize, text: impl Into<String>) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            Some(cell) => {
                *cell = text.into();
                true
            }
            None => false,
        }
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_table() {
        let table = Table::blank(2, 3);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.cell(1, 2), Some(""));
        assert_eq!(table.cell(2, 0), None);
    }

    #[test]
    fn test_set_cell() {
        let mut table = Table::blank(1, 1);
        assert!(table.set_cell(0, 0, "X"));
        assert!(!table.set_cell(0, 1, "Y"));
        assert_eq!(table.cell(0, 0), Some("X"));
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let table = Table::from_rows(vec![vec!["Name", "Age"], vec!["Alice"]]);
        assert_eq!(table.rows()[1], vec!["Alice".to_string(), String::new()]);
        assert_eq!(table.plain_text(), "Name\tAge\nAlice\t");
    }

    #[test]
    fn test_serializes_as_grid() {
        let table = Table::from_rows(vec![vec!["a", "b"]]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[["a","b"]]"#);
    }
}

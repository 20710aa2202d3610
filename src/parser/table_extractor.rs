//! Table reconstruction from cell-indexed analysis results.
//!
//! Structured analysis results report each table as a declared
//! `row_count × column_count` plus a sparse list of cells carrying
//! authoritative row/column indices. No spatial heuristics are needed: the
//! grid is filled directly from the indices.

use crate::error::{Error, Result};
use crate::ingest::AnalyzedTable;
use crate::model::{Table, TableMap};

/// Upper bound on `row_count × column_count`, and on each dimension, for a
/// single table.
pub const MAX_TABLE_CELLS: usize = 1_000_000;

/// Builds dense grids from cell-indexed tables.
#[derive(Debug, Clone)]
pub struct TableExtractor {
    max_cells: usize,
}

impl TableExtractor {
    /// Create a table extractor with the default size limit.
    pub fn new() -> Self {
        Self {
            max_cells: MAX_TABLE_CELLS,
        }
    }

    /// Create a table extractor with a custom size limit.
    pub fn with_max_cells(max_cells: usize) -> Self {
        Self { max_cells }
    }

    /// Build the grid for one table.
    ///
    /// Positions with no matching cell hold the empty string. When several
    /// cells claim the same position the first one wins. Cells outside the
    /// declared dimensions are ignored.
    pub fn extract(&self, table: &AnalyzedTable) -> Result<Table> {
        // Each dimension is bounded on its own: a zero-width grid still allocates its rows
        let oversized = table.row_count > self.max_cells
            || table.column_count > self.max_cells
            || table
                .row_count
                .checked_mul(table.column_count)
                .map_or(true, |cells| cells > self.max_cells);
        if oversized {
            return Err(Error::InvalidRecord {
                kind: "table",
                index: 0,
                reason: format!(
                    "{} x {} grid exceeds the {} cell limit",
                    table.row_count, table.column_count, self.max_cells
                ),
            });
        }

        let mut grid = Table::blank(table.row_count, table.column_count);
        let mut filled = vec![false; table.row_count * table.column_count];
        let mut ignored = 0usize;

        for cell in &table.cells {
            if cell.row_index >= table.row_count || cell.column_index >= table.column_count {
                ignored += 1;
                continue;
            }
            let slot = cell.row_index * table.column_count + cell.column_index;
            if !filled[slot] {
                filled[slot] = true;
                grid.set_cell(cell.row_index, cell.column_index, cell.content.clone());
            }
        }

        if ignored > 0 {
            log::warn!(
                "TableExtractor: ignored {} cell(s) outside the {} x {} grid",
                ignored,
                table.row_count,
                table.column_count
            );
        }

        Ok(grid)
    }

    /// Build grids for all tables, keyed by 1-based source position.
    ///
    /// A table that cannot be built is reported in the returned error list
    /// and its number is left unused; the others are unaffected.
    pub fn extract_all(&self, tables: &[AnalyzedTable]) -> (TableMap, Vec<Error>) {
        self.extract_at(tables.iter().enumerate())
    }

    /// Build grids for tables paired with their zero-based source positions.
    ///
    /// Used when earlier tables were dropped before extraction, so numbering
    /// still follows the source.
    pub fn extract_at<'a>(
        &self,
        tables: impl IntoIterator<Item = (usize, &'a AnalyzedTable)>,
    ) -> (TableMap, Vec<Error>) {
        let mut map = TableMap::new();
        let mut errors = Vec::new();
        let mut total = 0usize;

        for (i, table) in tables {
            total += 1;
            match self.extract(table) {
                Ok(grid) => {
                    map.insert(i as u32 + 1, grid);
                }
                Err(Error::InvalidRecord { kind, reason, .. }) => {
                    errors.push(Error::InvalidRecord {
                        kind,
                        index: i,
                        reason,
                    });
                }
                Err(e) => errors.push(Error::invalid_record("table", i, e)),
            }
        }

        log::debug!(
            "TableExtractor: {} of {} tables extracted",
            map.len(),
            total
        );
        (map, errors)
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

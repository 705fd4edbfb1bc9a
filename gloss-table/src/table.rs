//! In-memory tabular data
//!
//! [`Table`] is a header row plus a list of records, every record exactly as
//! wide as the header. Cells are plain strings and an empty cell is the
//! missing value. Rows are addressed by their dense zero-based index, which
//! doubles as the identity of a token record throughout the reviewer.

/// A flat table of string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Assemble a table from a header and pre-shaped rows.
    ///
    /// Every row must already have exactly one cell per column.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Table { columns, rows }
    }

    /// The header names, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Look up a column index by name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of a named column, appending an all-empty column when absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        match self.column(name) {
            Some(index) => index,
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
                self.columns.len() - 1
            }
        }
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A single cell. Panics when `row` or `col` is out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    /// Overwrite a single cell. Panics when `row` or `col` is out of range.
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) {
        self.rows[row][col] = value.into();
    }

    /// A full row of cells. Panics when `row` is out of range.
    pub fn row(&self, row: usize) -> &[String] {
        &self.rows[row]
    }

    /// Iterate over all rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    /// Append a row at the end. The row must match the header width.
    pub fn push_row(&mut self, cells: Vec<String>) {
        assert_eq!(cells.len(), self.columns.len(), "row width mismatch");
        self.rows.push(cells);
    }

    /// Insert a row so that it ends up at index `pos`.
    ///
    /// Positions past the current end append, mirroring how slice-based
    /// insertion behaves in dataframe tooling.
    pub fn insert_row(&mut self, pos: usize, cells: Vec<String>) {
        assert_eq!(cells.len(), self.columns.len(), "row width mismatch");
        let pos = pos.min(self.rows.len());
        self.rows.insert(pos, cells);
    }

    /// Remove and return the row at `pos`. Panics when `pos` is out of range.
    pub fn remove_row(&mut self, pos: usize) -> Vec<String> {
        self.rows.remove(pos)
    }

    /// Drop every row with an empty cell in any of the given columns.
    ///
    /// Returns the number of rows removed.
    pub fn drop_incomplete(&mut self, cols: &[usize]) -> usize {
        let before = self.rows.len();
        self.rows
            .retain(|row| cols.iter().all(|&col| !row[col].is_empty()));
        before - self.rows.len()
    }
}

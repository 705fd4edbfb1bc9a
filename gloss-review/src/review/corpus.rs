//! Corpus lookups by token
//!
//! The corpus table groups sentences under the token they were extracted
//! for. [`CorpusIndex`] carries the resolved column indices and answers the
//! two queries the reviewer needs: the distinct sentences for a token, and
//! the scoped rewrite that moves sentences to an edited token.

use gloss_table::Table;
use std::collections::HashSet;

/// Resolved grouping and text columns of the corpus table.
#[derive(Debug, Clone, Copy)]
pub struct CorpusIndex {
    group_col: usize,
    text_col: usize,
}

impl CorpusIndex {
    pub fn new(group_col: usize, text_col: usize) -> Self {
        CorpusIndex {
            group_col,
            text_col,
        }
    }

    /// Distinct sentence texts grouped under `key`, in table order.
    ///
    /// Duplicate texts keep their first occurrence. The result is empty when
    /// no corpus row carries the key.
    pub fn entries_for(&self, table: &Table, key: &str) -> Vec<String> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        for row in 0..table.len() {
            if table.cell(row, self.group_col) == key {
                let text = table.cell(row, self.text_col);
                if seen.insert(text.to_string()) {
                    entries.push(text.to_string());
                }
            }
        }
        entries
    }

    /// Move rows from `old_key` to `new_key` after a token edit.
    ///
    /// Only rows whose sentence text actually contains `new_key` are moved;
    /// each moved row also gets `annotation` written into `annotation_col`.
    /// Rows grouped under `old_key` whose text lacks the new spelling are
    /// left untouched. Returns the number of rows rewritten.
    pub fn rename_group(
        &self,
        table: &mut Table,
        old_key: &str,
        new_key: &str,
        annotation_col: usize,
        annotation: &str,
    ) -> usize {
        let mut renamed = 0;
        for row in 0..table.len() {
            if table.cell(row, self.group_col) == old_key
                && table.cell(row, self.text_col).contains(new_key)
            {
                table.set_cell(row, self.group_col, new_key);
                table.set_cell(row, annotation_col, annotation);
                renamed += 1;
            }
        }
        renamed
    }
}

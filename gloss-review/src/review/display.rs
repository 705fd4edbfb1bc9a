//! Display window for a single token
//!
//! [`DisplayWindow`] holds the per-token view state: the corpus sentences
//! for the token, the page scroll offset, the line selection used while
//! editing, and the candidate field values being edited. It is pure data
//! with no terminal types, so the paging and selection rules can be tested
//! without rendering.
//!
//! Two invariants hold at all times:
//! - `window_offset <= max(0, corpus.len() - window_size)`
//! - a set selection always points at an existing corpus line, i.e.
//!   `window_offset + selection < corpus.len()`

use super::edit;

/// View state for the token currently under review.
#[derive(Debug, Clone)]
pub struct DisplayWindow {
    /// Distinct corpus sentences for the token, in corpus order.
    corpus: Vec<String>,
    /// How many lines are scrolled off the top.
    window_offset: usize,
    /// Lines per page; at least 1.
    window_size: usize,
    /// Selected row within the visible page, set during an edit session.
    selection: Option<usize>,
    /// Working copy of the token's editable fields.
    candidate: Vec<String>,
    /// Candidate field under visual emphasis during an edit session.
    highlight: Option<usize>,
}

impl DisplayWindow {
    /// Create a window over `corpus` showing `window_size` lines per page.
    pub fn new(corpus: Vec<String>, candidate: Vec<String>, window_size: usize) -> Self {
        assert!(window_size > 0, "window size must be at least 1");
        DisplayWindow {
            corpus,
            window_offset: 0,
            window_size,
            selection: None,
            candidate,
            highlight: None,
        }
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn window_offset(&self) -> usize {
        self.window_offset
    }

    /// The corpus slice currently on screen.
    pub fn visible(&self) -> &[String] {
        let end = self.corpus.len().min(self.window_offset + self.window_size);
        &self.corpus[self.window_offset..end]
    }

    /// Scroll one page down, clamped so the last page stays full when the
    /// corpus allows it. Corpora shorter than a page never scroll.
    pub fn scroll_down(&mut self) {
        let bottom = self.corpus.len().saturating_sub(self.window_size);
        self.window_offset = bottom.min(self.window_offset + self.window_size);
    }

    /// Scroll one page up, clamped at the top.
    pub fn scroll_up(&mut self) {
        self.window_offset = self.window_offset.saturating_sub(self.window_size);
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// The corpus line under the selection cursor, if any.
    pub fn selected_line(&self) -> Option<&str> {
        self.selection
            .map(|row| self.corpus[self.window_offset + row].as_str())
    }

    /// Move the selection one line down, scrolling a page when it runs off
    /// the bottom of the screen. At the last corpus line this is a no-op.
    /// An unset selection lands on the top visible line.
    pub fn select_down(&mut self) {
        if self.corpus.is_empty() {
            return;
        }
        let row = match self.selection {
            None => {
                self.selection = Some(0);
                return;
            }
            Some(row) => row,
        };
        if self.window_offset + row + 1 >= self.corpus.len() {
            // Already on the last corpus line
            return;
        }
        if row + 1 >= self.window_size {
            self.selection = Some(0);
            self.scroll_down();
        } else {
            self.selection = Some(row + 1);
        }
    }

    /// Move the selection one line up, scrolling a page when it runs off
    /// the top. At the first corpus line this is a no-op. An unset
    /// selection lands on the top visible line.
    pub fn select_up(&mut self) {
        if self.corpus.is_empty() {
            return;
        }
        match self.selection {
            None => self.selection = Some(0),
            Some(0) => {
                if self.window_offset == 0 {
                    return;
                }
                self.selection = Some(self.window_size - 1);
                self.scroll_up();
            }
            Some(row) => self.selection = Some(row - 1),
        }
    }

    /// Start an edit session: select the top visible line (when there is
    /// one) and highlight the lookup field.
    pub fn begin_edit(&mut self) {
        if !self.corpus.is_empty() {
            self.selection = Some(0);
        }
        self.highlight = Some(0);
    }

    /// End an edit session, clearing selection and highlight.
    pub fn end_edit(&mut self) {
        self.selection = None;
        self.highlight = None;
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn set_highlight(&mut self, field: usize) {
        self.highlight = Some(field);
    }

    pub fn candidate(&self) -> &[String] {
        &self.candidate
    }

    /// One candidate field; empty for indices past the end.
    pub fn field(&self, index: usize) -> &str {
        self.candidate.get(index).map(String::as_str).unwrap_or("")
    }

    /// Replace the whole candidate, e.g. when undoing an edit session.
    pub fn set_candidate(&mut self, fields: Vec<String>) {
        self.candidate = fields;
    }

    pub fn push_field_char(&mut self, index: usize, ch: char) {
        if let Some(field) = self.candidate.get_mut(index) {
            field.push(ch);
        }
    }

    /// Remove the last character of a field; empty fields stay empty.
    pub fn pop_field_char(&mut self, index: usize) {
        if let Some(field) = self.candidate.get_mut(index) {
            field.pop();
        }
    }

    /// Grow the candidate token left by one character of the selected line.
    pub fn expand_left(&mut self) {
        self.apply_boundary(edit::expand_left);
    }

    /// Drop the first character of the candidate token.
    pub fn shrink_left(&mut self) {
        self.apply_boundary(edit::shrink_left);
    }

    /// Drop the last character of the candidate token.
    pub fn shrink_right(&mut self) {
        self.apply_boundary(edit::shrink_right);
    }

    /// Grow the candidate token right by one character of the selected line.
    pub fn expand_right(&mut self) {
        self.apply_boundary(edit::expand_right);
    }

    /// Run a boundary operation against the selected line. Without a
    /// selection, or when the operation does not apply, nothing changes.
    fn apply_boundary(&mut self, op: fn(&str, &str) -> Option<String>) {
        if self.candidate.is_empty() {
            return;
        }
        if let Some(token) = self
            .selected_line()
            .and_then(|line| op(line, &self.candidate[0]))
        {
            self.candidate[0] = token;
        }
    }
}

//! Review controller
//!
//! [`App`] holds the whole session: both tables, the review position, the
//! active input mode, and the display window for the current token. One
//! [`App::handle_key`] call processes one key press; rendering only reads
//! the state it leaves behind. The struct is terminal-free so the complete
//! key protocol can be driven in tests.
//!
//! Mode rules worth knowing:
//! - Navigation (`a`/`d`) and tag digits only work in [`Mode::Navigate`],
//!   so a token switch can never discard an in-flight edit.
//! - Digits after `:` jump as soon as the typed number is in range and the
//!   buffer keeps collecting, so `:`, `1`, `0` lands on token 10.
//! - A failed save never ends the session; it becomes the status line and
//!   all in-memory edits survive.

use super::corpus::CorpusIndex;
use super::display::DisplayWindow;
use crossterm::event::{KeyCode, KeyEvent};
use gloss_config::GlossConfig;
use gloss_table::{save_table, SaveError, StorePaths, Table};
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters accepted into the translation field.
static TRANSLATION_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 -]$").unwrap());

const SAVE_FAILED: &str = "Save failed. Check if the file is opened in another program.";

/// Input mode of the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Stepping through tokens and toggling tags
    #[default]
    Navigate,
    /// Collecting a `:` command
    Command,
    /// Adjusting the token boundary against corpus lines
    TokenEdit,
    /// Typing the translation field
    TranslationEdit,
}

/// Error raised when a session cannot be constructed from the given tables
/// and configuration. Always fatal at startup.
#[derive(Debug, Clone)]
pub enum SetupError {
    /// `tokens_cols` needs at least the lookup key and the translation
    TokenColumns(usize),
    MissingTokenColumn(String),
    MissingCorpusColumn(String),
    /// No rows left to review once `filter_na_cols` is applied
    EmptyTokens,
    DisplayRange,
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::TokenColumns(found) => write!(
                f,
                "tokens_cols must name at least two columns, found {}",
                found
            ),
            SetupError::MissingTokenColumn(name) => {
                write!(f, "token table has no column named '{}'", name)
            }
            SetupError::MissingCorpusColumn(name) => {
                write!(f, "corpus table has no column named '{}'", name)
            }
            SetupError::EmptyTokens => write!(f, "token table has no rows to review"),
            SetupError::DisplayRange => write!(f, "display_range must be at least 1"),
        }
    }
}

impl std::error::Error for SetupError {}

/// The full state of a review session.
#[derive(Debug)]
pub struct App {
    tokens: Table,
    corpus: Table,
    /// Editable token columns, `tokens_cols` order: lookup key first.
    token_cols: Vec<usize>,
    /// Tag columns, digit-key order.
    tag_cols: Vec<usize>,
    tag_names: Vec<String>,
    corpus_index: CorpusIndex,
    /// Corpus column that receives the translation on commit.
    annotation_col: usize,
    position: usize,
    pub mode: Mode,
    /// Tag states of the current token, flushed into the table on
    /// navigation, jumps and saves.
    tags: Vec<bool>,
    /// Pending `:` command, including the colon.
    command: String,
    status: String,
    pub window: DisplayWindow,
    window_size: usize,
    paths: StorePaths,
    pub should_quit: bool,
}

impl App {
    /// Build a session over the two tables, validating the configured
    /// column names and materializing missing tag columns.
    pub fn new(
        mut tokens: Table,
        mut corpus: Table,
        config: &GlossConfig,
        paths: StorePaths,
    ) -> Result<Self, SetupError> {
        if config.ui.display_range == 0 {
            return Err(SetupError::DisplayRange);
        }
        if config.input.tokens_cols.len() < 2 {
            return Err(SetupError::TokenColumns(config.input.tokens_cols.len()));
        }

        let mut token_cols = Vec::with_capacity(config.input.tokens_cols.len());
        for name in &config.input.tokens_cols {
            let col = tokens
                .column(name)
                .ok_or_else(|| SetupError::MissingTokenColumn(name.clone()))?;
            token_cols.push(col);
        }

        let mut filter_cols = Vec::with_capacity(config.input.filter_na_cols.len());
        for name in &config.input.filter_na_cols {
            let col = tokens
                .column(name)
                .ok_or_else(|| SetupError::MissingTokenColumn(name.clone()))?;
            filter_cols.push(col);
        }
        tokens.drop_incomplete(&filter_cols);
        if tokens.is_empty() {
            return Err(SetupError::EmptyTokens);
        }

        let mut tag_cols = Vec::with_capacity(config.ui.options.len());
        for name in &config.ui.options {
            tag_cols.push(tokens.ensure_column(name));
        }

        let group_col = corpus
            .column(&config.input.corpus_group_col)
            .ok_or_else(|| SetupError::MissingCorpusColumn(config.input.corpus_group_col.clone()))?;
        let text_col = corpus
            .column(&config.input.corpus_text_col)
            .ok_or_else(|| SetupError::MissingCorpusColumn(config.input.corpus_text_col.clone()))?;
        let annotation_col = corpus.ensure_column(&config.input.tokens_cols[1]);

        let mut app = App {
            tokens,
            corpus,
            token_cols,
            tag_cols,
            tag_names: config.ui.options.clone(),
            corpus_index: CorpusIndex::new(group_col, text_col),
            annotation_col,
            position: 0,
            mode: Mode::Navigate,
            tags: Vec::new(),
            command: String::new(),
            status: String::new(),
            window: DisplayWindow::new(Vec::new(), Vec::new(), config.ui.display_range),
            window_size: config.ui.display_range,
            paths,
            should_quit: false,
        };
        app.goto_token(0);
        Ok(app)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// The pending `:` buffer shown while a command is being typed.
    pub fn command_buffer(&self) -> &str {
        &self.command
    }

    pub fn tag_names(&self) -> &[String] {
        &self.tag_names
    }

    /// Tag states of the current token, in `tag_names` order.
    pub fn tags(&self) -> &[bool] {
        &self.tags
    }

    pub fn tokens(&self) -> &Table {
        &self.tokens
    }

    pub fn corpus(&self) -> &Table {
        &self.corpus
    }

    /// Process one key press according to the active mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Navigate => self.handle_navigate_key(key),
            Mode::Command => self.handle_command_key(key),
            Mode::TokenEdit => self.handle_token_edit_key(key),
            Mode::TranslationEdit => self.handle_translation_edit_key(key),
        }
    }

    fn handle_navigate_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('a') => {
                self.flush_tags();
                let len = self.tokens.len();
                self.goto_token((self.position + len - 1) % len);
            }
            KeyCode::Char('d') => {
                self.flush_tags();
                self.goto_token((self.position + 1) % self.tokens.len());
            }
            KeyCode::Char('w') => self.window.scroll_up(),
            KeyCode::Char('s') => self.window.scroll_down(),
            KeyCode::Char(':') => {
                self.command = ":".to_string();
                self.mode = Mode::Command;
            }
            KeyCode::Char(c) => self.toggle_tag(c),
            _ => {}
        }
    }

    /// Digit keys 1..9 toggle the tag at that position. Everything else
    /// that reaches here is ignored.
    fn toggle_tag(&mut self, c: char) {
        if let Some(digit) = c.to_digit(10) {
            let index = digit as usize;
            if index >= 1 && index <= self.tags.len() {
                self.tags[index - 1] = !self.tags[index - 1];
            }
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.flush_tags();
                self.command.clear();
                self.mode = Mode::Navigate;
                match self.save_backup() {
                    Ok(()) => {
                        self.status = "Exiting".to_string();
                        self.should_quit = true;
                    }
                    Err(_) => self.status = SAVE_FAILED.to_string(),
                }
            }
            KeyCode::Char('e') => {
                self.flush_tags();
                self.command.clear();
                self.mode = Mode::Navigate;
                match self.save_primary() {
                    Ok(()) => self.status = "Saved".to_string(),
                    Err(_) => self.status = SAVE_FAILED.to_string(),
                }
            }
            KeyCode::Char('f') => {
                self.command.clear();
                self.mode = Mode::TokenEdit;
                self.window.begin_edit();
                self.status = "Edit token".to_string();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.command.push(c);
                match self.command[1..].parse::<usize>() {
                    Ok(pos) if pos < self.tokens.len() => {
                        self.flush_tags();
                        self.goto_token(pos);
                        // Stay in command mode; further digits extend the jump.
                    }
                    _ => {
                        self.command.clear();
                        self.status = "Invalid position".to_string();
                        self.mode = Mode::Navigate;
                    }
                }
            }
            _ => {
                self.command.clear();
                self.status = "Invalid command".to_string();
                self.mode = Mode::Navigate;
            }
        }
    }

    fn handle_token_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('w') => self.window.select_up(),
            KeyCode::Char('s') => self.window.select_down(),
            KeyCode::PageUp => self.window.scroll_up(),
            KeyCode::PageDown => self.window.scroll_down(),
            KeyCode::Char('z') => self.window.expand_left(),
            KeyCode::Char('x') => self.window.shrink_left(),
            KeyCode::Char('c') => self.window.shrink_right(),
            KeyCode::Char('v') => self.window.expand_right(),
            KeyCode::Char('b') => {
                // Undo: back to the fields as persisted at session start.
                let fields = self.record_fields();
                self.window.set_candidate(fields);
            }
            KeyCode::Tab => {
                self.mode = Mode::TranslationEdit;
                self.window.set_highlight(1);
                self.status = format!("Editing translation: {}", self.window.field(1));
            }
            KeyCode::Enter => self.commit_token(),
            _ => {}
        }
    }

    fn handle_translation_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.mode = Mode::TokenEdit;
                self.window.set_highlight(0);
                self.status = "Edit token".to_string();
            }
            KeyCode::Char(c) if TRANSLATION_CHAR.is_match(&c.to_string()) => {
                self.window.push_field_char(1, c);
                self.status = format!("Editing translation: {}", self.window.field(1));
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.window.pop_field_char(1);
                self.status = format!("Editing translation: {}", self.window.field(1));
            }
            _ => {}
        }
    }

    /// Jump to a token: rebuild the window and the tag mirror for it.
    fn goto_token(&mut self, pos: usize) {
        self.position = pos;
        let key = self.tokens.cell(pos, self.token_cols[0]).to_string();
        let entries = self.corpus_index.entries_for(&self.corpus, &key);
        self.window = DisplayWindow::new(entries, self.record_fields(), self.window_size);
        self.tags = self
            .tag_cols
            .iter()
            .map(|&col| self.tokens.cell(pos, col) == "y")
            .collect();
    }

    /// The persisted editable fields of the current record.
    fn record_fields(&self) -> Vec<String> {
        self.token_cols
            .iter()
            .map(|&col| self.tokens.cell(self.position, col).to_string())
            .collect()
    }

    /// Write the tag mirror back into the current record as "y" / empty.
    fn flush_tags(&mut self) {
        for (&col, &on) in self.tag_cols.iter().zip(&self.tags) {
            self.tokens
                .set_cell(self.position, col, if on { "y" } else { "" });
        }
    }

    /// Apply the edit session: move matching corpus rows to the new token
    /// spelling and overwrite the record's editable fields.
    fn commit_token(&mut self) {
        let old_key = self
            .tokens
            .cell(self.position, self.token_cols[0])
            .to_string();
        let fields: Vec<String> = self.window.candidate().to_vec();
        self.corpus_index.rename_group(
            &mut self.corpus,
            &old_key,
            &fields[0],
            self.annotation_col,
            &fields[1],
        );
        for (&col, value) in self.token_cols.iter().zip(&fields) {
            self.tokens.set_cell(self.position, col, value.clone());
        }
        self.window.end_edit();
        self.status.clear();
        self.mode = Mode::Navigate;
    }

    fn save_primary(&self) -> Result<(), SaveError> {
        save_table(&self.tokens, &self.paths.tokens)?;
        save_table(&self.corpus, &self.paths.corpus)
    }

    fn save_backup(&self) -> Result<(), SaveError> {
        save_table(&self.tokens, &self.paths.tokens_backup)?;
        save_table(&self.corpus, &self.paths.corpus_backup)
    }
}

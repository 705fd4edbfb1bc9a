//! Test infrastructure for the reviewer
//!
//! Provides utilities for testing the full application including:
//! - TestApp: wrapper driving the app against a test backend
//! - Keyboard helpers: easy creation of keyboard events
//! - Render helpers: getting and verifying UI output
//! - CSV fixtures: small token and corpus tables

use super::app::{App, Mode};
use super::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gloss_config::{load_defaults, GlossConfig};
use gloss_table::{codec, StorePaths};
use ratatui::backend::{Backend, TestBackend};
use ratatui::Terminal;
use std::fs;
use tempfile::TempDir;

const SAMPLE_TOKENS: &str = "\
token,translation
cat,gato
dog,perro
bird,pájaro
";

const SAMPLE_CORPUS: &str = "\
token,text
cat,the cat sat on the mat
cat,a black cat crossed the road
dog,the dog barked at the cat
bird,a bird sang at dawn
";

/// Test application wrapper with test backend
pub struct TestApp {
    app: App,
    terminal: Terminal<TestBackend>,
    paths: StorePaths,
    _dir: TempDir,
}

#[allow(dead_code)]
impl TestApp {
    /// Create a test app over the sample tables
    pub fn new() -> Self {
        Self::with_csv(SAMPLE_TOKENS, SAMPLE_CORPUS)
    }

    /// Create a test app with specific CSV content
    pub fn with_csv(tokens_csv: &str, corpus_csv: &str) -> Self {
        Self::with_config(tokens_csv, corpus_csv, default_config())
    }

    /// Create a test app with a custom page size
    pub fn with_display_range(tokens_csv: &str, corpus_csv: &str, display_range: usize) -> Self {
        let mut config = default_config();
        config.ui.display_range = display_range;
        Self::with_config(tokens_csv, corpus_csv, config)
    }

    fn with_config(tokens_csv: &str, corpus_csv: &str, config: GlossConfig) -> Self {
        let tokens = codec::parse(tokens_csv).expect("token fixture should parse");
        let corpus = codec::parse(corpus_csv).expect("corpus fixture should parse");

        let dir = TempDir::new().expect("Failed to create temp dir");
        let paths = StorePaths::new(
            dir.path(),
            "tokens.csv",
            "tokens_backup.csv",
            "corpus.csv",
            "corpus_backup.csv",
        );
        let app =
            App::new(tokens, corpus, &config, paths.clone()).expect("Failed to set up test app");

        // Create terminal with reasonable default size (80x24)
        let backend = TestBackend::new(80, 24);
        let terminal = Terminal::new(backend).expect("Failed to create terminal");

        TestApp {
            app,
            terminal,
            paths,
            _dir: dir,
        }
    }

    /// Send a keyboard event and return the rendered output
    pub fn send_key(&mut self, code: KeyCode) -> String {
        self.send_key_with_modifiers(code, KeyModifiers::empty())
    }

    /// Send a keyboard event with modifiers and return the rendered output
    pub fn send_key_with_modifiers(&mut self, code: KeyCode, modifiers: KeyModifiers) -> String {
        let key = KeyEvent::new(code, modifiers);
        self.app.handle_key(key);
        self.render()
    }

    /// Render the current application state and return output
    pub fn render(&mut self) -> String {
        self.terminal
            .draw(|frame| {
                ui::render(frame, &self.app);
            })
            .expect("Failed to draw");

        self.terminal_output()
    }

    /// Get the current terminal output as a string
    fn terminal_output(&self) -> String {
        let backend = self.terminal.backend();
        let (width, height) = (
            backend.size().unwrap().width,
            backend.size().unwrap().height,
        );
        let mut output = String::new();

        for y in 0..height {
            for x in 0..width {
                if let Some(cell) = backend.buffer().cell((x, y)) {
                    output.push_str(cell.symbol());
                } else {
                    output.push(' ');
                }
            }
            output.push('\n');
        }

        output
    }

    /// Get reference to the app for assertions
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get mutable reference to the app for direct state manipulation
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Output locations the app saves to
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.app.should_quit
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

fn default_config() -> GlossConfig {
    load_defaults().expect("default config should deserialize")
}

fn many_tokens_csv(count: usize) -> String {
    let mut csv = String::from("token,translation\n");
    for i in 0..count {
        csv.push_str(&format!("tok{i},gloss{i}\n"));
    }
    csv
}

/// Helper functions for creating keyboard events
#[allow(dead_code)]
pub mod keyboard {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    /// Create a key event with no modifiers
    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    /// Create a key event with Ctrl modifier
    pub fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    /// Create a key event with Shift modifier
    pub fn shift(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::SHIFT)
    }

    /// Create a key event with Alt modifier
    pub fn alt(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::ALT)
    }
}

// ========== Navigation Tests ==========

#[test]
fn test_initial_state_shows_the_first_token() {
    let mut app = TestApp::new();

    assert_eq!(app.app().position(), 0);
    assert_eq!(app.app().mode, Mode::Navigate);
    assert_eq!(app.app().tags(), [false, false, false, false]);
    assert_eq!(
        app.app().window.visible(),
        ["the cat sat on the mat", "a black cat crossed the road"]
    );

    let output = app.render();
    assert!(output.contains("0. | cat | gato"), "title shows the fields");
    assert!(output.contains("the cat sat on the mat"));
}

#[test]
fn test_next_and_previous_wrap_around() {
    let mut app = TestApp::new();

    app.send_key(KeyCode::Char('d'));
    assert_eq!(app.app().position(), 1);
    app.send_key(KeyCode::Char('d'));
    app.send_key(KeyCode::Char('d'));
    assert_eq!(
        app.app().position(),
        0,
        "d past the last token wraps to the first"
    );

    app.send_key(KeyCode::Char('a'));
    assert_eq!(
        app.app().position(),
        2,
        "a from the first token wraps to the last"
    );
}

#[test]
fn test_navigation_rebuilds_the_corpus_window() {
    let mut app = TestApp::new();

    app.send_key(KeyCode::Char('d'));
    assert_eq!(app.app().window.visible(), ["the dog barked at the cat"]);

    app.send_key(KeyCode::Char('d'));
    assert_eq!(app.app().window.visible(), ["a bird sang at dawn"]);
}

#[test]
fn test_scroll_keys_page_the_corpus() {
    let mut corpus = String::from("token,text\n");
    for i in 0..5 {
        corpus.push_str(&format!("cat,cat line {i}\n"));
    }
    let mut app = TestApp::with_display_range(SAMPLE_TOKENS, &corpus, 2);

    assert_eq!(app.app().window.visible(), ["cat line 0", "cat line 1"]);

    app.send_key(KeyCode::Char('s'));
    assert_eq!(app.app().window.window_offset(), 2);
    app.send_key(KeyCode::Char('s'));
    assert_eq!(
        app.app().window.window_offset(),
        3,
        "scrolling clamps so the last page stays full"
    );
    app.send_key(KeyCode::Char('s'));
    assert_eq!(app.app().window.window_offset(), 3);

    app.send_key(KeyCode::Char('w'));
    app.send_key(KeyCode::Char('w'));
    assert_eq!(app.app().window.window_offset(), 0);
}

// ========== Tag Tests ==========

#[test]
fn test_tags_toggle_and_follow_the_token() {
    let mut app = TestApp::new();

    app.send_key(KeyCode::Char('1'));
    assert_eq!(app.app().tags(), [true, false, false, false]);
    app.send_key(KeyCode::Char('1'));
    assert_eq!(app.app().tags(), [false, false, false, false]);

    app.send_key(KeyCode::Char('2'));
    app.send_key(KeyCode::Char('4'));
    assert_eq!(app.app().tags(), [false, true, false, true]);

    // Moving away writes the tags to the record; the next token starts clean
    app.send_key(KeyCode::Char('d'));
    assert_eq!(app.app().tags(), [false, false, false, false]);

    let tokens = app.app().tokens();
    let unclear = tokens.column("unclear").unwrap();
    let noise = tokens.column("noise").unwrap();
    let keep = tokens.column("keep").unwrap();
    assert_eq!(tokens.cell(0, unclear), "y");
    assert_eq!(tokens.cell(0, noise), "y");
    assert_eq!(tokens.cell(0, keep), "");

    // Coming back re-reads them from the record
    app.send_key(KeyCode::Char('a'));
    assert_eq!(app.app().tags(), [false, true, false, true]);

    // No other record picked up a tag
    let tokens = app.app().tokens();
    assert_eq!(tokens.cell(1, unclear), "");
    assert_eq!(tokens.cell(2, noise), "");
}

#[test]
fn test_out_of_range_tag_digits_are_ignored() {
    let mut app = TestApp::new();

    app.send_key(KeyCode::Char('9'));
    app.send_key(KeyCode::Char('0'));
    assert_eq!(app.app().tags(), [false, false, false, false]);
    assert_eq!(app.app().mode, Mode::Navigate);
}

#[test]
fn test_tag_render_numbers_every_option() {
    let mut app = TestApp::new();
    let output = app.render();

    assert!(output.contains("1. keep"));
    assert!(output.contains("2. unclear"));
    assert!(output.contains("3. multiword"));
    assert!(output.contains("4. noise"));
}

// ========== Command Tests ==========

#[test]
fn test_goto_command_jumps_progressively() {
    let tokens = many_tokens_csv(12);
    let mut app = TestApp::with_csv(&tokens, "token,text\n");

    app.send_key(KeyCode::Char(':'));
    assert_eq!(app.app().mode, Mode::Command);

    app.send_key(KeyCode::Char('1'));
    assert_eq!(app.app().position(), 1, "a single digit jumps immediately");
    assert_eq!(app.app().mode, Mode::Command);

    let output = app.send_key(KeyCode::Char('0'));
    assert_eq!(app.app().position(), 10, "a second digit extends the number");
    assert_eq!(app.app().command_buffer(), ":10");
    assert!(output.contains(":10"), "the pending command stays on screen");
    assert!(output.contains("10. | tok10 | gloss10"));

    // Growing the number out of range abandons the command
    app.send_key(KeyCode::Char('5'));
    assert_eq!(app.app().mode, Mode::Navigate);
    assert_eq!(app.app().status(), "Invalid position");
    assert_eq!(app.app().command_buffer(), "");
    assert_eq!(app.app().position(), 10, "the last valid jump sticks");
}

#[test]
fn test_goto_command_out_of_range_reports_invalid() {
    let mut app = TestApp::new();

    app.send_key(KeyCode::Char(':'));
    let output = app.send_key(KeyCode::Char('7'));

    assert_eq!(app.app().position(), 0);
    assert_eq!(app.app().mode, Mode::Navigate);
    assert_eq!(app.app().status(), "Invalid position");
    assert!(output.contains("Invalid"));
}

#[test]
fn test_unknown_command_reports_invalid() {
    let mut app = TestApp::new();

    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('z'));

    assert_eq!(app.app().mode, Mode::Navigate);
    assert_eq!(app.app().status(), "Invalid command");
    assert_eq!(app.app().command_buffer(), "");
}

#[test]
fn test_digits_do_not_jump_outside_command_mode() {
    let mut app = TestApp::new();

    app.send_key(KeyCode::Char('2'));
    assert_eq!(app.app().position(), 0, "bare digits toggle tags, not jumps");
    assert_eq!(app.app().tags(), [false, true, false, false]);
}

// ========== Save Tests ==========

#[test]
fn test_save_command_writes_both_tables() {
    let mut app = TestApp::new();

    app.send_key(KeyCode::Char('1'));
    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('e'));

    assert_eq!(app.app().status(), "Saved");
    assert_eq!(app.app().mode, Mode::Navigate);
    assert!(!app.should_quit());

    let saved = fs::read_to_string(&app.paths().tokens).unwrap();
    let table = codec::parse(&saved).unwrap();
    let keep = table.column("keep").unwrap();
    assert_eq!(
        table.cell(0, keep),
        "y",
        "pending tags are flushed before saving"
    );

    assert!(app.paths().corpus.is_file());
    assert!(
        !app.paths().tokens_backup.exists(),
        "a plain save does not touch the backups"
    );
}

#[test]
fn test_tagging_a_later_token_saves_only_that_row() {
    let mut app = TestApp::new();

    app.send_key(KeyCode::Char('d'));
    app.send_key(KeyCode::Char('d'));
    assert_eq!(app.app().position(), 2);

    app.send_key(KeyCode::Char('2'));
    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('e'));
    assert_eq!(app.app().status(), "Saved");

    let saved = fs::read_to_string(&app.paths().tokens).unwrap();
    let table = codec::parse(&saved).unwrap();
    let token = table.column("token").unwrap();
    let translation = table.column("translation").unwrap();
    let unclear = table.column("unclear").unwrap();

    assert_eq!(table.cell(2, token), "bird");
    assert_eq!(table.cell(2, unclear), "y");

    // The untagged rows come back exactly as they went in
    for row in 0..2 {
        assert_eq!(table.cell(row, token), ["cat", "dog"][row]);
        assert_eq!(table.cell(row, translation), ["gato", "perro"][row]);
        for name in ["keep", "unclear", "multiword", "noise"] {
            let col = table.column(name).unwrap();
            assert_eq!(table.cell(row, col), "");
        }
    }
}

#[test]
fn test_quit_command_saves_to_backups() {
    let mut app = TestApp::new();

    app.send_key(KeyCode::Char(':'));
    let output = app.send_key(KeyCode::Char('q'));

    assert!(app.should_quit());
    assert_eq!(app.app().status(), "Exiting");
    assert!(output.contains("Exiting"));

    assert!(app.paths().tokens_backup.is_file());
    assert!(app.paths().corpus_backup.is_file());
    assert!(
        !app.paths().tokens.exists(),
        "quitting writes the backups, not the primary files"
    );
}

#[test]
fn test_failed_save_keeps_the_session_alive() {
    let mut app = TestApp::new();
    // A directory at the target path makes the write fail
    fs::create_dir(&app.paths().tokens).unwrap();

    app.send_key(KeyCode::Char(':'));
    let output = app.send_key(KeyCode::Char('e'));

    assert!(app.app().status().starts_with("Save failed"));
    assert!(output.contains("Save failed"));
    assert_eq!(app.app().mode, Mode::Navigate);
    assert!(!app.should_quit());
}

#[test]
fn test_failed_quit_save_does_not_exit() {
    let mut app = TestApp::new();
    fs::create_dir(&app.paths().tokens_backup).unwrap();

    app.send_key(KeyCode::Char('1'));
    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('q'));

    assert!(!app.should_quit(), "a failed backup save cancels the quit");
    assert!(app.app().status().starts_with("Save failed"));
    assert_eq!(app.app().mode, Mode::Navigate);
    // The toggled tag survives for a later retry
    assert_eq!(app.app().tags(), [true, false, false, false]);
}

// ========== Edit Tests ==========

#[test]
fn test_edit_command_enters_token_edit() {
    let mut app = TestApp::new();

    app.send_key(KeyCode::Char(':'));
    let output = app.send_key(KeyCode::Char('f'));

    assert_eq!(app.app().mode, Mode::TokenEdit);
    assert_eq!(app.app().status(), "Edit token");
    assert_eq!(app.app().window.selection(), Some(0));
    assert_eq!(app.app().window.highlight(), Some(0));
    assert!(output.contains(">> the cat sat on the mat"));
    assert!(output.contains("   a black cat crossed the road"));
    assert!(output.contains("--Edit token--"));
}

#[test]
fn test_navigation_keys_are_inert_while_editing() {
    let mut app = TestApp::new();
    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('f'));

    app.send_key(KeyCode::Char('a'));
    app.send_key(KeyCode::Char('d'));
    app.send_key(KeyCode::Char('1'));
    app.send_key(KeyCode::Char(':'));

    assert_eq!(app.app().mode, Mode::TokenEdit);
    assert_eq!(app.app().position(), 0);
    assert_eq!(app.app().tags(), [false, false, false, false]);
    assert_eq!(app.app().window.candidate(), ["cat", "gato"]);
}

#[test]
fn test_boundary_keys_resize_the_token() {
    let mut app = TestApp::new();
    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('f'));

    app.send_key(KeyCode::Char('v'));
    assert_eq!(app.app().window.field(0), "cat ");
    app.send_key(KeyCode::Char('c'));
    assert_eq!(app.app().window.field(0), "cat");
    app.send_key(KeyCode::Char('z'));
    assert_eq!(app.app().window.field(0), " cat");
    app.send_key(KeyCode::Char('x'));
    assert_eq!(app.app().window.field(0), "cat");
}

#[test]
fn test_edit_selection_moves_between_lines() {
    let mut app = TestApp::new();
    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('f'));

    let output = app.send_key(KeyCode::Char('s'));
    assert_eq!(app.app().window.selection(), Some(1));
    assert!(output.contains(">> a black cat crossed the road"));

    // Boundary ops now follow the newly selected line
    app.send_key(KeyCode::Char('v'));
    assert_eq!(app.app().window.field(0), "cat ");

    app.send_key(KeyCode::Char('s'));
    assert_eq!(
        app.app().window.selection(),
        Some(1),
        "the selection stops at the last corpus line"
    );

    app.send_key(KeyCode::Char('w'));
    assert_eq!(app.app().window.selection(), Some(0));
}

#[test]
fn test_undo_restores_the_saved_fields() {
    let mut app = TestApp::new();
    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('f'));

    app.send_key(KeyCode::Char('v'));
    assert_eq!(app.app().window.field(0), "cat ");
    app.send_key(KeyCode::Tab);
    app.send_key(KeyCode::Char('x'));
    assert_eq!(app.app().window.field(1), "gatox");
    app.send_key(KeyCode::Tab);

    app.send_key(KeyCode::Char('b'));
    assert_eq!(app.app().window.candidate(), ["cat", "gato"]);
}

#[test]
fn test_translation_mode_appends_and_removes_chars() {
    let mut app = TestApp::new();
    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('f'));

    let output = app.send_key(KeyCode::Tab);
    assert_eq!(app.app().mode, Mode::TranslationEdit);
    assert_eq!(app.app().status(), "Editing translation: gato");
    assert_eq!(app.app().window.highlight(), Some(1));
    // The controls panel is narrow; only the start of the heading fits
    assert!(output.contains("--Edit transl"));

    app.send_key(KeyCode::Char('s'));
    assert_eq!(app.app().window.field(1), "gatos");
    app.send_key(KeyCode::Char('!'));
    assert_eq!(
        app.app().window.field(1),
        "gatos",
        "characters outside the whitelist are ignored"
    );

    app.send_key(KeyCode::Backspace);
    app.send_key(KeyCode::Backspace);
    assert_eq!(app.app().window.field(1), "gat");
    assert_eq!(app.app().status(), "Editing translation: gat");

    app.send_key(KeyCode::Tab);
    assert_eq!(app.app().mode, Mode::TokenEdit);
    assert_eq!(app.app().status(), "Edit token");
    assert_eq!(app.app().window.highlight(), Some(0));
}

#[test]
fn test_commit_rewrites_tokens_and_corpus() {
    let mut app = TestApp::new();
    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('f'));
    app.send_key(KeyCode::Char('v'));
    app.send_key(KeyCode::Enter);

    assert_eq!(app.app().mode, Mode::Navigate);
    assert_eq!(app.app().status(), "");
    assert_eq!(app.app().window.selection(), None);
    assert_eq!(app.app().window.highlight(), None);

    let tokens = app.app().tokens();
    assert_eq!(tokens.cell(0, 0), "cat ");
    assert_eq!(tokens.cell(0, 1), "gato");

    let corpus = app.app().corpus();
    let group = corpus.column("token").unwrap();
    let translation = corpus.column("translation").unwrap();
    assert_eq!(corpus.cell(0, group), "cat ");
    assert_eq!(corpus.cell(1, group), "cat ");
    assert_eq!(corpus.cell(0, translation), "gato");
    assert_eq!(corpus.cell(2, group), "dog", "other groups are untouched");
    assert_eq!(corpus.cell(3, group), "bird");

    // The edit survives a save and reload
    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('e'));
    let saved_tokens = codec::parse(&fs::read_to_string(&app.paths().tokens).unwrap()).unwrap();
    assert_eq!(saved_tokens.cell(0, 0), "cat ");
    let saved_corpus = codec::parse(&fs::read_to_string(&app.paths().corpus).unwrap()).unwrap();
    let group = saved_corpus.column("token").unwrap();
    assert_eq!(saved_corpus.cell(0, group), "cat ");
}

#[test]
fn test_commit_skips_lines_without_the_new_spelling() {
    let corpus = "\
token,text
cat,the cat sat
cat,stray cat
";
    let mut app = TestApp::with_csv(SAMPLE_TOKENS, corpus);
    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('f'));
    app.send_key(KeyCode::Char('v'));
    app.send_key(KeyCode::Enter);

    let corpus = app.app().corpus();
    let group = corpus.column("token").unwrap();
    let translation = corpus.column("translation").unwrap();
    assert_eq!(corpus.cell(0, group), "cat ");
    assert_eq!(corpus.cell(0, translation), "gato");
    assert_eq!(
        corpus.cell(1, group),
        "cat",
        "lines that do not contain the new spelling keep their group"
    );
    assert_eq!(corpus.cell(1, translation), "");
}

#[test]
fn test_editing_a_token_without_corpus_lines_is_safe() {
    let tokens = "token,translation\nfish,pez\n";
    let mut app = TestApp::with_csv(tokens, "token,text\n");

    app.send_key(KeyCode::Char(':'));
    app.send_key(KeyCode::Char('f'));
    assert_eq!(app.app().window.selection(), None);

    // Boundary and selection keys have nothing to work on
    app.send_key(KeyCode::Char('v'));
    app.send_key(KeyCode::Char('z'));
    app.send_key(KeyCode::Char('s'));
    assert_eq!(app.app().window.field(0), "fish");

    app.send_key(KeyCode::Tab);
    assert_eq!(app.app().status(), "Editing translation: pez");
    app.send_key(KeyCode::Char('a'));
    app.send_key(KeyCode::Tab);
    app.send_key(KeyCode::Enter);

    assert_eq!(app.app().mode, Mode::Navigate);
    assert_eq!(app.app().tokens().cell(0, 1), "peza");
}

// ========== Property Tests ==========

mod properties {
    use super::keyboard;
    use super::*;
    use proptest::prelude::*;

    fn edit_keys() -> impl Strategy<Value = Vec<KeyCode>> {
        proptest::collection::vec(
            prop_oneof![
                Just(KeyCode::Char('z')),
                Just(KeyCode::Char('x')),
                Just(KeyCode::Char('c')),
                Just(KeyCode::Char('v')),
                Just(KeyCode::Char('w')),
                Just(KeyCode::Char('s')),
                Just(KeyCode::Char('o')),
                Just(KeyCode::Tab),
                Just(KeyCode::Backspace),
            ],
            0..30,
        )
    }

    fn navigate_keys() -> impl Strategy<Value = Vec<KeyCode>> {
        proptest::collection::vec(
            prop_oneof![
                Just(KeyCode::Char('a')),
                Just(KeyCode::Char('d')),
                Just(KeyCode::Char('w')),
                Just(KeyCode::Char('s')),
                Just(KeyCode::Char('1')),
                Just(KeyCode::Char('2')),
                Just(KeyCode::Char('3')),
                Just(KeyCode::Char('4')),
            ],
            0..40,
        )
    }

    proptest! {
        #[test]
        fn undo_always_restores_the_persisted_fields(keys in edit_keys()) {
            let mut app = TestApp::new();
            app.app_mut().handle_key(keyboard::key(KeyCode::Char(':')));
            app.app_mut().handle_key(keyboard::key(KeyCode::Char('f')));

            for code in keys {
                app.app_mut().handle_key(keyboard::key(code));
            }
            // The session may have ended up on the translation side
            if app.app().mode == Mode::TranslationEdit {
                app.app_mut().handle_key(keyboard::key(KeyCode::Tab));
            }
            prop_assert_eq!(app.app().mode, Mode::TokenEdit);

            app.app_mut().handle_key(keyboard::key(KeyCode::Char('b')));
            prop_assert_eq!(app.app().window.candidate(), ["cat", "gato"]);
        }

        #[test]
        fn saved_tag_cells_are_always_y_or_empty(keys in navigate_keys()) {
            let mut app = TestApp::new();
            for code in keys {
                app.app_mut().handle_key(keyboard::key(code));
            }
            app.app_mut().handle_key(keyboard::key(KeyCode::Char(':')));
            app.app_mut().handle_key(keyboard::key(KeyCode::Char('e')));
            prop_assert_eq!(app.app().status(), "Saved");

            let saved = fs::read_to_string(&app.paths().tokens).unwrap();
            let table = codec::parse(&saved).unwrap();
            for name in app.app().tag_names() {
                let col = table.column(name).unwrap();
                for row in 0..table.len() {
                    let cell = table.cell(row, col);
                    prop_assert!(
                        cell == "y" || cell.is_empty(),
                        "tag cell {:?} in column {} is neither y nor empty",
                        cell,
                        name
                    );
                }
            }
        }
    }
}

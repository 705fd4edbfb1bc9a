//! Interactive token review session
//!
//! Wires the pieces together: configuration loading, table IO, the
//! [`app::App`] key protocol, and the Ratatui render loop. [`run_review`]
//! covers the whole lifetime of a session, from reading the input files
//! to restoring the terminal.

pub mod app;
pub mod corpus;
pub mod display;
pub mod edit;
pub mod ui;

#[cfg(test)]
mod tests;

use app::{App, SetupError};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use gloss_config::{ConfigError, Loader};
use gloss_table::{load_table, LoadError, SaveError};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Error that can occur while running a review session
#[derive(Debug)]
pub enum ReviewError {
    /// Configuration file missing or malformed
    Config(ConfigError),
    /// An input table could not be read
    Load(LoadError),
    /// Tables and configuration do not fit together
    Setup(SetupError),
    /// Terminal or filesystem failure
    Io(String),
}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewError::Config(err) => write!(f, "configuration error: {}", err),
            ReviewError::Load(err) => write!(f, "{}", err),
            ReviewError::Setup(err) => write!(f, "{}", err),
            ReviewError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ReviewError {}

impl From<ConfigError> for ReviewError {
    fn from(err: ConfigError) -> Self {
        ReviewError::Config(err)
    }
}

impl From<LoadError> for ReviewError {
    fn from(err: LoadError) -> Self {
        ReviewError::Load(err)
    }
}

impl From<SetupError> for ReviewError {
    fn from(err: SetupError) -> Self {
        ReviewError::Setup(err)
    }
}

impl From<io::Error> for ReviewError {
    fn from(err: io::Error) -> Self {
        ReviewError::Io(err.to_string())
    }
}

impl From<SaveError> for ReviewError {
    fn from(err: SaveError) -> Self {
        ReviewError::Io(err.to_string())
    }
}

/// Run a review session over the given corpus and token files.
///
/// Without an explicit configuration path, a `gloss.toml` in the working
/// directory is layered over the built-in defaults when present.
pub fn run_review(
    corpus_path: PathBuf,
    tokens_path: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<(), ReviewError> {
    let loader = match &config_path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("gloss.toml"),
    };
    let config = loader.build()?;

    let tokens = load_table(&tokens_path)?;
    let corpus = load_table(&corpus_path)?;

    let paths = config.save.store_paths();
    paths.ensure_dir()?;

    let mut app = App::new(tokens, corpus, &config, paths)?;

    // Setup terminal
    enable_raw_mode()?;
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;

    result.map_err(ReviewError::from)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        // Render the full UI every frame
        terminal.draw(|frame| ui::render(frame, app))?;

        // A quit command shows its final status in the draw above
        if app.should_quit {
            return Ok(());
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    // Emergency abort, discarding unsaved work
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key);
                }
                // On terminal resize, the next draw uses the new dimensions
                Event::Resize(_, _) => {}
                _ => {
                    // Ignore other events (mouse, focus, etc.)
                }
            }
        }
    }
}

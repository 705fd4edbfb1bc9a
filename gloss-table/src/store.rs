//! Loading and saving annotation tables
//!
//! Wraps the CSV codec with file IO and gives each failure a typed shape.
//! Load failures end the session before the terminal is taken over, so their
//! messages are written for a plain stderr line. Save failures must never end
//! the session; callers turn them into an on-screen status and keep going.

use crate::codec::{self, ParseError};
use crate::table::Table;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error that can occur when loading a table from disk.
#[derive(Debug, Clone)]
pub enum LoadError {
    /// The input file does not exist
    NotFound(PathBuf),
    /// IO error while reading the file
    Io(String),
    /// The file content is not valid CSV
    Parse(ParseError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::NotFound(path) => write!(f, "file not found: {}", path.display()),
            LoadError::Io(msg) => write!(f, "IO error: {}", msg),
            LoadError::Parse(err) => write!(f, "malformed CSV: {}", err),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<ParseError> for LoadError {
    fn from(err: ParseError) -> Self {
        LoadError::Parse(err)
    }
}

/// Error that can occur when writing a table to disk.
#[derive(Debug, Clone)]
pub enum SaveError {
    /// The target could not be written (locked, missing permissions, ...)
    Write { path: PathBuf, reason: String },
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Write { path, reason } => {
                write!(f, "could not write {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for SaveError {}

/// Read and parse a CSV table.
pub fn load_table(path: impl AsRef<Path>) -> Result<Table, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Io(err.to_string())
        }
    })?;
    Ok(codec::parse(&source)?)
}

/// Serialize and write a table, replacing any existing file.
pub fn save_table(table: &Table, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    fs::write(path, codec::serialize(table)).map_err(|err| SaveError::Write {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

/// Output locations for a review session.
///
/// The reviewer writes four files into one output directory: the token table
/// and the corpus, each with a primary path (explicit save) and a backup path
/// (written when quitting).
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub directory: PathBuf,
    pub tokens: PathBuf,
    pub tokens_backup: PathBuf,
    pub corpus: PathBuf,
    pub corpus_backup: PathBuf,
}

impl StorePaths {
    pub fn new(
        directory: impl Into<PathBuf>,
        tokens: &str,
        tokens_backup: &str,
        corpus: &str,
        corpus_backup: &str,
    ) -> Self {
        let directory = directory.into();
        StorePaths {
            tokens: directory.join(tokens),
            tokens_backup: directory.join(tokens_backup),
            corpus: directory.join(corpus),
            corpus_backup: directory.join(corpus_backup),
            directory,
        }
    }

    /// Create the output directory when it does not exist yet.
    pub fn ensure_dir(&self) -> Result<(), SaveError> {
        fs::create_dir_all(&self.directory).map_err(|err| SaveError::Write {
            path: self.directory.clone(),
            reason: err.to_string(),
        })
    }
}

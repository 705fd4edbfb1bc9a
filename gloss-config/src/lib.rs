//! Configuration loader for the gloss reviewer.
//!
//! `defaults/gloss.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. The application layers user files on top of
//! those defaults via [`Loader`] before deserializing into [`GlossConfig`].
//!
//! The configuration is built once at startup and passed around by reference;
//! nothing in here is global or mutable afterwards.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use gloss_table::StorePaths;
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/gloss.default.toml");

/// Top-level configuration consumed by the reviewer.
#[derive(Debug, Clone, Deserialize)]
pub struct GlossConfig {
    pub save: SaveConfig,
    pub ui: UiConfig,
    pub input: InputConfig,
}

/// Where review results are written.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveConfig {
    pub directory: String,
    pub file_name: String,
    pub backup_file_name: String,
    pub corpus_file_name: String,
    pub corpus_backup_file_name: String,
}

impl SaveConfig {
    /// Resolve the four output paths under the configured directory.
    pub fn store_paths(&self) -> StorePaths {
        StorePaths::new(
            &self.directory,
            &self.file_name,
            &self.backup_file_name,
            &self.corpus_file_name,
            &self.corpus_backup_file_name,
        )
    }
}

/// Screen layout and tag vocabulary.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Tag names in digit-key order. Only the first nine are reachable by key.
    pub options: Vec<String>,
    /// Corpus lines per page.
    pub display_range: usize,
}

/// How the input tables are interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Editable token columns: lookup key first, then the translation.
    pub tokens_cols: Vec<String>,
    pub corpus_text_col: String,
    pub corpus_group_col: String,
    /// Token rows with an empty cell in any of these columns are dropped.
    pub filter_na_cols: Vec<String>,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<GlossConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GlossConfig, ConfigError> {
    Loader::new().build()
}

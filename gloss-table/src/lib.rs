//! Tabular data model and CSV persistence for the gloss reviewer.
//!
//! The reviewer works on two flat tables loaded from CSV files: the token
//! table being annotated and the corpus of source sentences. This crate owns
//! the in-memory [`Table`] representation, the CSV codec, and the load/save
//! layer including output path planning ([`StorePaths`]).
//!
//! All cell values are strings; an empty string stands for a missing value.

pub mod codec;
pub mod store;
pub mod table;

pub use store::{load_table, save_table, LoadError, SaveError, StorePaths};
pub use table::Table;

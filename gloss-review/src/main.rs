//! Standalone binary for the gloss corpus reviewer.
//! Usage:
//!   gloss <corpus_path> <tokens_path> [--config <path>]

mod review;

use clap::{Arg, Command, ValueHint};
use std::path::PathBuf;

fn main() {
    let matches = Command::new("gloss")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive terminal reviewer for corpus token annotations")
        .arg(
            Arg::new("corpus")
                .help("Path to the corpus CSV (one row per source sentence)")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("tokens")
                .help("Path to the token CSV to review")
                .required(true)
                .index(2)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults")
                .value_hint(ValueHint::FilePath),
        )
        .get_matches();

    let corpus = matches.get_one::<String>("corpus").unwrap();
    let tokens = matches.get_one::<String>("tokens").unwrap();
    let config = matches.get_one::<String>("config").map(PathBuf::from);

    if let Err(err) = review::run_review(PathBuf::from(corpus), PathBuf::from(tokens), config) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

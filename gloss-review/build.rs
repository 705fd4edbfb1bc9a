use clap::{Arg, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("gloss")
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
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "gloss", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "gloss", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "gloss", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}

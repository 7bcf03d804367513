//! Shuffle command - deterministic row shuffle of a delimited file.

use clap::Parser;
use std::path::PathBuf;

use crate::cli::output::{color, log_info};
use crate::error::{Error, Result};
use crate::shuffle::{shuffle_file, DEFAULT_SEED};

/// Shuffle the data rows of a delimited file, header untouched
#[derive(Parser, Debug)]
pub struct ShuffleArgs {
    /// Input delimited file with a header row
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output path
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Permutation seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Field delimiter
    #[arg(long, default_value = ";")]
    pub delimiter: char,

    /// Minimal output (suppress progress messages)
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: ShuffleArgs) -> Result<()> {
    if !args.delimiter.is_ascii() {
        return Err(Error::invalid_input(format!(
            "delimiter must be a single ASCII character, got '{}'",
            args.delimiter
        )));
    }
    let rows = shuffle_file(&args.input, &args.output, args.delimiter as u8, args.seed)?;
    log_info(
        &format!(
            "{} wrote {} shuffled rows to {}",
            color("32", "ok:"),
            rows,
            args.output.display()
        ),
        args.quiet,
    );
    Ok(())
}

//! accordo - inter-annotator agreement statistics.
//!
//! # Usage
//!
//! ```bash
//! # Kappa statistics (layout auto-detected from the header)
//! accordo agreement ratings.csv
//!
//! # Same report as JSON
//! accordo agreement ratings.csv --json
//!
//! # Error breakdowns for two phenomenon groups
//! accordo analyze gold_bert_ann.csv \
//!     --group "A / Juxtaposition:a:juxtaposition|contact" \
//!     --group "SU / Succession:su:succession"
//!
//! # Reproducible row shuffle
//! accordo shuffle raw.csv shuffled.csv --seed 42
//! ```
//!
//! Set `RUST_LOG=info` for loading/progress diagnostics.

use std::process::ExitCode;

use clap::Parser;

use accordo::cli::output::color;
use accordo::cli::{commands, Cli, Commands};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Agreement(args) => commands::agreement::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Shuffle(args) => commands::shuffle::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}

//! Command-line interface for the accordo binary.
//!
//! Argument parsing and command routing live here; the command
//! implementations are in the `commands` submodule.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Inter-annotator agreement statistics for hand-labeled datasets.
#[derive(Parser)]
#[command(name = "accordo")]
#[command(
    author,
    version,
    about = "Inter-annotator agreement statistics for hand-labeled datasets",
    long_about = r#"
accordo - agreement statistics for a table of annotations

COMMANDS:
  agreement  Cohen's and Fleiss' kappa between humans, machine, and gold
  analyze    Per-annotator accuracy and error breakdowns, per row group
  shuffle    Deterministic seeded shuffle of a delimited file

COLUMN LAYOUTS (picked automatically, or force with --schema / overrides):
  compact: G H1 H2 H3 H4 H5 A
  named:   GOLD BERT MARTYNA FRANCESCO FEDERICO SARA LARA MEANING

EXAMPLES:
  accordo agreement ratings.csv
  accordo agreement ratings.csv --schema named --json
  accordo analyze ratings.csv --group "SU / Succession:su:succession"
  accordo shuffle raw.csv shuffled.csv --seed 7
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute chance-corrected agreement statistics
    #[command(visible_alias = "a")]
    Agreement(commands::AgreementArgs),

    /// Per-annotator accuracy and error breakdowns against gold
    #[command(visible_alias = "e")]
    Analyze(commands::AnalyzeArgs),

    /// Shuffle the data rows of a delimited file, header untouched
    #[command(visible_alias = "s")]
    Shuffle(commands::ShuffleArgs),
}

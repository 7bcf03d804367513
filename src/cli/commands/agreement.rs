//! Agreement command - kappa statistics for one rating table.

use clap::Parser;
use std::path::PathBuf;

use super::SchemaOpts;
use crate::agreement::AgreementReport;
use crate::cli::output::log_info;
use crate::error::Result;
use crate::table::RatingTable;

/// Compute chance-corrected agreement statistics
#[derive(Parser, Debug)]
pub struct AgreementArgs {
    /// Semicolon-delimited rating table with a header row
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub schema: SchemaOpts,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Minimal output (suppress progress messages)
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: AgreementArgs) -> Result<()> {
    let table = RatingTable::from_path(&args.file, b';')?;
    let schema = args.schema.resolve(table.headers())?;
    log_info(
        &format!(
            "computing agreement over {} rows ({} humans)",
            table.n_rows(),
            schema.humans().len()
        ),
        args.quiet,
    );
    let report = AgreementReport::compute(&table, &schema)?;
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

//! Analyze command - per-annotator error breakdowns against gold.

use clap::Parser;
use std::path::PathBuf;

use super::SchemaOpts;
use crate::analysis::{AnalysisReport, GroupSpec};
use crate::cli::output::log_info;
use crate::error::Result;
use crate::table::RatingTable;

/// Per-annotator accuracy and error breakdowns against gold
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Semicolon-delimited rating table with a header row
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub schema: SchemaOpts,

    /// Row group "NAME:GOLD_LABEL[:pat1|pat2]" (repeatable; default: whole table)
    #[arg(short, long = "group", value_name = "SPEC")]
    pub groups: Vec<String>,

    /// How many wrong labels to list per ranking
    #[arg(long, default_value_t = 3, value_name = "N")]
    pub top: usize,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Minimal output (suppress progress messages)
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let table = RatingTable::from_path(&args.file, b';')?;
    let schema = args.schema.resolve(table.headers())?;
    let groups: Vec<GroupSpec> = args
        .groups
        .iter()
        .map(|s| GroupSpec::parse(s))
        .collect::<Result<_>>()?;
    log_info(
        &format!(
            "analyzing {} rows in {} group(s)",
            table.n_rows(),
            if groups.is_empty() { 1 } else { groups.len() }
        ),
        args.quiet,
    );
    let report = AnalysisReport::compute(&table, &schema, &groups, args.top)?;
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

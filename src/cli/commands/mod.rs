//! Command implementations for the accordo CLI.
//!
//! Each command has its own module; the schema-selection flags shared by
//! `agreement` and `analyze` live here.

pub mod agreement;
pub mod analyze;
pub mod shuffle;

pub use agreement::AgreementArgs;
pub use analyze::AnalyzeArgs;
pub use shuffle::ShuffleArgs;

use crate::error::Result;
use crate::schema::RaterSchema;
use clap::ValueEnum;

/// Built-in column layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaPreset {
    /// Pick whichever preset's columns are all present in the header.
    Auto,
    /// G / H1..H5 / A.
    Compact,
    /// GOLD / BERT / named annotators / MEANING.
    Named,
}

/// Column-role selection, shared by `agreement` and `analyze`.
///
/// Either rely on a preset (with `--schema`) or name the columns outright;
/// naming gold, humans, and machine together bypasses the presets, while a
/// partial override replaces just that role in the chosen preset.
#[derive(clap::Args, Debug)]
pub struct SchemaOpts {
    /// Column layout preset
    #[arg(long, default_value = "auto")]
    pub schema: SchemaPreset,

    /// Gold-standard column name
    #[arg(long, value_name = "COL")]
    pub gold: Option<String>,

    /// Human rater column names, comma-separated
    #[arg(long, value_name = "COLS", value_delimiter = ',')]
    pub human: Vec<String>,

    /// Machine column name
    #[arg(long, value_name = "COL")]
    pub machine: Option<String>,

    /// Meaning column name (used by --group patterns)
    #[arg(long, value_name = "COL")]
    pub meaning: Option<String>,
}

impl SchemaOpts {
    /// Resolve the flags against a header row.
    pub fn resolve(&self, headers: &[String]) -> Result<RaterSchema> {
        if let (Some(gold), false, Some(machine)) =
            (&self.gold, self.human.is_empty(), &self.machine)
        {
            return RaterSchema::custom(
                gold.clone(),
                self.human.clone(),
                machine.clone(),
                self.meaning.clone(),
            );
        }

        let base = match self.schema {
            SchemaPreset::Compact => RaterSchema::compact(),
            SchemaPreset::Named => RaterSchema::named(),
            SchemaPreset::Auto => RaterSchema::detect(headers)?,
        };
        if self.gold.is_none()
            && self.human.is_empty()
            && self.machine.is_none()
            && self.meaning.is_none()
        {
            return Ok(base);
        }
        RaterSchema::custom(
            self.gold.clone().unwrap_or_else(|| base.gold().to_string()),
            if self.human.is_empty() {
                base.humans().to_vec()
            } else {
                self.human.clone()
            },
            self.machine
                .clone()
                .unwrap_or_else(|| base.machine().to_string()),
            self.meaning.clone().or_else(|| base.meaning().map(String::from)),
        )
    }
}

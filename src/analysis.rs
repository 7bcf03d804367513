//! Per-annotator error analysis against gold.
//!
//! Where the agreement report asks "do the raters agree with each other",
//! this module asks "what exactly does each rater get wrong". Rows can be
//! restricted to named groups, a gold label plus an optional case-insensitive
//! regex over the free-text meaning column, so error profiles can be read
//! per phenomenon rather than pooled over the whole dataset. Per group and
//! annotator it reports accuracy, correct/error counts, and the most
//! frequent wrong labels; per group it adds the human mean and the pooled
//! human errors, plus group-by-label error-count matrices for the machine
//! and for the humans.
//!
//! A missing prediction counts as an error (it cannot equal the gold), but
//! only labels actually produced enter the wrong-label rankings.

use crate::error::{Error, Result};
use crate::label::Label;
use crate::schema::RaterSchema;
use crate::table::RatingTable;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Group specification
// =============================================================================

/// A named row filter: gold label and optional meaning patterns.
///
/// `gold: None` means "all rows" (the default whole-table group). The
/// meaning pattern is a regex alternation matched case-insensitively
/// anywhere in the meaning cell; rows without a meaning cell never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    /// Display name for the group.
    pub name: String,
    /// Gold label rows must carry, if any.
    pub gold: Option<Label>,
    /// Regex alternation over the meaning column, if any.
    pub meaning_pattern: Option<String>,
}

impl GroupSpec {
    /// The whole table as one group.
    #[must_use]
    pub fn whole_table() -> Self {
        GroupSpec {
            name: "all".to_string(),
            gold: None,
            meaning_pattern: None,
        }
    }

    /// A group from a gold label and meaning keywords (joined with `|`).
    #[must_use]
    pub fn new(name: impl Into<String>, gold: &str, keywords: &[&str]) -> Self {
        GroupSpec {
            name: name.into(),
            gold: Some(Label::normalize(gold)),
            meaning_pattern: if keywords.is_empty() {
                None
            } else {
                Some(keywords.join("|"))
            },
        }
    }

    /// Parse the CLI form `NAME:GOLD_LABEL[:pat1|pat2]`.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parts = spec.splitn(3, ':');
        let name = parts.next().unwrap_or("").trim();
        let gold = parts.next().map(str::trim);
        let pattern = parts.next().map(str::trim);
        if name.is_empty() {
            return Err(Error::invalid_input(format!(
                "group spec '{}' has no name (expected NAME:GOLD_LABEL[:patterns])",
                spec
            )));
        }
        let Some(gold) = gold else {
            return Err(Error::invalid_input(format!(
                "group spec '{}' has no gold label (expected NAME:GOLD_LABEL[:patterns])",
                spec
            )));
        };
        let gold = Label::normalize(gold);
        if gold.is_empty() {
            return Err(Error::invalid_input(format!(
                "group spec '{}' has an empty gold label",
                spec
            )));
        }
        let meaning_pattern = match pattern {
            Some(p) if !p.is_empty() => {
                // Validate now so a bad regex fails at parse time, not mid-run.
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        Error::invalid_input(format!("group '{}': bad pattern '{}': {}", name, p, e))
                    })?;
                Some(p.to_string())
            }
            _ => None,
        };
        Ok(GroupSpec {
            name: name.to_string(),
            gold: Some(gold),
            meaning_pattern,
        })
    }
}

// =============================================================================
// Report structure
// =============================================================================

/// A wrong label and how often it occurred.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelCount {
    /// The label produced instead of the gold one.
    pub label: String,
    /// Occurrences within the group.
    pub count: usize,
}

/// One annotator's record within one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatorBreakdown {
    /// Column name.
    pub annotator: String,
    /// Percent of group rows where the annotator matches gold.
    pub accuracy_pct: f64,
    /// Rows matching gold.
    pub correct: usize,
    /// Rows not matching gold (missing labels included).
    pub errors: usize,
    /// Most frequent wrong labels, count-descending.
    pub top_errors: Vec<LabelCount>,
}

/// Everything measured for one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupAnalysis {
    /// Display name the group was configured with.
    pub name: String,
    /// Matching rows; 0 means the group is reported empty and skipped.
    pub n_rows: usize,
    /// Machine first, then each human, schema order.
    pub annotators: Vec<AnnotatorBreakdown>,
    /// Plain mean of the human accuracies; NaN for an empty group.
    pub mean_human_accuracy_pct: f64,
    /// Most frequent wrong labels pooled over all humans.
    pub pooled_human_errors: Vec<LabelCount>,
}

/// Error analysis across all configured groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// RFC 3339 generation time.
    pub timestamp: String,
    /// Data rows in the table.
    pub n_rows: usize,
    /// The column roles the analysis ran under.
    pub schema: RaterSchema,
    /// How many wrong labels each ranking keeps.
    pub top_k: usize,
    /// One entry per configured group, in configuration order.
    pub groups: Vec<GroupAnalysis>,
    /// Sorted union of wrong labels observed in any group.
    pub error_labels: Vec<String>,
    /// Machine error counts, `groups x error_labels`.
    pub machine_error_matrix: Vec<Vec<usize>>,
    /// Pooled human error counts, `groups x error_labels`.
    pub human_error_matrix: Vec<Vec<usize>>,
}

// =============================================================================
// Computation
// =============================================================================

impl AnalysisReport {
    /// Analyze `table` under `schema`, one [`GroupAnalysis`] per spec.
    ///
    /// An empty `groups` slice analyzes the whole table as one group. Rows
    /// with a missing human label are logged before analysis; they still
    /// participate (as errors for whoever skipped them).
    pub fn compute(
        table: &RatingTable,
        schema: &RaterSchema,
        groups: &[GroupSpec],
        top_k: usize,
    ) -> Result<Self> {
        schema.validate_against(table.headers())?;
        warn_missing_humans(table, schema)?;

        let specs: Vec<GroupSpec> = if groups.is_empty() {
            vec![GroupSpec::whole_table()]
        } else {
            groups.to_vec()
        };

        let gold_col = table.column(schema.gold())?;
        let meaning_col = match schema.meaning() {
            Some(name) => Some(table.column(name)?),
            None => None,
        };

        let mut analyses = Vec::with_capacity(specs.len());
        let mut machine_counters: Vec<HashMap<Label, usize>> = Vec::with_capacity(specs.len());
        let mut human_counters: Vec<HashMap<Label, usize>> = Vec::with_capacity(specs.len());

        for spec in &specs {
            let rows = member_rows(spec, gold_col, meaning_col)?;
            let (analysis, machine_counter, human_counter) =
                analyze_group(table, schema, spec, &rows, top_k)?;
            analyses.push(analysis);
            machine_counters.push(machine_counter);
            human_counters.push(human_counter);
        }

        let mut error_labels: Vec<String> = machine_counters
            .iter()
            .chain(&human_counters)
            .flat_map(|c| c.keys().map(ToString::to_string))
            .collect();
        error_labels.sort();
        error_labels.dedup();

        let matrix = |counters: &[HashMap<Label, usize>]| -> Vec<Vec<usize>> {
            counters
                .iter()
                .map(|counter| {
                    error_labels
                        .iter()
                        .map(|l| counter.get(&Label::normalize(l)).copied().unwrap_or(0))
                        .collect()
                })
                .collect()
        };
        let machine_error_matrix = matrix(&machine_counters);
        let human_error_matrix = matrix(&human_counters);

        Ok(AnalysisReport {
            timestamp: chrono::Utc::now().to_rfc3339(),
            n_rows: table.n_rows(),
            schema: schema.clone(),
            top_k,
            groups: analyses,
            error_labels,
            machine_error_matrix,
            human_error_matrix,
        })
    }

    /// Serialize as pretty JSON. NaN values become `null`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::invalid_input(format!("JSON serialization failed: {}", e)))
    }
}

/// Log rows with gaps in the human columns.
fn warn_missing_humans(table: &RatingTable, schema: &RaterSchema) -> Result<()> {
    let incomplete = table.incomplete_row_indices(schema.humans())?;
    if incomplete.is_empty() {
        return Ok(());
    }
    log::warn!(
        "{} row(s) have at least one missing human label",
        incomplete.len()
    );
    for human in schema.humans() {
        let missing = table.column(human)?.iter().filter(|c| c.is_none()).count();
        if missing > 0 {
            log::warn!("{} has {} missing label(s)", human, missing);
        }
    }
    Ok(())
}

/// Row indices matched by a group spec.
fn member_rows(
    spec: &GroupSpec,
    gold_col: &[Option<Label>],
    meaning_col: Option<&[Option<Label>]>,
) -> Result<Vec<usize>> {
    let regex = match &spec.meaning_pattern {
        Some(pattern) => {
            if meaning_col.is_none() {
                return Err(Error::invalid_input(format!(
                    "group '{}' filters on meaning but the schema has no meaning column",
                    spec.name
                )));
            }
            Some(
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        Error::invalid_input(format!(
                            "group '{}': bad pattern '{}': {}",
                            spec.name, pattern, e
                        ))
                    })?,
            )
        }
        None => None,
    };

    Ok((0..gold_col.len())
        .filter(|&i| {
            if let Some(want) = &spec.gold {
                if gold_col[i].as_ref() != Some(want) {
                    return false;
                }
            }
            if let Some(re) = &regex {
                let meaning = meaning_col.and_then(|col| col[i].as_ref());
                match meaning {
                    Some(text) => re.is_match(text.as_str()),
                    None => false,
                }
            } else {
                true
            }
        })
        .collect())
}

type GroupCounters = (GroupAnalysis, HashMap<Label, usize>, HashMap<Label, usize>);

fn analyze_group(
    table: &RatingTable,
    schema: &RaterSchema,
    spec: &GroupSpec,
    rows: &[usize],
    top_k: usize,
) -> Result<GroupCounters> {
    let gold_col = table.column(schema.gold())?;
    let mut annotators = Vec::new();
    let mut machine_counter: HashMap<Label, usize> = HashMap::new();
    let mut human_counter: HashMap<Label, usize> = HashMap::new();
    let mut human_accuracies = Vec::new();

    for name in schema.annotator_columns() {
        let col = table.column(name)?;
        let mut correct = 0usize;
        let mut counter: HashMap<Label, usize> = HashMap::new();
        for &i in rows {
            match (&col[i], &gold_col[i]) {
                (Some(pred), Some(gold)) if pred == gold => correct += 1,
                (Some(pred), _) => *counter.entry(pred.clone()).or_insert(0) += 1,
                // A missing prediction is an error without a label to rank.
                (None, _) => {}
            }
        }
        let errors = rows.len() - correct;
        let accuracy_pct = if rows.is_empty() {
            f64::NAN
        } else {
            correct as f64 / rows.len() as f64 * 100.0
        };
        if name == schema.machine() {
            machine_counter = counter.clone();
        } else {
            human_accuracies.push(accuracy_pct);
            for (label, count) in &counter {
                *human_counter.entry(label.clone()).or_insert(0) += count;
            }
        }
        annotators.push(AnnotatorBreakdown {
            annotator: name.to_string(),
            accuracy_pct,
            correct,
            errors,
            top_errors: top_counts(&counter, top_k),
        });
    }

    let mean_human_accuracy_pct = if rows.is_empty() {
        f64::NAN
    } else {
        human_accuracies.iter().sum::<f64>() / human_accuracies.len() as f64
    };

    let analysis = GroupAnalysis {
        name: spec.name.clone(),
        n_rows: rows.len(),
        annotators,
        mean_human_accuracy_pct,
        pooled_human_errors: top_counts(&human_counter, top_k),
    };
    Ok((analysis, machine_counter, human_counter))
}

/// Count-descending (label-ascending on ties) head of a counter.
fn top_counts(counter: &HashMap<Label, usize>, k: usize) -> Vec<LabelCount> {
    let mut entries: Vec<(&Label, usize)> = counter.iter().map(|(l, &c)| (l, c)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .take(k)
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect()
}

// =============================================================================
// Rendering
// =============================================================================

impl AnalysisReport {
    /// Human-readable summary: one section per group, then the matrices.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Error analysis ===\n");
        out.push_str(&format!("Generated: {}\n", self.timestamp));
        out.push_str(&format!("Rows: {}\n", self.n_rows));

        for group in &self.groups {
            out.push('\n');
            if group.n_rows == 0 {
                out.push_str(&format!("## {} (no matching rows)\n", group.name));
                continue;
            }
            out.push_str(&format!("## {} (n={})\n", group.name, group.n_rows));
            for ann in &group.annotators {
                out.push_str(&format!(
                    "  {}: accuracy {:.1}% ({} correct, {} errors)",
                    ann.annotator, ann.accuracy_pct, ann.correct, ann.errors
                ));
                if !ann.top_errors.is_empty() {
                    out.push_str(&format!("; top errors: {}", format_counts(&ann.top_errors)));
                }
                out.push('\n');
            }
            out.push_str(&format!(
                "  Mean human accuracy: {:.1}%\n",
                group.mean_human_accuracy_pct
            ));
            if !group.pooled_human_errors.is_empty() {
                out.push_str(&format!(
                    "  Pooled human errors: {}\n",
                    format_counts(&group.pooled_human_errors)
                ));
            }
        }

        if !self.error_labels.is_empty() {
            out.push('\n');
            out.push_str(&self.matrix_section(
                &format!("{} errors by label", self.schema.machine()),
                &self.machine_error_matrix,
            ));
            out.push('\n');
            out.push_str(&self.matrix_section("Human errors by label", &self.human_error_matrix));
        }
        out
    }

    fn matrix_section(&self, title: &str, matrix: &[Vec<usize>]) -> String {
        let name_w = self
            .groups
            .iter()
            .map(|g| g.name.len())
            .chain(std::iter::once("group".len()))
            .max()
            .unwrap_or(5);
        let widths: Vec<usize> = self
            .error_labels
            .iter()
            .enumerate()
            .map(|(j, label)| {
                matrix
                    .iter()
                    .map(|row| row[j].to_string().len())
                    .chain(std::iter::once(label.len()))
                    .max()
                    .unwrap_or(1)
            })
            .collect();

        let mut out = format!("## {}\n", title);
        out.push_str(&format!("  {:<1$}", "group", name_w));
        for (label, w) in self.error_labels.iter().zip(widths.iter().copied()) {
            out.push_str(&format!("  {:>1$}", label, w));
        }
        out.push('\n');
        for (group, row) in self.groups.iter().zip(matrix) {
            out.push_str(&format!("  {:<1$}", group.name, name_w));
            for (count, w) in row.iter().zip(widths.iter().copied()) {
                out.push_str(&format!("  {:>1$}", count, w));
            }
            out.push('\n');
        }
        out
    }
}

fn format_counts(counts: &[LabelCount]) -> String {
    counts
        .iter()
        .map(|c| format!("{} ({})", c.label, c.count))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

// =============================================================================
// Tests
// =============================================================================

//! The agreement report: every chance-corrected statistic in one pass.
//!
//! [`AgreementReport::compute`] walks a [`RatingTable`] once per column pair
//! and returns a plain value; nothing is printed until the caller formats
//! it. The sections mirror the questions the dataset was annotated to
//! answer, in the order they are reported:
//!
//! 1. human-human pairwise Cohen's kappa (each unordered pair once) and
//!    the NaN-skipping mean;
//! 2. Fleiss' kappa across the human panel, over rows where every human
//!    answered;
//! 3. each human against the machine column: kappa plus raw agreement,
//!    and the mean kappa;
//! 4. each human against gold: accuracy plus kappa;
//! 5. the machine against gold: accuracy plus kappa.
//!
//! ```rust
//! use accordo::{AgreementReport, RaterSchema, RatingTable};
//!
//! let data = "item_id;G;H1;H2;H3;H4;H5;A\n\
//!             1;su;su;su;su;su;con;su\n\
//!             2;con;con;su;con;con;con;con\n";
//! let table = RatingTable::from_reader(data.as_bytes(), b';').unwrap();
//! let report = AgreementReport::compute(&table, &RaterSchema::compact()).unwrap();
//! assert_eq!(report.machine_gold.n, 2);
//! println!("{}", report);
//! ```

use crate::error::{Error, Result};
use crate::schema::RaterSchema;
use crate::stats::{cohen_kappa, fleiss_kappa, kappa_interpretation, nan_mean, observed_agreement};
use crate::table::RatingTable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// =============================================================================
// Report structure
// =============================================================================

/// Cohen's kappa for one unordered pair of raters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairAgreement {
    /// First rater column.
    pub left: String,
    /// Second rater column.
    pub right: String,
    /// Co-present rows the statistic was computed over.
    pub n: usize,
    /// Cohen's kappa; NaN when undefined.
    pub kappa: f64,
}

/// One rater column measured against a reference column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaterAgreement {
    /// The rater column.
    pub rater: String,
    /// Co-present rows the statistics were computed over.
    pub n: usize,
    /// Raw observed agreement in [0, 1]; NaN when `n` is 0.
    pub observed: f64,
    /// Cohen's kappa; NaN when undefined.
    pub kappa: f64,
}

/// Fleiss' kappa over the human panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleissAgreement {
    /// The coefficient; NaN when undefined.
    pub kappa: f64,
    /// Rows where every human answered.
    pub n_items: usize,
    /// Distinct labels among those rows.
    pub n_categories: usize,
    /// Panel size.
    pub n_raters: usize,
}

/// All agreement statistics for one table under one schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementReport {
    /// RFC 3339 generation time.
    pub timestamp: String,
    /// Data rows in the table.
    pub n_rows: usize,
    /// The column roles the report was computed under.
    pub schema: RaterSchema,
    /// Human-human pairwise kappa, schema order, each pair once.
    pub human_human: Vec<PairAgreement>,
    /// NaN-skipping mean of the pairwise kappas.
    pub human_human_mean_kappa: f64,
    /// Fleiss' kappa across the human panel.
    pub fleiss: FleissAgreement,
    /// Each human against the machine column.
    pub human_machine: Vec<RaterAgreement>,
    /// NaN-skipping mean of the human-machine kappas.
    pub human_machine_mean_kappa: f64,
    /// Each human against gold.
    pub human_gold: Vec<RaterAgreement>,
    /// The machine column against gold.
    pub machine_gold: RaterAgreement,
}

// =============================================================================
// Computation
// =============================================================================

impl AgreementReport {
    /// Compute every statistic for `table` under `schema`.
    ///
    /// Fails only on schema problems (a role column the table lacks). A
    /// pair with no co-present rows yields NaN for that pair and nothing
    /// else.
    pub fn compute(table: &RatingTable, schema: &RaterSchema) -> Result<Self> {
        schema.validate_against(table.headers())?;
        let humans = schema.humans();

        let mut human_human = Vec::new();
        for (i, left) in humans.iter().enumerate() {
            for right in &humans[i + 1..] {
                let pairs = table.paired(left, right)?;
                human_human.push(PairAgreement {
                    left: left.clone(),
                    right: right.clone(),
                    n: pairs.len(),
                    kappa: cohen_kappa(&pairs),
                });
            }
        }
        let hh_kappas: Vec<f64> = human_human.iter().map(|p| p.kappa).collect();

        let complete = table.complete_rows(humans)?;
        let categories: HashSet<&str> = complete
            .iter()
            .flat_map(|row| row.iter().map(|l| l.as_str()))
            .collect();
        let fleiss = FleissAgreement {
            kappa: fleiss_kappa(&complete),
            n_items: complete.len(),
            n_categories: categories.len(),
            n_raters: humans.len(),
        };

        let human_machine: Vec<RaterAgreement> = humans
            .iter()
            .map(|h| Self::against(table, h, schema.machine()))
            .collect::<Result<_>>()?;
        let hm_kappas: Vec<f64> = human_machine.iter().map(|r| r.kappa).collect();

        let human_gold: Vec<RaterAgreement> = humans
            .iter()
            .map(|h| Self::against(table, h, schema.gold()))
            .collect::<Result<_>>()?;

        let machine_gold = Self::against(table, schema.machine(), schema.gold())?;

        Ok(AgreementReport {
            timestamp: chrono::Utc::now().to_rfc3339(),
            n_rows: table.n_rows(),
            schema: schema.clone(),
            human_human,
            human_human_mean_kappa: nan_mean(&hh_kappas),
            fleiss,
            human_machine,
            human_machine_mean_kappa: nan_mean(&hm_kappas),
            human_gold,
            machine_gold,
        })
    }

    fn against(table: &RatingTable, rater: &str, reference: &str) -> Result<RaterAgreement> {
        let pairs = table.paired(rater, reference)?;
        Ok(RaterAgreement {
            rater: rater.to_string(),
            n: pairs.len(),
            observed: observed_agreement(&pairs),
            kappa: cohen_kappa(&pairs),
        })
    }
}

// =============================================================================
// Rendering
// =============================================================================

impl AgreementReport {
    /// Human-readable summary, one section per statistic group.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Inter-annotator agreement ===\n");
        out.push_str(&format!("Generated: {}\n", self.timestamp));
        out.push_str(&format!("Rows: {}\n\n", self.n_rows));

        out.push_str("## Human-human\n");
        out.push_str(&format!(
            "  Mean pairwise kappa: {:.4} ({})\n",
            self.human_human_mean_kappa,
            kappa_interpretation(self.human_human_mean_kappa)
        ));
        for pair in &self.human_human {
            out.push_str(&format!(
                "  {}-{}: kappa {:.4} (n={})\n",
                pair.left, pair.right, pair.kappa, pair.n
            ));
        }
        out.push_str(&format!(
            "  Fleiss' kappa ({} raters, {} complete rows, {} categories): {:.4} ({})\n\n",
            self.fleiss.n_raters,
            self.fleiss.n_items,
            self.fleiss.n_categories,
            self.fleiss.kappa,
            kappa_interpretation(self.fleiss.kappa)
        ));

        out.push_str(&format!("## Human-machine ({})\n", self.schema.machine()));
        for row in &self.human_machine {
            out.push_str(&format!(
                "  {}: kappa {:.4}, raw agreement {:.1}% (n={})\n",
                row.rater,
                row.kappa,
                row.observed * 100.0,
                row.n
            ));
        }
        out.push_str(&format!(
            "  Mean kappa: {:.4} ({})\n\n",
            self.human_machine_mean_kappa,
            kappa_interpretation(self.human_machine_mean_kappa)
        ));

        out.push_str(&format!("## Against gold ({})\n", self.schema.gold()));
        for row in &self.human_gold {
            out.push_str(&format!(
                "  {}: accuracy {:.1}%, kappa {:.4} (n={})\n",
                row.rater,
                row.observed * 100.0,
                row.kappa,
                row.n
            ));
        }
        out.push_str(&format!(
            "  {}: accuracy {:.1}%, kappa {:.4} (n={})\n",
            self.machine_gold.rater,
            self.machine_gold.observed * 100.0,
            self.machine_gold.kappa,
            self.machine_gold.n
        ));
        out
    }

    /// Serialize as pretty JSON. NaN coefficients become `null`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::invalid_input(format!("JSON serialization failed: {}", e)))
    }
}

impl fmt::Display for AgreementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn compact_table(data: &str) -> RatingTable {
        RatingTable::from_reader(data.as_bytes(), b';').unwrap()
    }

    const HEADER: &str = "item_id;G;H1;H2;H3;H4;H5;A\n";

    #[test]
    fn test_single_dissent_row() {
        let data = format!("{}1;a;a;a;b;a;a;a\n", HEADER);
        let table = compact_table(&data);
        let report = AgreementReport::compute(&table, &RaterSchema::compact()).unwrap();

        for row in &report.human_gold {
            let expected = if row.rater == "H3" { 0.0 } else { 1.0 };
            assert!(
                (row.observed - expected).abs() < 1e-12,
                "{}: got {}",
                row.rater,
                row.observed
            );
        }
        assert!((report.machine_gold.observed - 1.0).abs() < 1e-12);
        assert_eq!(report.human_human.len(), 10, "C(5,2) pairs");
    }

    #[test]
    fn test_empty_machine_column_yields_nan_only_there() {
        let data = format!("{}1;a;a;a;a;a;b;\n2;b;b;b;b;b;a;\n", HEADER);
        let table = compact_table(&data);
        let report = AgreementReport::compute(&table, &RaterSchema::compact()).unwrap();

        for row in &report.human_machine {
            assert_eq!(row.n, 0);
            assert!(row.kappa.is_nan());
            assert!(row.observed.is_nan());
        }
        assert!(report.human_machine_mean_kappa.is_nan());
        assert!(report.machine_gold.kappa.is_nan());
        // Gold-side statistics are untouched.
        assert!((report.human_gold[0].observed - 1.0).abs() < 1e-12);
        assert_eq!(report.human_gold[0].n, 2);
    }

    #[test]
    fn test_unanimous_humans() {
        let data = format!("{}1;a;a;a;a;a;a;a\n2;b;b;b;b;b;b;a\n", HEADER);
        let table = compact_table(&data);
        let report = AgreementReport::compute(&table, &RaterSchema::compact()).unwrap();

        assert!((report.human_human_mean_kappa - 1.0).abs() < 1e-12);
        for pair in &report.human_human {
            assert!((pair.kappa - 1.0).abs() < 1e-12);
        }
        assert!((report.fleiss.kappa - 1.0).abs() < 1e-12);
        assert_eq!(report.fleiss.n_items, 2);
        assert_eq!(report.fleiss.n_categories, 2);
    }

    #[test]
    fn test_fleiss_drops_incomplete_rows() {
        // Second row is missing H5 and must not feed Fleiss.
        let data = format!("{}1;a;a;a;a;a;b;a\n2;a;a;a;a;a;;a\n", HEADER);
        let table = compact_table(&data);
        let report = AgreementReport::compute(&table, &RaterSchema::compact()).unwrap();
        assert_eq!(report.fleiss.n_items, 1);
        assert_eq!(report.n_rows, 2);
    }

    #[test]
    fn test_missing_schema_column_is_fatal() {
        let table = compact_table("item_id;G;H1;H2;A\n1;a;a;a;a\n");
        let err = AgreementReport::compute(&table, &RaterSchema::compact()).unwrap_err();
        assert!(err.to_string().contains("H3"));
    }

    #[test]
    fn test_summary_mentions_every_section() {
        let data = format!("{}1;a;a;a;b;a;a;a\n", HEADER);
        let table = compact_table(&data);
        let report = AgreementReport::compute(&table, &RaterSchema::compact()).unwrap();
        let text = report.summary();
        assert!(text.contains("Mean pairwise kappa"));
        assert!(text.contains("Fleiss' kappa"));
        assert!(text.contains("Human-machine (A)"));
        assert!(text.contains("Against gold (G)"));
    }

    #[test]
    fn test_json_renders_nan_as_null() {
        let data = format!("{}1;a;a;a;a;a;a;\n", HEADER);
        let table = compact_table(&data);
        let report = AgreementReport::compute(&table, &RaterSchema::compact()).unwrap();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"machine_gold\""));
        assert!(json.contains("null"), "NaN must serialize as null");
    }
}

//! End-to-end tests for the error-analysis pipeline: group filtering over
//! a file on disk, per-annotator accuracy, wrong-label rankings, and the
//! group-by-label matrices.

use accordo::{AnalysisReport, GroupSpec, RaterSchema, RatingTable};
use std::fs;
use tempfile::TempDir;

fn write_table(content: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("ratings.csv");
    fs::write(&path, content).expect("Failed to write test file");
    (dir, path.to_string_lossy().to_string())
}

/// Four rows in the named layout. The machine misses rows 2 and 4,
/// MARTYNA misses row 2, FEDERICO misses row 4.
const NAMED_TABLE: &str = "GOLD;BERT;MARTYNA;FRANCESCO;FEDERICO;SARA;LARA;MEANING\n\
                           su;su;su;su;su;su;su;movement upwards\n\
                           su;con;con;su;su;su;su;Succession of events\n\
                           con;con;con;con;con;con;con;contact with surface\n\
                           su;fig;su;su;fig;su;su;greater accumulation\n";

fn named_report(groups: &[GroupSpec], top_k: usize) -> AnalysisReport {
    let (_dir, path) = write_table(NAMED_TABLE);
    let table = RatingTable::from_path(&path, b';').expect("load failed");
    let schema = RaterSchema::detect(table.headers()).expect("named headers should detect");
    AnalysisReport::compute(&table, &schema, groups, top_k).expect("compute failed")
}

// =============================================================================
// Group filtering
// =============================================================================

#[test]
fn test_meaning_group_selects_matching_rows_only() {
    let spec = GroupSpec::parse("SU / Succession:su:succession").expect("valid spec");
    let report = named_report(&[spec], 3);

    let g = &report.groups[0];
    assert_eq!(g.name, "SU / Succession");
    assert_eq!(g.n_rows, 1, "only row 2 carries gold su and the keyword");

    // Machine first, then the humans in schema order.
    let bert = &g.annotators[0];
    assert_eq!(bert.annotator, "BERT");
    assert_eq!(bert.correct, 0);
    assert_eq!(bert.errors, 1);
    assert_eq!(bert.top_errors[0].label, "con");
    assert_eq!(bert.top_errors[0].count, 1);

    let martyna = &g.annotators[1];
    assert_eq!(martyna.annotator, "MARTYNA");
    assert!((martyna.accuracy_pct - 0.0).abs() < 1e-9);
    let francesco = &g.annotators[2];
    assert!((francesco.accuracy_pct - 100.0).abs() < 1e-9);

    // One of five humans wrong on the single row.
    assert!((g.mean_human_accuracy_pct - 80.0).abs() < 1e-9);
    assert_eq!(g.pooled_human_errors[0].label, "con");
    assert_eq!(g.pooled_human_errors[0].count, 1);
}

#[test]
fn test_meaning_pattern_is_case_insensitive_both_ways() {
    // The cell reads "Succession of events"; the pattern is uppercase.
    let spec = GroupSpec::parse("S:su:SUCCESSION").expect("valid spec");
    let report = named_report(&[spec], 3);
    assert_eq!(report.groups[0].n_rows, 1);
}

#[test]
fn test_gold_only_group_and_matrices() {
    let succession = GroupSpec::parse("SU / Succession:su:succession").expect("valid spec");
    let all_su = GroupSpec::parse("SU:su").expect("valid spec");
    let report = named_report(&[succession, all_su], 3);

    assert_eq!(report.groups.len(), 2);
    let su = &report.groups[1];
    assert_eq!(su.n_rows, 3, "rows 1, 2 and 4 carry gold su");

    let bert = &su.annotators[0];
    assert_eq!(bert.correct, 1);
    assert_eq!(bert.errors, 2);
    assert!((bert.accuracy_pct - 1.0 / 3.0 * 100.0).abs() < 1e-9);
    // Equal counts rank alphabetically.
    assert_eq!(bert.top_errors[0].label, "con");
    assert_eq!(bert.top_errors[1].label, "fig");

    let expected_mean = (2.0 / 3.0 * 100.0 * 2.0 + 300.0) / 5.0;
    assert!(
        (su.mean_human_accuracy_pct - expected_mean).abs() < 1e-9,
        "got {}",
        su.mean_human_accuracy_pct
    );

    // Union of wrong labels over all groups, sorted.
    assert_eq!(
        report.error_labels,
        vec!["con".to_string(), "fig".to_string()]
    );
    // groups x labels, configuration order.
    assert_eq!(report.machine_error_matrix, vec![vec![1, 0], vec![1, 1]]);
    assert_eq!(report.human_error_matrix, vec![vec![1, 0], vec![1, 1]]);
}

#[test]
fn test_empty_group_is_reported_and_harmless() {
    let none = GroupSpec::parse("Ghost:zz").expect("valid spec");
    let all_su = GroupSpec::parse("SU:su").expect("valid spec");
    let report = named_report(&[none, all_su], 3);

    let ghost = &report.groups[0];
    assert_eq!(ghost.n_rows, 0);
    assert!(ghost.mean_human_accuracy_pct.is_nan());
    assert!(ghost.pooled_human_errors.is_empty());
    // The empty group surfaces in the summary and zeroes its matrix row.
    assert!(report.summary().contains("Ghost (no matching rows)"));
    assert_eq!(report.machine_error_matrix[0], vec![0, 0]);
    // The second group is unaffected.
    assert_eq!(report.groups[1].n_rows, 3);
}

#[test]
fn test_no_groups_means_whole_table() {
    let report = named_report(&[], 3);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].name, "all");
    assert_eq!(report.groups[0].n_rows, 4);
}

// =============================================================================
// Missing labels and ranking depth
// =============================================================================

#[test]
fn test_missing_human_label_is_error_but_unranked() {
    let (_dir, path) = write_table(
        "GOLD;BERT;MARTYNA;FRANCESCO;FEDERICO;SARA;LARA;MEANING\n\
         su;su;;su;su;su;su;upwards\n\
         su;su;;su;su;su;su;upwards\n",
    );
    let table = RatingTable::from_path(&path, b';').expect("load failed");
    let schema = RaterSchema::detect(table.headers()).expect("detect");
    let report = AnalysisReport::compute(&table, &schema, &[], 3).expect("compute failed");

    let martyna = report.groups[0]
        .annotators
        .iter()
        .find(|a| a.annotator == "MARTYNA")
        .expect("MARTYNA present");
    assert_eq!(martyna.correct, 0);
    assert_eq!(martyna.errors, 2, "missing labels count as errors");
    assert!(
        martyna.top_errors.is_empty(),
        "a missing label is not a rankable wrong label"
    );
    assert!((martyna.accuracy_pct - 0.0).abs() < 1e-9);
}

#[test]
fn test_top_k_truncates_rankings() {
    let report = named_report(&[GroupSpec::parse("SU:su").expect("valid spec")], 1);
    let bert = &report.groups[0].annotators[0];
    assert_eq!(bert.top_errors.len(), 1, "top 1 keeps a single label");
    assert_eq!(report.top_k, 1);
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_summary_contains_groups_and_matrices() {
    let succession = GroupSpec::parse("SU / Succession:su:succession").expect("valid spec");
    let all_su = GroupSpec::parse("SU:su").expect("valid spec");
    let report = named_report(&[succession, all_su], 3);
    let text = report.summary();

    assert!(text.contains("## SU / Succession (n=1)"));
    assert!(text.contains("## SU (n=3)"));
    assert!(text.contains("BERT errors by label"));
    assert!(text.contains("Human errors by label"));
    assert!(text.contains("Mean human accuracy"));
}

#[test]
fn test_json_analysis_is_valid() {
    let report = named_report(&[GroupSpec::parse("SU:su").expect("valid spec")], 2);
    let json = report.to_json().expect("serialization failed");
    let value: serde_json::Value = serde_json::from_str(&json).expect("output must parse");

    assert_eq!(value["top_k"], 2);
    assert_eq!(value["groups"][0]["name"], "SU");
    assert_eq!(
        value["groups"][0]["annotators"][0]["annotator"], "BERT",
        "machine column comes first"
    );
    assert_eq!(value["error_labels"][0], "con");
    assert_eq!(value["machine_error_matrix"][0][0], 1);
}

#[test]
fn test_meaning_filter_without_meaning_column_is_fatal() {
    let (_dir, path) = write_table("item_id;G;H1;H2;H3;H4;H5;A\n1;a;a;a;a;a;a;a\n");
    let table = RatingTable::from_path(&path, b';').expect("load failed");
    let schema = RaterSchema::detect(table.headers()).expect("detect");
    let spec = GroupSpec::parse("g:a:pattern").expect("valid spec");
    let err = AnalysisReport::compute(&table, &schema, &[spec], 3)
        .expect_err("compact layout has no meaning column");
    assert!(
        err.to_string().contains("no meaning column"),
        "got: {}",
        err
    );
}

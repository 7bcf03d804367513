//! Fleiss' kappa for a fixed panel of raters.

use crate::label::Label;
use std::collections::HashMap;

/// Fleiss' kappa over complete items.
///
/// Each element of `rows` is one item's ratings, one label per rater, every
/// rater present (incomplete items must be dropped before calling). The
/// categories are the labels observed anywhere in `rows`. Per item i,
///
/// ```text
/// P_i = (sum_j n_ij^2 - r) / (r (r - 1))
/// ```
///
/// with r raters and n_ij ratings of item i in category j; kappa is
/// (mean P_i - p_e) / (1 - p_e) with p_e the sum of squared pooled category
/// proportions. NaN when there are no items, fewer than two raters, or
/// p_e is 1 (a single category, the 0/0 case).
#[must_use]
pub fn fleiss_kappa(rows: &[Vec<Label>]) -> f64 {
    let Some(first) = rows.first() else {
        return f64::NAN;
    };
    let r = first.len();
    if r < 2 {
        return f64::NAN;
    }

    // Category indices in first-seen order.
    let mut index: HashMap<&Label, usize> = HashMap::new();
    for row in rows {
        for label in row {
            let next = index.len();
            index.entry(label).or_insert(next);
        }
    }
    let k = index.len();

    // Item-by-category count matrix.
    let n = rows.len();
    let mut counts = vec![vec![0usize; k]; n];
    for (i, row) in rows.iter().enumerate() {
        for label in row {
            counts[i][index[label]] += 1;
        }
    }

    let r_f = r as f64;
    let p_bar = counts
        .iter()
        .map(|row| {
            let sum_sq: f64 = row.iter().map(|&c| (c * c) as f64).sum();
            (sum_sq - r_f) / (r_f * (r_f - 1.0))
        })
        .sum::<f64>()
        / n as f64;

    let total = (n * r) as f64;
    let p_e: f64 = (0..k)
        .map(|j| {
            let col: usize = counts.iter().map(|row| row[j]).sum();
            let p = col as f64 / total;
            p * p
        })
        .sum();

    if (1.0 - p_e).abs() < 1e-10 {
        return f64::NAN;
    }
    (p_bar - p_e) / (1.0 - p_e)
}

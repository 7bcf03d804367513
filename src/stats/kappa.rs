//! Two-rater agreement: observed proportion and Cohen's kappa.

use crate::label::Label;
use std::collections::HashMap;

/// Fraction of pairs whose two labels are equal. NaN when `pairs` is empty.
#[must_use]
pub fn observed_agreement(pairs: &[(Label, Label)]) -> f64 {
    if pairs.is_empty() {
        return f64::NAN;
    }
    let agreed = pairs.iter().filter(|(a, b)| a == b).count();
    agreed as f64 / pairs.len() as f64
}

/// Cohen's kappa over the union of both raters' vocabularies.
///
/// kappa = (p_o - p_e) / (1 - p_e), where p_o is the observed agreement and
/// p_e the agreement expected from the two marginal label distributions.
/// NaN when `pairs` is empty or when p_e is 1 (both raters confined to one
/// shared category, the 0/0 case).
#[must_use]
pub fn cohen_kappa(pairs: &[(Label, Label)]) -> f64 {
    if pairs.is_empty() {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mut left: HashMap<&Label, usize> = HashMap::new();
    let mut right: HashMap<&Label, usize> = HashMap::new();
    let mut agreed = 0usize;
    for (a, b) in pairs {
        *left.entry(a).or_insert(0) += 1;
        *right.entry(b).or_insert(0) += 1;
        if a == b {
            agreed += 1;
        }
    }
    let p_o = agreed as f64 / n;
    let p_e: f64 = left
        .iter()
        .map(|(label, &ca)| {
            let cb = right.get(label).copied().unwrap_or(0);
            (ca as f64 / n) * (cb as f64 / n)
        })
        .sum();
    if (1.0 - p_e).abs() < 1e-10 {
        return f64::NAN;
    }
    (p_o - p_e) / (1.0 - p_e)
}

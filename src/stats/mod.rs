//! Chance-corrected agreement statistics.
//!
//! Pure functions over normalized labels. All coefficients share one
//! convention: an undefined statistic is `f64::NAN`, never an error and
//! never a panic. A pair of columns with no co-present rows, or a dataset
//! where chance agreement is already total, produces NaN and leaves every
//! other statistic in the run untouched.
//!
//! # References
//!
//! - Cohen (1960), "A coefficient of agreement for nominal scales"
//! - Fleiss (1971), "Measuring nominal scale agreement among many raters"
//! - Landis & Koch (1977), the conventional kappa grading

mod fleiss;
mod kappa;

pub use fleiss::fleiss_kappa;
pub use kappa::{cohen_kappa, observed_agreement};

/// Mean of the non-NaN values; NaN when every value is NaN (or none given).
#[must_use]
pub fn nan_mean(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values.iter().filter(|v| !v.is_nan()) {
        sum += v;
        count += 1;
    }
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Landis & Koch (1977) grading of a kappa value.
#[must_use]
pub fn kappa_interpretation(kappa: f64) -> &'static str {
    if kappa.is_nan() {
        "Undefined (no data)"
    } else if kappa < 0.0 {
        "Less than chance agreement"
    } else if kappa < 0.20 {
        "Slight agreement"
    } else if kappa < 0.40 {
        "Fair agreement"
    } else if kappa < 0.60 {
        "Moderate agreement"
    } else if kappa < 0.80 {
        "Substantial agreement"
    } else {
        "Almost perfect agreement"
    }
}

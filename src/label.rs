//! Normalized annotation labels.
//!
//! Raw cells arrive with stray whitespace, mixed case, and the occasional
//! compatibility character from whichever spreadsheet produced them. All
//! comparisons in this crate run over the normalized form: NFKC, trimmed,
//! lowercased. Missing cells never reach a `Label`; they stay `None` at the
//! table layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// A normalized label. Equality is exact string equality post-normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Normalize a raw cell: NFKC, trim, lowercase.
    ///
    /// Idempotent: normalizing an already-normalized label is a no-op.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let canonical: String = raw.nfkc().collect();
        Label(canonical.trim().to_lowercase())
    }

    /// The normalized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the cell normalized to nothing (was all whitespace).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

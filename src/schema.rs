//! Column roles: which columns are gold, human, and machine.
//!
//! The datasets this crate grew up on come in two layouts:
//!
//! ```text
//! ┌──────────┬──────┬─────────────────────────────────────────┬─────────┐
//! │ layout   │ gold │ humans                                  │ machine │
//! ├──────────┼──────┼─────────────────────────────────────────┼─────────┤
//! │ compact  │ G    │ H1 H2 H3 H4 H5                          │ A       │
//! │ named    │ GOLD │ MARTYNA FRANCESCO FEDERICO SARA LARA    │ BERT    │
//! └──────────┴──────┴─────────────────────────────────────────┴─────────┘
//! ```
//!
//! Rather than hard-coding either set, every computation takes a
//! [`RaterSchema`] naming the role columns. The presets reproduce the two
//! layouts, [`RaterSchema::detect`] picks one from a header row, and custom
//! schemas can be assembled from CLI flags. The optional `meaning` column
//! carries the free-text annotation some datasets use for group filtering.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Role assignment for the columns of a rating table.
///
/// Invariants: at least one human column, and no column name holds two roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaterSchema {
    gold: String,
    humans: Vec<String>,
    machine: String,
    meaning: Option<String>,
}

impl RaterSchema {
    /// The `G` / `H1`..`H5` / `A` layout.
    #[must_use]
    pub fn compact() -> Self {
        RaterSchema {
            gold: "G".to_string(),
            humans: ["H1", "H2", "H3", "H4", "H5"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            machine: "A".to_string(),
            meaning: None,
        }
    }

    /// The named-annotator layout with a `MEANING` column.
    #[must_use]
    pub fn named() -> Self {
        RaterSchema {
            gold: "GOLD".to_string(),
            humans: ["MARTYNA", "FRANCESCO", "FEDERICO", "SARA", "LARA"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            machine: "BERT".to_string(),
            meaning: Some("MEANING".to_string()),
        }
    }

    /// Build a schema from explicit column names.
    ///
    /// Fails if `humans` is empty or any column name is assigned twice.
    pub fn custom(
        gold: impl Into<String>,
        humans: Vec<String>,
        machine: impl Into<String>,
        meaning: Option<String>,
    ) -> Result<Self> {
        let schema = RaterSchema {
            gold: gold.into(),
            humans,
            machine: machine.into(),
            meaning,
        };
        if schema.humans.is_empty() {
            return Err(Error::schema("at least one human column is required"));
        }
        let mut seen: HashSet<String> = HashSet::new();
        for name in schema.declared_columns() {
            if !seen.insert(name.to_string()) {
                return Err(Error::schema(format!(
                    "column '{}' is assigned more than one role",
                    name
                )));
            }
        }
        Ok(schema)
    }

    /// Pick the preset whose declared columns all appear in `headers`.
    ///
    /// Tried in order: compact, then named. Errors when neither fits.
    pub fn detect(headers: &[String]) -> Result<Self> {
        for preset in [Self::compact(), Self::named()] {
            if preset
                .declared_columns()
                .all(|name| headers.iter().any(|h| h == name))
            {
                return Ok(preset);
            }
        }
        Err(Error::schema(format!(
            "header matches no known layout (got: {})",
            headers.join(", ")
        )))
    }

    /// Check that every declared column exists in `headers`.
    pub fn validate_against(&self, headers: &[String]) -> Result<()> {
        let missing: Vec<&str> = self
            .declared_columns()
            .filter(|name| !headers.iter().any(|h| h == name))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::schema(format!(
                "column(s) not in header: {}",
                missing.join(", ")
            )))
        }
    }

    /// The gold-standard column.
    #[must_use]
    pub fn gold(&self) -> &str {
        &self.gold
    }

    /// The human rater columns, in configured order.
    #[must_use]
    pub fn humans(&self) -> &[String] {
        &self.humans
    }

    /// The automated-system column.
    #[must_use]
    pub fn machine(&self) -> &str {
        &self.machine
    }

    /// The free-text meaning column, if the layout has one.
    #[must_use]
    pub fn meaning(&self) -> Option<&str> {
        self.meaning.as_deref()
    }

    /// Machine column followed by the human columns.
    ///
    /// The order annotators are reported in.
    pub fn annotator_columns(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.machine.as_str()).chain(self.humans.iter().map(String::as_str))
    }

    /// Gold, machine, and human columns (no meaning).
    fn role_columns(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.gold.as_str()).chain(self.annotator_columns())
    }

    /// Every column the schema names, meaning included.
    fn declared_columns(&self) -> impl Iterator<Item = &str> {
        self.role_columns().chain(self.meaning.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect_compact() {
        let h = headers(&["item_id", "G", "H1", "H2", "H3", "H4", "H5", "A"]);
        let schema = RaterSchema::detect(&h).unwrap();
        assert_eq!(schema, RaterSchema::compact());
    }

    #[test]
    fn test_detect_named() {
        let h = headers(&[
            "ID", "GOLD", "BERT", "MARTYNA", "FRANCESCO", "FEDERICO", "SARA", "LARA", "MEANING",
        ]);
        let schema = RaterSchema::detect(&h).unwrap();
        assert_eq!(schema, RaterSchema::named());
    }

    #[test]
    fn test_detect_unknown_header_fails() {
        let h = headers(&["foo", "bar"]);
        let err = RaterSchema::detect(&h).unwrap_err();
        assert!(err.to_string().contains("no known layout"));
    }

    #[test]
    fn test_custom_requires_humans() {
        let err = RaterSchema::custom("G", vec![], "A", None).unwrap_err();
        assert!(err.to_string().contains("at least one human"));
    }

    #[test]
    fn test_detect_named_requires_meaning_column() {
        let h = headers(&[
            "GOLD", "BERT", "MARTYNA", "FRANCESCO", "FEDERICO", "SARA", "LARA",
        ]);
        assert!(RaterSchema::detect(&h).is_err());
    }

    #[test]
    fn test_custom_rejects_duplicate_roles() {
        let err =
            RaterSchema::custom("G", vec!["H1".into(), "G".into()], "A", None).unwrap_err();
        assert!(err.to_string().contains("more than one role"));

        let err = RaterSchema::custom("G", vec!["H1".into()], "A", Some("H1".into())).unwrap_err();
        assert!(err.to_string().contains("more than one role"));
    }

    #[test]
    fn test_validate_against_reports_missing() {
        let schema = RaterSchema::compact();
        let h = headers(&["item_id", "G", "H1", "H2", "A"]);
        let err = schema.validate_against(&h).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("H3") && msg.contains("H4") && msg.contains("H5"));
    }

    #[test]
    fn test_annotator_order_is_machine_then_humans() {
        let schema = RaterSchema::named();
        let cols: Vec<&str> = schema.annotator_columns().collect();
        assert_eq!(cols[0], "BERT");
        assert_eq!(cols.len(), 6);
    }
}

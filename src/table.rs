//! The in-memory rating table.
//!
//! One table per input file: a header row naming the columns, then one
//! `Option<Label>` per row per column. Cells are normalized at load time
//! (see [`Label::normalize`]); empty and whitespace-only cells, and cells a
//! short row simply does not have, are `None`. A row with more fields than
//! the header is malformed (usually an unquoted delimiter inside a cell) and
//! fails the load. Rows keep their file order, and every positional
//! comparison in this crate means "same row index in this table".

use crate::error::{Error, Result};
use crate::label::Label;
use std::path::Path;

/// A parsed annotation table. Column-major, normalized, immutable.
#[derive(Debug, Clone)]
pub struct RatingTable {
    headers: Vec<String>,
    columns: Vec<Vec<Option<Label>>>,
}

impl RatingTable {
    /// Load a delimited file with a header row.
    pub fn from_path(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        let table = Self::read(rdr)?;
        log::info!(
            "loaded {} rows x {} columns from {}",
            table.n_rows(),
            table.headers.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse from any reader (used by tests and the library API).
    pub fn from_reader<R: std::io::Read>(reader: R, delimiter: u8) -> Result<Self> {
        let rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        Self::read(rdr)
    }

    fn read<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Self> {
        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let mut columns: Vec<Vec<Option<Label>>> = vec![Vec::new(); headers.len()];
        for result in rdr.records() {
            let record = result?;
            if record.len() > headers.len() {
                let line = record.position().map_or(0, csv::Position::line);
                return Err(Error::schema(format!(
                    "line {} has {} fields but the header has {}",
                    line,
                    record.len(),
                    headers.len()
                )));
            }
            for (i, column) in columns.iter_mut().enumerate() {
                let cell = record
                    .get(i)
                    .map(Label::normalize)
                    .filter(|label| !label.is_empty());
                column.push(cell);
            }
        }
        Ok(RatingTable { headers, columns })
    }

    /// Column names in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// A column by name. First occurrence wins if the header repeats a name.
    pub fn column(&self, name: &str) -> Result<&[Option<Label>]> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::schema(format!("no column named '{}'", name)))?;
        Ok(&self.columns[idx])
    }

    /// Rows where both columns are present, paired by row index.
    pub fn paired(&self, x: &str, y: &str) -> Result<Vec<(Label, Label)>> {
        let xs = self.column(x)?;
        let ys = self.column(y)?;
        Ok(xs
            .iter()
            .zip(ys)
            .filter_map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => Some((a.clone(), b.clone())),
                _ => None,
            })
            .collect())
    }

    /// Rows where every named column is present, as label vectors in the
    /// given column order. Rows with any gap are dropped entirely.
    pub fn complete_rows(&self, names: &[String]) -> Result<Vec<Vec<Label>>> {
        let cols: Vec<&[Option<Label>]> = names
            .iter()
            .map(|n| self.column(n))
            .collect::<Result<_>>()?;
        let mut rows = Vec::new();
        for i in 0..self.n_rows() {
            let row: Option<Vec<Label>> = cols.iter().map(|c| c[i].clone()).collect();
            if let Some(row) = row {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    /// Indices of rows missing at least one of the named columns.
    pub fn incomplete_row_indices(&self, names: &[String]) -> Result<Vec<usize>> {
        let cols: Vec<&[Option<Label>]> = names
            .iter()
            .map(|n| self.column(n))
            .collect::<Result<_>>()?;
        Ok((0..self.n_rows())
            .filter(|&i| cols.iter().any(|c| c[i].is_none()))
            .collect())
    }
}

//! Deterministic row shuffling.
//!
//! Annotation batches are shuffled before being handed out so no annotator
//! sees the items in collection order. The permutation must be reproducible
//! (the same batch can be regenerated months later), so instead of a PRNG
//! this sorts rows by the hash of `(seed, row index)`. Same seed, same
//! permutation, on any platform.

use crate::error::Result;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

/// Deterministic pseudo-random permutation of `records`.
///
/// Sorts by the hash of `(seed, index)`. Every input element appears
/// exactly once in the output.
#[must_use]
pub fn shuffle_records<T: Clone>(records: &[T], seed: u64) -> Vec<T> {
    if records.len() <= 1 {
        return records.to_vec();
    }
    let mut order: Vec<(usize, u64)> = (0..records.len())
        .map(|i| {
            let mut hasher = DefaultHasher::new();
            seed.hash(&mut hasher);
            i.hash(&mut hasher);
            (i, hasher.finish())
        })
        .collect();
    order.sort_by_key(|&(_, hash)| hash);
    order.iter().map(|&(i, _)| records[i].clone()).collect()
}

/// Shuffle the data rows of a delimited file into `output`.
///
/// The header row stays first; cells are copied through untouched (no
/// normalization, this is a file rewrite, not an analysis). Returns the
/// number of data rows written.
pub fn shuffle_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    delimiter: u8,
    seed: u64,
) -> Result<usize> {
    let input = input.as_ref();
    let output = output.as_ref();

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(input)?;
    let headers = rdr.headers()?.clone();
    let records: Vec<csv::StringRecord> =
        rdr.records().collect::<std::result::Result<_, _>>()?;

    let shuffled = shuffle_records(&records, seed);

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(output)?;
    wtr.write_record(&headers)?;
    for record in &shuffled {
        wtr.write_record(record)?;
    }
    wtr.flush()?;

    log::info!(
        "wrote {} shuffled rows (seed {}) to {}",
        shuffled.len(),
        seed,
        output.display()
    );
    Ok(shuffled.len())
}

//! Error types for accordo.

use thiserror::Error;

/// Result type for accordo operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for accordo operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-input parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Schema problem: a role column is missing from the header, or the
    /// header matches no known column layout.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Invalid input provided (bad group spec, bad delimiter, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Error::Schema(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

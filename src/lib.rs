//! accordo: inter-annotator agreement statistics for hand-labeled data.
//!
//! A small analysis toolkit for annotation campaigns where several humans,
//! one automated system, and an adjudicated gold standard all label the
//! same items. It answers three questions about such a table:
//!
//! - how much do the raters agree, beyond chance ([`AgreementReport`]:
//!   pairwise Cohen's kappa, Fleiss' kappa, raw agreement);
//! - what does each rater get wrong ([`AnalysisReport`]: accuracy and
//!   wrong-label rankings against gold, per phenomenon group);
//! - and, upstream of both, how to hand out items in a reproducible
//!   random order ([`shuffle::shuffle_file`]).
//!
//! Input is a delimited text file with a header row; which columns play
//! the gold, human, and machine roles is a [`RaterSchema`]. Labels are
//! normalized (NFKC, trimmed, lowercased) at load time, and a missing
//! cell is simply `None`, never an error: statistics that have no data
//! come back as NaN.
//!
//! # Example
//!
//! ```rust
//! use accordo::{AgreementReport, RaterSchema, RatingTable};
//!
//! let data = "item_id;G;H1;H2;H3;H4;H5;A\n\
//!             1;su;su;su;su;su;con;su\n\
//!             2;con;con;con;con;con;con;su\n";
//! let table = RatingTable::from_reader(data.as_bytes(), b';')?;
//! let schema = RaterSchema::detect(table.headers())?;
//! let report = AgreementReport::compute(&table, &schema)?;
//! assert_eq!(report.fleiss.n_raters, 5);
//! # Ok::<(), accordo::Error>(())
//! ```

pub mod agreement;
pub mod analysis;
pub mod cli;
pub mod error;
pub mod label;
pub mod schema;
pub mod shuffle;
pub mod stats;
pub mod table;

pub use agreement::AgreementReport;
pub use analysis::{AnalysisReport, GroupSpec};
pub use error::{Error, Result};
pub use label::Label;
pub use schema::RaterSchema;
pub use table::RatingTable;

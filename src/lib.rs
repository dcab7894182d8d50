//! # sortgtf: deterministic sorting of GTF/GFF annotation files
//!
//! GTF files from different sources list their features in different orders.
//! Tools that walk transcripts one at a time need all the features of a transcript
//! to be adjacent and in positional order. `sortgtf` loads an annotation file,
//! orders its records by
//!
//!  1. sequence name,
//!  2. `gene_id` attribute,
//!  3. `transcript_id` attribute,
//!  4. start position,
//!  5. end position,
//!
//! with a stable sort, and writes them back out with every column unchanged.
//!
//! ```no_run
//! use sortgtf::prelude::*;
//!
//! let records = GtfIterator::new("annotation.gtf.gz")?.retain_feature("exon");
//! let sorted = GtfRecords::from_iter(records)?.sort()?;
//! sorted.to_tsv(Some("annotation.sorted.gtf"), None)?;
//! # Ok::<(), GtfError>(())
//! ```
//!
//! Sorting is strict: a record without a `gene_id` or `transcript_id`, or with a
//! non-integer coordinate, fails the whole run and no output is written.

pub mod attributes;
pub mod commands;
pub mod error;
pub mod io;
pub mod key;
pub mod record;
pub mod records;
pub mod reporting;
pub mod test_utilities;
pub mod traits;

pub use error::GtfError;

/// The type of start and end coordinates.
pub type Position = i64;

pub mod prelude {
    pub use crate::attributes::Attributes;
    pub use crate::error::GtfError;
    pub use crate::io::{FeatureFilter, FilteredRecords, GtfIterator};
    pub use crate::key::{compare_records, SortKey};
    pub use crate::record::GtfRecord;
    pub use crate::records::GtfRecords;
    pub use crate::traits::{GtfRecordIterator, TsvSerialize};
}

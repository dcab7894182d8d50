//! Traits used by the sortgtf library.
//!

use crate::{error::GtfError, io::parsers::FilteredRecords, record::GtfRecord};

/// Defines how to serialize something to TSV.
pub trait TsvSerialize {
    // Serialize something to a TSV [`String`].
    fn to_tsv(&self) -> String;
}

/// Defines functionality for filtering [`GtfRecord`] entries as they are read in,
/// based on their sequence names or feature types.
///
/// Exclusion is prioritized over retention: a sequence name passed to
/// [`GtfRecordIterator::exclude_seqnames()`] is dropped even if it is also retained.
pub trait GtfRecordIterator: Iterator<Item = Result<GtfRecord, GtfError>> + Sized {
    fn retain_seqnames(self, seqnames: &[String]) -> FilteredRecords<Self>;
    fn exclude_seqnames(self, seqnames: &[String]) -> FilteredRecords<Self>;
    /// Keep only the records of this feature type (exact, case-sensitive match).
    fn retain_feature(self, feature: &str) -> FilteredRecords<Self>;
}

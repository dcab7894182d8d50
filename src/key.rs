//! The composite sort key of a [`GtfRecord`], and the record ordering built on it.
//!
//! Records are ordered by, in turn:
//!
//!  1. sequence name (lexicographic),
//!  2. gene ID (lexicographic),
//!  3. transcript ID (lexicographic),
//!  4. start position (numeric),
//!  5. end position (numeric).
//!
//! This groups all the features of a transcript together, in positional order,
//! which is what downstream transcript-level tools expect. Extracting a key fails
//! if the record lacks a gene or transcript ID, or has a non-integer coordinate.

use std::cmp::Ordering;

use crate::{
    attributes::{GENE_ID, TRANSCRIPT_ID},
    error::GtfError,
    record::GtfRecord,
    traits::TsvSerialize,
    Position,
};

/// The ordering key of a [`GtfRecord`], borrowing from the record.
///
/// The derived [`Ord`] compares the fields in declaration order, short-circuiting
/// on the first difference.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey<'a> {
    pub seqname: &'a str,
    pub gene_id: &'a str,
    pub transcript_id: &'a str,
    pub start: Position,
    pub end: Position,
}

impl<'a> SortKey<'a> {
    /// Extract the sort key of a record.
    ///
    /// # Errors
    /// Returns [`GtfError::MissingAttribute`] if the record has no `gene_id` or
    /// `transcript_id`, and [`GtfError::MalformedCoordinate`] if its start or end
    /// is not an integer.
    pub fn try_from_record(record: &'a GtfRecord) -> Result<Self, GtfError> {
        let attributes = record.attributes();
        let gene_id = attributes
            .gene_id()
            .ok_or_else(|| missing_attribute(GENE_ID, record))?;
        let transcript_id = attributes
            .transcript_id()
            .ok_or_else(|| missing_attribute(TRANSCRIPT_ID, record))?;
        Ok(Self {
            seqname: record.seqname(),
            gene_id,
            transcript_id,
            start: record.start()?,
            end: record.end()?,
        })
    }
}

impl<'a> TryFrom<&'a GtfRecord> for SortKey<'a> {
    type Error = GtfError;

    fn try_from(record: &'a GtfRecord) -> Result<Self, Self::Error> {
        SortKey::try_from_record(record)
    }
}

fn missing_attribute(attribute: &'static str, record: &GtfRecord) -> GtfError {
    GtfError::MissingAttribute {
        attribute,
        record: record.to_tsv(),
    }
}

/// Compare two records by their sort keys.
///
/// If neither key can be extracted, the error for `left` is returned.
pub fn compare_records(left: &GtfRecord, right: &GtfRecord) -> Result<Ordering, GtfError> {
    let left = SortKey::try_from_record(left)?;
    let right = SortKey::try_from_record(right)?;
    Ok(left.cmp(&right))
}

/// Compute the stable sorted order of `records`, as indices into `records`.
///
/// The key of every record is extracted before any sorting is done, so the first
/// record (in input order) without a valid key fails the whole operation.
pub fn sorted_order(records: &[GtfRecord]) -> Result<Vec<usize>, GtfError> {
    let keys = records
        .iter()
        .map(SortKey::try_from_record)
        .collect::<Result<Vec<_>, _>>()?;
    let mut order: Vec<usize> = (0..keys.len()).collect();
    // slice::sort_by is stable
    order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
    Ok(order)
}

/// Stable sort of `records` by their sort keys.
///
/// On error, the records are dropped and nothing partially sorted is returned.
pub fn sort_records(records: Vec<GtfRecord>) -> Result<Vec<GtfRecord>, GtfError> {
    let order = sorted_order(&records)?;
    let mut slots: Vec<Option<GtfRecord>> = records.into_iter().map(Some).collect();
    // order is a permutation, so each slot is taken exactly once
    Ok(order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect())
}

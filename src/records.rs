//! The [`GtfRecords`] container: an in-memory set of annotation records.
//!
//! Sorting needs every record at once, so the whole (retained) input is loaded
//! with [`GtfRecords::from_iter()`], sorted with [`GtfRecords::sort()`], and written
//! with [`GtfRecords::to_tsv()`]. The pipeline is linear; a failure at any step
//! aborts it without writing output.

use std::io::Write;
use std::path::PathBuf;

use crate::{
    error::GtfError,
    io::{GtfIterator, OutputFile},
    key::sort_records,
    record::GtfRecord,
    traits::TsvSerialize,
};

/// An in-memory, ordered set of [`GtfRecord`] entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GtfRecords {
    records: Vec<GtfRecord>,
}

impl GtfRecords {
    pub fn new(records: Vec<GtfRecord>) -> Self {
        Self { records }
    }

    /// Create a new [`GtfRecords`] object from an iterator over [`GtfRecord`]
    /// parsing results. The first error stops loading and is returned.
    pub fn from_iter<I>(iter: I) -> Result<Self, GtfError>
    where
        I: IntoIterator<Item = Result<GtfRecord, GtfError>>,
    {
        let records = iter.into_iter().collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    /// Load every record of a (possibly gzip-compressed) GTF/GFF file.
    pub fn from_path(filepath: impl Into<PathBuf>) -> Result<Self, GtfError> {
        Self::from_iter(GtfIterator::new(filepath)?)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GtfRecord> {
        self.records.iter()
    }

    pub fn into_inner(self) -> Vec<GtfRecord> {
        self.records
    }

    /// Consume this [`GtfRecords`] object and stably sort the records by sequence
    /// name, gene ID, transcript ID, start, and end.
    ///
    /// See [`crate::key`] for the ordering, and why it can fail.
    pub fn sort(self) -> Result<Self, GtfError> {
        Ok(Self {
            records: sort_records(self.records)?,
        })
    }

    /// Write every record as a TSV line to `writer`.
    pub fn write_tsv(&self, writer: &mut dyn Write) -> Result<(), GtfError> {
        for record in &self.records {
            writeln!(writer, "{}", record.to_tsv())?;
        }
        Ok(())
    }

    /// Output the TSV version of this [`GtfRecords`] object to a file, or standard
    /// output if `output` is `None`, preceded by the `header` lines.
    pub fn to_tsv(
        &self,
        output: Option<impl Into<PathBuf>>,
        header: Option<Vec<String>>,
    ) -> Result<(), GtfError> {
        let output = match output {
            Some(file) => OutputFile::new(file, header),
            None => OutputFile::new_stdout(header),
        };
        output.write_with(|writer| self.write_tsv(writer))
    }
}

impl IntoIterator for GtfRecords {
    type Item = GtfRecord;
    type IntoIter = std::vec::IntoIter<GtfRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a GtfRecords {
    type Item = &'a GtfRecord;
    type IntoIter = std::slice::Iter<'a, GtfRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

//! The GTF/GFF parsing iterator, and filters over it.
//!
//! To work with an annotation file, one first needs to read it off disk and parse it.
//! This is done with the *parsing iterator* [`GtfIterator`], which works on both
//! plaintext and gzip-compressed files. Each data line of a file is yielded as a
//! [`GtfRecord`], or an error if the line is not a valid record.
//!
//! Records can be dropped while in the iterator, by feature type or sequence name,
//! using the [`GtfRecordIterator`] trait methods, which wrap the iterator in a
//! [`FilteredRecords`].
//!
//! ## Comments, headers, and blank lines
//!
//! Lines starting with `#` are comments and are never parsed into records. The
//! comment lines before the first record are the *header* of the file, which is
//! available through [`GtfIterator::header()`]. Blank lines are skipped.
//!
//! [`GtfRecordIterator`]: crate::traits::GtfRecordIterator

pub mod filters;

pub use filters::{FeatureFilter, FilteredRecords};

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;

use crate::error::GtfError;
use crate::io::file::InputFile;
use crate::record::{parse_gtf_line, GtfRecord};

pub const PARSE_CAPACITY: usize = 512;

/// A lazy parser for GTF/GFF files, yielding [`GtfRecord`] entries.
pub struct GtfIterator {
    reader: Box<dyn BufRead>,
    line_buffer: String,
    line_number: usize,
    header: Vec<String>,
    in_header: bool,
}

impl std::fmt::Debug for GtfIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GtfIterator")
            .field("line_number", &self.line_number)
            .finish_non_exhaustive()
    }
}

impl GtfIterator {
    /// Create a new lazy-parsing iterator over a (possibly gzip-compressed) GTF/GFF file.
    pub fn new(filepath: impl Into<PathBuf>) -> Result<Self, GtfError> {
        let input_file = InputFile::new(filepath);
        let reader = input_file.reader()?;
        Ok(Self::from_buf_reader(Box::new(reader)))
    }

    /// Create a new lazy-parsing iterator over plaintext GTF/GFF data from any reader.
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Self::from_buf_reader(Box::new(BufReader::new(reader)))
    }

    fn from_buf_reader(reader: Box<dyn BufRead>) -> Self {
        Self {
            reader,
            line_buffer: String::with_capacity(PARSE_CAPACITY),
            line_number: 0,
            header: Vec::new(),
            in_header: true,
        }
    }

    /// The comment lines read before the first record, without line endings.
    ///
    /// This is only complete once the first record has been read.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// The number of lines read so far.
    pub fn lines_read(&self) -> usize {
        self.line_number
    }
}

impl Iterator for GtfIterator {
    type Item = Result<GtfRecord, GtfError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buffer.clear();
            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let line = self.line_buffer.trim_end_matches(&['\n', '\r'][..]);
                    if line.starts_with('#') {
                        if self.in_header {
                            self.header.push(line.to_string());
                        }
                        continue;
                    }
                    if line.trim().is_empty() {
                        continue;
                    }
                    self.in_header = false;
                    return Some(parse_gtf_line(line, self.line_number));
                }
                Err(e) => return Some(Err(GtfError::IOError(e))),
            }
        }
    }
}

//! Types and methods for reading and parsing input and writing output.

pub mod file;
pub mod parsers;

pub use file::{InputFile, OutputFile};
pub use parsers::{FeatureFilter, FilteredRecords, GtfIterator};

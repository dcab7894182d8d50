//! The [`GtfError`] `enum` definition and error messages.
//!
use thiserror::Error;

/// The [`GtfError`] defines the standard set of errors that should
/// be passed to the user.
///
/// Every variant is fatal for a sort run: there is no per-record
/// skip-and-continue for a record that cannot be ordered.
#[derive(Debug, Error)]
pub enum GtfError {
    // IO related errors
    #[error("File reading/writing error: {0}")]
    IOError(#[from] std::io::Error),

    // File parsing related errors
    #[error("Line {line} has {columns} tab-delimited columns, but GTF/GFF records must have exactly 9.\nLine: {text}")]
    MalformedRecord {
        line: usize,
        columns: usize,
        text: String,
    },

    // Sort key related errors
    #[error("Record is missing the '{attribute}' attribute required for sorting.\nRecord: {record}")]
    MissingAttribute {
        attribute: &'static str,
        record: String,
    },
    #[error("Record has a {field} coordinate that is not a valid integer: '{value}'.\nRecord: {record}")]
    MalformedCoordinate {
        field: &'static str,
        value: String,
        record: String,
    },
}

//! The [`GtfRecord`] type, one line of a GTF/GFF annotation file.

use crate::{attributes::Attributes, error::GtfError, traits::TsvSerialize, Position};

/// The number of tab-delimited columns in a GTF/GFF record.
pub const GTF_COLUMNS: usize = 9;

/// A single GTF/GFF record.
///
/// All columns are kept as the text they were read from, so that they are
/// written back exactly. The start and end coordinates are only parsed when
/// they are needed, with [`GtfRecord::start()`] and [`GtfRecord::end()`].
/// The attribute column is parsed once, at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GtfRecord {
    seqname: String,
    source: String,
    feature: String,
    start: String,
    end: String,
    score: String,
    strand: String,
    frame: String,
    attributes: Attributes,
}

impl GtfRecord {
    /// Create a new [`GtfRecord`] from its nine columns, in file order.
    pub fn from_fields(fields: [String; GTF_COLUMNS]) -> Self {
        let [seqname, source, feature, start, end, score, strand, frame, attributes] = fields;
        Self {
            seqname,
            source,
            feature,
            start,
            end,
            score,
            strand,
            frame,
            attributes: Attributes::parse(&attributes),
        }
    }

    pub fn seqname(&self) -> &str {
        &self.seqname
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The feature type, e.g. `exon` or `CDS`.
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// The 1-based start position.
    pub fn start(&self) -> Result<Position, GtfError> {
        self.parse_coordinate("start", &self.start)
    }

    /// The (inclusive) end position.
    pub fn end(&self) -> Result<Position, GtfError> {
        self.parse_coordinate("end", &self.end)
    }

    pub fn score(&self) -> &str {
        &self.score
    }

    pub fn strand(&self) -> &str {
        &self.strand
    }

    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The nine columns of this record, as they are written to output.
    pub fn columns(&self) -> [&str; GTF_COLUMNS] {
        [
            self.seqname.as_str(),
            self.source.as_str(),
            self.feature.as_str(),
            self.start.as_str(),
            self.end.as_str(),
            self.score.as_str(),
            self.strand.as_str(),
            self.frame.as_str(),
            self.attributes.as_str(),
        ]
    }

    fn parse_coordinate(&self, field: &'static str, value: &str) -> Result<Position, GtfError> {
        value
            .parse::<Position>()
            .map_err(|_| GtfError::MalformedCoordinate {
                field,
                value: value.to_string(),
                record: self.to_tsv(),
            })
    }
}

impl TsvSerialize for GtfRecord {
    fn to_tsv(&self) -> String {
        self.columns().join("\t")
    }
}

impl std::fmt::Display for GtfRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_tsv())
    }
}

/// Parse a single (newline-stripped) line into a [`GtfRecord`].
///
/// The line must split on tabs into exactly [`GTF_COLUMNS`] columns; otherwise
/// a [`GtfError::MalformedRecord`] is returned, reporting `line_number`.
pub fn parse_gtf_line(line: &str, line_number: usize) -> Result<GtfRecord, GtfError> {
    let columns: Vec<String> = line.split('\t').map(String::from).collect();
    let fields: [String; GTF_COLUMNS] =
        columns
            .try_into()
            .map_err(|columns: Vec<String>| GtfError::MalformedRecord {
                line: line_number,
                columns: columns.len(),
                text: line.to_string(),
            })?;
    Ok(GtfRecord::from_fields(fields))
}

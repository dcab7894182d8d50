//! Parsing of the free-text GTF attribute column.
//!
//! The ninth column of a GTF (or GFF2) record holds `key "value";` pairs, e.g.
//!
//! ```text
//! gene_id "ENSG00000223972"; transcript_id "ENST00000456328"; exon_number "1";
//! ```
//!
//! Only the two identifiers needed to order records are extracted: `gene_id` and
//! `transcript_id`. The text itself is kept so that it can be written back out
//! unmodified, apart from trimming surrounding whitespace.

/// The attribute key holding the gene identifier.
pub const GENE_ID: &str = "gene_id";

/// The attribute key holding the transcript identifier.
pub const TRANSCRIPT_ID: &str = "transcript_id";

/// The parsed attribute column of one record.
///
/// This is constructed once from text with [`Attributes::parse()`] and never
/// changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attributes {
    text: String,
    gene_id: Option<String>,
    transcript_id: Option<String>,
}

impl Attributes {
    /// Parse the raw attribute text.
    ///
    /// Tokens are the maximal runs of characters that are neither whitespace nor
    /// `';'`, and are consumed as `key value` pairs. Keys are matched
    /// case-insensitively and `'"'` characters are removed from values. A
    /// trailing unpaired token is ignored, and if a key occurs more than once
    /// the last value is kept.
    ///
    /// This never fails: missing identifiers are left as `None`, and it is up to
    /// the caller to decide whether that is an error.
    pub fn parse(attributes: &str) -> Self {
        let text = attributes.trim().to_string();
        let mut gene_id = None;
        let mut transcript_id = None;

        let tokens: Vec<&str> = text
            .split(|c: char| c.is_whitespace() || c == ';')
            .filter(|token| !token.is_empty())
            .collect();

        for pair in tokens.chunks_exact(2) {
            let (key, value) = (pair[0], pair[1]);
            if key.eq_ignore_ascii_case(GENE_ID) {
                gene_id = Some(value.replace('"', ""));
            } else if key.eq_ignore_ascii_case(TRANSCRIPT_ID) {
                transcript_id = Some(value.replace('"', ""));
            }
        }

        Self {
            text,
            gene_id,
            transcript_id,
        }
    }

    /// The gene identifier, if the attribute text had one.
    pub fn gene_id(&self) -> Option<&str> {
        self.gene_id.as_deref()
    }

    /// The transcript identifier, if the attribute text had one.
    pub fn transcript_id(&self) -> Option<&str> {
        self.transcript_id.as_deref()
    }

    /// The (trimmed) attribute text, as it is written to output.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_gtf() {
        let attrs = Attributes::parse(r#"gene_id "A"; transcript_id "T1";"#);
        assert_eq!(attrs.gene_id(), Some("A"));
        assert_eq!(attrs.transcript_id(), Some("T1"));
        assert_eq!(attrs.as_str(), r#"gene_id "A"; transcript_id "T1";"#);
    }

    #[test]
    fn test_parse_key_order_independent() {
        let first = Attributes::parse(r#"gene_id "A"; transcript_id "T1";"#);
        let second = Attributes::parse(r#"transcript_id "T1"; gene_id "A";"#);
        assert_eq!(first.gene_id(), second.gene_id());
        assert_eq!(first.transcript_id(), second.transcript_id());
        // but the text is kept as-is
        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn test_parse_case_insensitive_keys() {
        let attrs = Attributes::parse(r#"Gene_ID "g1"; TRANSCRIPT_ID "t1";"#);
        assert_eq!(attrs.gene_id(), Some("g1"));
        assert_eq!(attrs.transcript_id(), Some("t1"));
    }

    #[test]
    fn test_parse_ignores_other_keys() {
        let attrs = Attributes::parse(
            r#"gene_id "g1"; exon_number "2"; gene_name "DDX11L1"; transcript_id "t1"; level 2;"#,
        );
        assert_eq!(attrs.gene_id(), Some("g1"));
        assert_eq!(attrs.transcript_id(), Some("t1"));
    }

    #[test]
    fn test_parse_missing_keys() {
        let attrs = Attributes::parse(r#"transcript_id "t1";"#);
        assert_eq!(attrs.gene_id(), None);
        assert_eq!(attrs.transcript_id(), Some("t1"));

        let attrs = Attributes::parse("");
        assert_eq!(attrs.gene_id(), None);
        assert_eq!(attrs.transcript_id(), None);
        assert_eq!(attrs.as_str(), "");
    }

    #[test]
    fn test_parse_dangling_token() {
        // odd token count: the last token has no partner
        let attrs = Attributes::parse(r#"gene_id "g1"; transcript_id"#);
        assert_eq!(attrs.gene_id(), Some("g1"));
        assert_eq!(attrs.transcript_id(), None);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let attrs = Attributes::parse("  gene_id \"g1\";\ttranscript_id \"t1\";   ");
        assert_eq!(attrs.as_str(), "gene_id \"g1\";\ttranscript_id \"t1\";");
        assert_eq!(attrs.transcript_id(), Some("t1"));
        assert_eq!(attrs.to_string(), attrs.as_str());
    }

    #[test]
    fn test_parse_unquoted_and_unspaced() {
        let attrs = Attributes::parse("gene_id g1;transcript_id t1");
        assert_eq!(attrs.gene_id(), Some("g1"));
        assert_eq!(attrs.transcript_id(), Some("t1"));
    }

    #[test]
    fn test_parse_last_value_wins() {
        let attrs = Attributes::parse(r#"gene_id "g1"; gene_id "g2"; transcript_id "t1";"#);
        assert_eq!(attrs.gene_id(), Some("g2"));
    }
}

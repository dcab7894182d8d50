//! Test cases and test utility functions.
//!

use rand::{seq::SliceRandom, thread_rng, Rng};
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

use crate::{
    error::GtfError,
    record::{parse_gtf_line, GtfRecord},
    traits::TsvSerialize,
    Position,
};

// Stochastic test records defaults
//
// These are kept small so that random records often share sort keys,
// which is needed to exercise sort stability.
pub const NSEQNAMES: usize = 3;
pub const NGENES: usize = 4;
pub const NTRANSCRIPTS: usize = 3;
pub const MAX_START: Position = 500;
pub const MAX_LEN: Position = 50;

pub const FEATURES: &[&str] = &["exon", "CDS", "start_codon", "stop_codon", "UTR"];

/// Build a single GTF line with placeholder source, score, strand, and frame columns.
pub fn gtf_line(
    seqname: &str,
    feature: &str,
    start: Position,
    end: Position,
    attributes: &str,
) -> String {
    format!(
        "{}\ttest\t{}\t{}\t{}\t.\t+\t.\t{}",
        seqname, feature, start, end, attributes
    )
}

/// Build a single [`GtfRecord`], like [`gtf_line()`].
///
/// # Panics
/// Panics if the attributes contain a tab.
pub fn gtf_record(
    seqname: &str,
    feature: &str,
    start: Position,
    end: Position,
    attributes: &str,
) -> GtfRecord {
    parse_gtf_line(&gtf_line(seqname, feature, start, end, attributes), 1)
        .expect("invalid test record")
}

/// Build a random [`GtfRecord`], with gene and transcript IDs.
pub fn random_gtf_record() -> GtfRecord {
    let mut rng = thread_rng();
    let seqname = format!("chr{}", rng.gen_range(1..=NSEQNAMES));
    let gene = rng.gen_range(1..=NGENES);
    let transcript = rng.gen_range(1..=NTRANSCRIPTS);
    let start = rng.gen_range(1..=MAX_START);
    let end = start + rng.gen_range(0..MAX_LEN);
    let feature = FEATURES.choose(&mut rng).copied().unwrap_or("exon");
    // randomly swap the attribute order, which should not matter
    let attributes = if rng.gen_bool(0.5) {
        format!(
            "gene_id \"g{}\"; transcript_id \"g{}.t{}\";",
            gene, gene, transcript
        )
    } else {
        format!(
            "transcript_id \"g{}.t{}\"; gene_id \"g{}\"; exon_number \"{}\";",
            gene,
            transcript,
            gene,
            rng.gen_range(1..10)
        )
    };
    gtf_record(&seqname, feature, start, end, &attributes)
}

/// Build `n` random [`GtfRecord`] entries.
pub fn random_gtf_records(n: usize) -> Vec<GtfRecord> {
    (0..n).map(|_| random_gtf_record()).collect()
}

/// Create a new temporary file with a `.gtf` extension.
pub fn temp_gtffile() -> NamedTempFile {
    Builder::new()
        .suffix(".gtf")
        .tempfile()
        .expect("Failed to create temp file")
}

/// Write `n` random records to a GTF file.
pub fn write_random_gtf(path: impl AsRef<Path>, n: usize) -> Result<(), GtfError> {
    let mut file = std::fs::File::create(path)?;
    for record in random_gtf_records(n) {
        writeln!(file, "{}", record.to_tsv())?;
    }
    Ok(())
}

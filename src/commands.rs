use log::{debug, info};
use std::path::PathBuf;

use crate::{
    io::{FeatureFilter, FilteredRecords, GtfIterator},
    records::GtfRecords,
    reporting::{CommandOutput, Report},
    GtfError,
};

/// Options for [`sortgtf_sort()`].
#[derive(Clone, Debug)]
pub struct SortOptions {
    /// Which feature types to load; the rest are dropped. Defaults to exons only,
    /// since `gene` and `transcript` records usually lack a `transcript_id`.
    pub features: FeatureFilter,
    /// If set, only records on these sequences are loaded.
    pub retain_seqnames: Option<Vec<String>>,
    /// If set, records on these sequences are dropped (this wins over `retain_seqnames`).
    pub exclude_seqnames: Option<Vec<String>>,
    /// Reproduce the input's leading comment lines at the top of the output.
    pub keep_header: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            features: FeatureFilter::Exon,
            retain_seqnames: None,
            exclude_seqnames: None,
            keep_header: true,
        }
    }
}

/// Sort a GTF/GFF file by sequence name, gene ID, transcript ID, start, and end.
///
/// The whole input is loaded, sorted, and then written to `output` (or standard
/// output). Any invalid record aborts the run before anything is written. The
/// returned value is the number of records written.
pub fn sortgtf_sort(
    input: &PathBuf,
    output: Option<&PathBuf>,
    options: &SortOptions,
) -> Result<CommandOutput<usize>, GtfError> {
    // For reporting stuff to the user.
    let mut report = Report::new();

    let mut iter =
        FilteredRecords::new(GtfIterator::new(input)?).feature_filter(options.features);
    if let Some(seqnames) = &options.retain_seqnames {
        iter = iter.retain_seqnames(seqnames);
    }
    if let Some(seqnames) = &options.exclude_seqnames {
        iter = iter.exclude_seqnames(seqnames);
    }

    let records = GtfRecords::from_iter(iter.by_ref())?;
    info!(
        "Loaded {} records from {} ({} lines read)",
        records.len(),
        input.display(),
        iter.inner().lines_read()
    );

    if let Some(feature) = options.features.feature() {
        let dropped = iter.dropped_features();
        if !dropped.is_empty() {
            let total: usize = dropped.values().sum();
            let counts = dropped
                .iter()
                .map(|(feature_type, count)| format!("{}: {}", feature_type, count))
                .collect::<Vec<_>>()
                .join(", ");
            report.add_issue(format!(
                "{} records with a feature type other than '{}' were dropped ({})",
                total, feature, counts
            ));
        }
    }
    if iter.dropped_by_seqname() > 0 {
        report.add_issue(format!(
            "{} records were dropped because of their sequence names",
            iter.dropped_by_seqname()
        ));
    }

    let header = if options.keep_header && !iter.inner().header().is_empty() {
        Some(iter.inner().header().to_vec())
    } else {
        None
    };

    let sorted = records.sort()?;
    debug!("Sorted {} records", sorted.len());

    sorted.to_tsv(output, header)?;
    match output {
        Some(path) => info!("Wrote {} records to {}", sorted.len(), path.display()),
        None => info!("Wrote {} records to standard output", sorted.len()),
    }

    Ok(CommandOutput::new(sorted.len(), report))
}

#[cfg(test)]
mod tests {
    use super::*;

    type SortRun = (
        Result<CommandOutput<usize>, GtfError>,
        PathBuf,
        tempfile::TempDir,
    );

    fn run_sort(input: &str, options: &SortOptions) -> SortRun {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.gtf");
        let result = sortgtf_sort(&PathBuf::from(input), Some(&output), options);
        (result, output, dir)
    }

    #[test]
    fn test_sort_unsorted() {
        let options = SortOptions {
            features: FeatureFilter::All,
            ..Default::default()
        };
        let (result, output, _dir) = run_sort("tests_data/unsorted.gtf", &options);
        let result = result.unwrap();
        assert_eq!(*result.value(), 8);
        assert!(result.report().is_empty());
        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            std::fs::read_to_string("tests_data/sorted.gtf").unwrap()
        );
    }

    #[test]
    fn test_sort_exons_only_by_default() {
        let (result, output, _dir) =
            run_sort("tests_data/mixed_features.gtf", &SortOptions::default());
        let result = result.unwrap();
        assert_eq!(*result.value(), 4);
        assert_eq!(result.report().issues().len(), 1);
        assert!(result.report().issues()[0].contains("CDS: 3"));

        let contents = std::fs::read_to_string(output).unwrap();
        let records: Vec<_> = contents.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|l| l.split('\t').nth(2) == Some("exon")));
    }

    #[test]
    fn test_sort_all_features_fails_without_ids() {
        // the gene record has no transcript_id
        let options = SortOptions {
            features: FeatureFilter::All,
            ..Default::default()
        };
        let (result, output, _dir) = run_sort("tests_data/mixed_features.gtf", &options);
        assert!(matches!(result, Err(GtfError::MissingAttribute { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_sort_missing_gene_id() {
        let (result, output, _dir) =
            run_sort("tests_data/missing_gene_id.gtf", &SortOptions::default());
        assert!(matches!(
            result,
            Err(GtfError::MissingAttribute {
                attribute: "gene_id",
                ..
            })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_header_handling() {
        let (_, output, _dir) =
            run_sort("tests_data/mixed_features.gtf", &SortOptions::default());
        let contents = std::fs::read_to_string(output).unwrap();
        assert!(contents.starts_with("#!genome-build test\n"));

        let options = SortOptions {
            keep_header: false,
            ..Default::default()
        };
        let (_, output, _dir) = run_sort("tests_data/mixed_features.gtf", &options);
        let contents = std::fs::read_to_string(output).unwrap();
        assert!(!contents.contains('#'));
    }

    #[test]
    fn test_seqname_options() {
        let options = SortOptions {
            exclude_seqnames: Some(vec!["chrM".to_string()]),
            ..Default::default()
        };
        let (result, output, _dir) = run_sort("tests_data/mixed_features.gtf", &options);
        let result = result.unwrap();
        assert_eq!(*result.value(), 3);
        assert_eq!(result.report().issues().len(), 2);
        assert!(!std::fs::read_to_string(output).unwrap().contains("chrM"));
    }
}

//! Filters for parsing iterators.

use indexmap::IndexMap;
use std::collections::HashSet;

use crate::error::GtfError;
use crate::record::GtfRecord;
use crate::traits::GtfRecordIterator;

use super::GtfIterator;

/// The feature type that [`FeatureFilter::Exon`] keeps.
pub const EXON: &str = "exon";

/// Which feature types are loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeatureFilter {
    /// Keep every record.
    #[default]
    All,
    /// Keep only records with the feature type `exon` (case-sensitive).
    Exon,
}

impl FeatureFilter {
    /// The single feature type retained, or `None` if all are.
    pub fn feature(&self) -> Option<&'static str> {
        match self {
            FeatureFilter::All => None,
            FeatureFilter::Exon => Some(EXON),
        }
    }
}

/// An iterator over [`GtfRecord`] items that filters based on sequence name and
/// feature type.
///
/// Note that that the exclude filter is prioritized over the retain filter. So, if
/// a sequence name is supplied to [`FilteredRecords::exclude_seqnames()`], then even
/// if it is retained, its records are skipped.
///
/// Errors from the inner iterator are always passed through. The number of
/// dropped records is tracked, for reporting to the user.
///
/// # Example
///
/// ```
/// use sortgtf::prelude::*;
///
/// let mut iter = GtfIterator::new("tests_data/mixed_features.gtf")
///     .expect("error reading file")
///     .retain_feature("exon")
///     .exclude_seqnames(&["chrM".to_string()]);
///
/// let records = GtfRecords::from_iter(iter.by_ref()).expect("parsing error");
/// assert!(records.iter().all(|record| record.feature() == "exon"));
/// assert_eq!(iter.dropped_by_seqname(), 1);
/// ```
#[derive(Debug)]
pub struct FilteredRecords<I>
where
    I: Iterator<Item = Result<GtfRecord, GtfError>>,
{
    inner: I,
    retain_seqnames: Option<HashSet<String>>,
    exclude_seqnames: Option<HashSet<String>>,
    feature: Option<String>,
    dropped_features: IndexMap<String, usize>,
    dropped_seqnames: usize,
}

impl<I> FilteredRecords<I>
where
    I: Iterator<Item = Result<GtfRecord, GtfError>>,
{
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            retain_seqnames: None,
            exclude_seqnames: None,
            feature: None,
            dropped_features: IndexMap::new(),
            dropped_seqnames: 0,
        }
    }

    /// Keep only records on these sequences. Repeated calls widen the retained set.
    pub fn retain_seqnames(mut self, seqnames: &[String]) -> Self {
        self.retain_seqnames
            .get_or_insert_with(HashSet::new)
            .extend(seqnames.iter().cloned());
        self
    }

    /// Drop records on these sequences.
    pub fn exclude_seqnames(mut self, seqnames: &[String]) -> Self {
        self.exclude_seqnames
            .get_or_insert_with(HashSet::new)
            .extend(seqnames.iter().cloned());
        self
    }

    /// Keep only records of this feature type (exact, case-sensitive match).
    pub fn retain_feature(mut self, feature: &str) -> Self {
        self.feature = Some(feature.to_string());
        self
    }

    /// Apply a [`FeatureFilter`].
    pub fn feature_filter(self, filter: FeatureFilter) -> Self {
        match filter.feature() {
            Some(feature) => self.retain_feature(feature),
            None => self,
        }
    }

    /// The inner iterator.
    pub fn inner(&self) -> &I {
        &self.inner
    }

    /// The number of records dropped by the feature type filter, per feature type,
    /// in order of first appearance.
    pub fn dropped_features(&self) -> &IndexMap<String, usize> {
        &self.dropped_features
    }

    /// The number of records dropped by the sequence name filters.
    pub fn dropped_by_seqname(&self) -> usize {
        self.dropped_seqnames
    }

    fn keep_seqname(&self, seqname: &str) -> bool {
        if self
            .exclude_seqnames
            .as_ref()
            .map_or(false, |ex| ex.contains(seqname))
        {
            return false;
        }
        self.retain_seqnames
            .as_ref()
            .map_or(true, |rt| rt.contains(seqname))
    }
}

impl<I> Iterator for FilteredRecords<I>
where
    I: Iterator<Item = Result<GtfRecord, GtfError>>,
{
    type Item = Result<GtfRecord, GtfError>;

    /// Get the next filtered entry, prioritizing exclude over retain.
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(item) = self.inner.next() {
            let entry = match &item {
                Ok(entry) => entry,
                Err(_) => return Some(item),
            };
            if !self.keep_seqname(entry.seqname()) {
                self.dropped_seqnames += 1;
                continue;
            }
            if let Some(feature) = &self.feature {
                if entry.feature() != feature {
                    *self
                        .dropped_features
                        .entry(entry.feature().to_string())
                        .or_insert(0) += 1;
                    continue;
                }
            }
            return Some(item);
        }
        None
    }
}

impl GtfRecordIterator for GtfIterator {
    fn retain_seqnames(self, seqnames: &[String]) -> FilteredRecords<Self> {
        FilteredRecords::new(self).retain_seqnames(seqnames)
    }
    fn exclude_seqnames(self, seqnames: &[String]) -> FilteredRecords<Self> {
        FilteredRecords::new(self).exclude_seqnames(seqnames)
    }
    fn retain_feature(self, feature: &str) -> FilteredRecords<Self> {
        FilteredRecords::new(self).retain_feature(feature)
    }
}

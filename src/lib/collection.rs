//! Sequence records and clonality bookkeeping.
//!
//! A [`SequenceCollection`] holds an ordered list of [`SequenceRecord`]s and
//! keeps derived aggregates: the number of distinct clone ids, how many of
//! them are unique lineages (seen exactly once), how many are clonal lineages
//! (seen more than once), and the clone-size histogram.
//!
//! Collections are built two ways. Ingestion uses [`SequenceCollection::append_group`],
//! which introduces one distinct clone id per call and expands it to `frequency`
//! records. Partitioning and resampling use [`SequenceCollection::from_records`],
//! which re-derives all aggregates by grouping a flat record list.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use log::info;

use crate::errors::{ClonesubError, Result};

/// Reserved `clonality` value marking a lineage observed exactly once.
/// Such rows are assigned a synthetic id (`unique0`, `unique1`, ...) scoped
/// to the collection they are added to.
pub const UNIQUE_SENTINEL: &str = "unique";

/// The genomic-defect categories compared against the rest of the population.
pub const DEFECTS_TO_INVESTIGATE: [&str; 3] = ["intact", "5defect", "hypermutated"];

/// One sequence observation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Lineage identifier shared by all observations of the same clone
    pub clone_id: String,
    /// Open category key: a defect category (`intact`, `5defect`,
    /// `hypermutated`, other) or, in date comparisons, the query group
    pub category: String,
    /// Collection date, present only for date comparisons
    pub date: Option<NaiveDate>,
}

impl SequenceRecord {
    /// Creates an undated record.
    #[must_use]
    pub fn new(clone_id: impl Into<String>, category: impl Into<String>) -> Self {
        Self { clone_id: clone_id.into(), category: category.into(), date: None }
    }

    /// Creates a dated record.
    #[must_use]
    pub fn dated(
        clone_id: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self { clone_id: clone_id.into(), category: category.into(), date: Some(date) }
    }
}

/// An ordered list of sequence records plus derived clonality aggregates.
#[derive(Debug, Clone, Default)]
pub struct SequenceCollection {
    records: Vec<SequenceRecord>,
    ids: HashSet<String>,
    unique_count: usize,
    clone_count: usize,
    clone_size_histogram: BTreeMap<usize, usize>,
    /// Counter for synthetic unique ids, scoped to this collection.
    next_unique_id: usize,
}

impl SequenceCollection {
    /// Creates an empty collection with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk construction: derives all aggregates by grouping the given
    /// records on `clone_id`. A clone id with one record is a unique
    /// lineage, one with several records is a clonal lineage. The returned
    /// collection also carries the clone-size histogram.
    #[must_use]
    pub fn from_records(records: Vec<SequenceRecord>) -> Self {
        let sizes: HashMap<&str, usize> =
            records.iter().map(|record| record.clone_id.as_str()).counts();

        let unique_count = sizes.values().filter(|&&size| size == 1).count();
        let clone_count = sizes.len() - unique_count;

        let mut clone_size_histogram: BTreeMap<usize, usize> = BTreeMap::new();
        for &size in sizes.values() {
            *clone_size_histogram.entry(size).or_insert(0) += 1;
        }

        let ids = sizes.keys().map(ToString::to_string).collect();

        Self { records, ids, unique_count, clone_count, clone_size_histogram, next_unique_id: 0 }
    }

    /// Incremental construction: introduces one distinct clone id and
    /// appends `frequency` copies of its record.
    ///
    /// The reserved [`UNIQUE_SENTINEL`] id is replaced with a fresh synthetic
    /// id and must come with `frequency == 1`. Any other id must not have
    /// been added to this collection before.
    ///
    /// # Errors
    ///
    /// [`ClonesubError::InvariantViolation`] for a unique sentinel with
    /// frequency other than 1, [`ClonesubError::DuplicateCloneId`] for a
    /// reintroduced clone id.
    pub fn append_group(
        &mut self,
        clone_id: &str,
        category: &str,
        frequency: u64,
        date: Option<NaiveDate>,
    ) -> Result<()> {
        let clone_id = if clone_id == UNIQUE_SENTINEL {
            if frequency != 1 {
                return Err(ClonesubError::InvariantViolation {
                    reason: format!(
                        "unique sequences must have frequency 1, got {frequency}"
                    ),
                });
            }
            let synthetic = format!("{UNIQUE_SENTINEL}{}", self.next_unique_id);
            self.next_unique_id += 1;
            self.unique_count += 1;
            synthetic
        } else {
            if self.ids.contains(clone_id) {
                return Err(ClonesubError::DuplicateCloneId { clone_id: clone_id.to_string() });
            }
            self.clone_count += 1;
            clone_id.to_string()
        };

        self.ids.insert(clone_id.clone());
        for _ in 0..frequency {
            self.records.push(SequenceRecord { clone_id: clone_id.clone(), category: category.to_string(), date });
        }
        Ok(())
    }

    /// Appends records and refreshes the distinct-id count only.
    ///
    /// Unique/clone counts and the histogram are deliberately left stale:
    /// this operation exists for the distinct-count-targeted resampling
    /// loop, which consults nothing but [`Self::distinct_count`].
    pub fn extend_with_records(&mut self, records: Vec<SequenceRecord>) {
        for record in records {
            self.ids.insert(record.clone_id.clone());
            self.records.push(record);
        }
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    /// Total number of records, counting clonal expansion.
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    /// Number of distinct clone ids present.
    #[must_use]
    pub fn distinct_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of distinct clone ids observed exactly once.
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.unique_count
    }

    /// Number of distinct clone ids observed more than once.
    #[must_use]
    pub fn clone_count(&self) -> usize {
        self.clone_count
    }

    /// Clone size -> number of distinct clone ids with that size.
    /// Populated by bulk construction only.
    #[must_use]
    pub fn clone_size_histogram(&self) -> &BTreeMap<usize, usize> {
        &self.clone_size_histogram
    }

    /// Median collection date over all records, including duplicates from
    /// clonal expansion.
    ///
    /// # Errors
    ///
    /// [`ClonesubError::DegenerateSample`] on an empty collection,
    /// [`ClonesubError::InvariantViolation`] if any record lacks a date.
    pub fn median_collection_date(&self) -> Result<NaiveDate> {
        let ordinals =
            self.records.iter().map(|record| record_ordinal(record)).collect::<Result<Vec<_>>>()?;
        date_from_ordinal(median_ordinal(ordinals)?)
    }

    /// Median collection date over one date per distinct clone id.
    ///
    /// The date kept for each id is the one on the first record encountered
    /// in the collection's current order, so for resampled collections the
    /// result depends on the draw order.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::median_collection_date`].
    pub fn median_date_of_distinct_sequences(&self) -> Result<NaiveDate> {
        date_from_ordinal(median_ordinal(self.distinct_ordinal_dates()?)?)
    }

    /// Ordinal-encoded dates (days from 0001-01-01, proleptic Gregorian),
    /// one per distinct clone id, first-encounter order.
    ///
    /// # Errors
    ///
    /// [`ClonesubError::InvariantViolation`] if a record lacks a date.
    pub fn distinct_ordinal_dates(&self) -> Result<Vec<i64>> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut ordinals = Vec::with_capacity(self.ids.len());
        for record in &self.records {
            if seen.insert(record.clone_id.as_str()) {
                ordinals.push(record_ordinal(record)?);
            }
        }
        Ok(ordinals)
    }

    /// Logs total/distinct/unique/clone counts for this collection.
    pub fn log_totals(&self, label: &str) {
        info!(
            "{label}: total {}, distinct {}, unique {}, distinct clones {}",
            self.total_records(),
            self.distinct_count(),
            self.unique_count(),
            self.clone_count(),
        );
    }
}

fn record_ordinal(record: &SequenceRecord) -> Result<i64> {
    let date = record.date.ok_or_else(|| ClonesubError::InvariantViolation {
        reason: format!("sequence '{}' has no collection date", record.clone_id),
    })?;
    Ok(i64::from(date.num_days_from_ce()))
}

fn date_from_ordinal(ordinal: i64) -> Result<NaiveDate> {
    let days = i32::try_from(ordinal).ok().and_then(NaiveDate::from_num_days_from_ce_opt);
    days.ok_or_else(|| ClonesubError::InvariantViolation {
        reason: format!("ordinal date {ordinal} is out of range"),
    })
}

/// Median of ordinal dates using the historical midpoint rule: for odd `n`
/// the element at index `n/2`; for even `n` the element at index `n/2` plus
/// half the gap (floor division) to the element at index `n/2 + 1`. The upper
/// index is clamped to the last element so a two-element list stays in
/// bounds.
fn median_ordinal(mut ordinals: Vec<i64>) -> Result<i64> {
    if ordinals.is_empty() {
        return Err(ClonesubError::DegenerateSample {
            reason: "cannot take the median date of an empty collection".to_string(),
        });
    }
    ordinals.sort_unstable();
    let n = ordinals.len();
    let mid = n / 2;
    if n % 2 == 1 {
        Ok(ordinals[mid])
    } else {
        let upper = (mid + 1).min(n - 1);
        Ok(ordinals[mid] + (ordinals[upper] - ordinals[mid]) / 2)
    }
}

//! CSV ingestion.
//!
//! Reads the exported sequence tables into [`SequenceCollection`]s. Defect
//! tables carry one row per clone group with its genomic-integrity category;
//! date tables additionally carry the subject, the query group, and the
//! collection date of each group.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use fgoxide::io::DelimFile;
use serde::Deserialize;

use crate::collection::SequenceCollection;
use crate::errors::{ClonesubError, Result};

/// Query value marking the reference group in a date table.
pub const REFERENCE_QUERY: &str = "0";

/// One row of a defect-mode input table.
#[derive(Debug, Deserialize)]
struct DefectRow {
    /// Clone id, or the sentinel `unique` for a singleton
    clonality: String,
    #[serde(rename = "genomicIntegrity")]
    genomic_integrity: String,
    frequency: u64,
}

/// One row of a dates-mode input table.
#[derive(Debug, Deserialize)]
struct DateRow {
    /// Subject identifier; each subject gets its own collection and report
    comparison: String,
    clonality: String,
    /// `0` for the reference group, anything else for the query group
    query: String,
    frequency: u64,
    /// Collection date in `YYYY-MM-DD` form
    date: NaiveDate,
}

fn validate_frequency(path: &Path, clone_id: &str, frequency: u64) -> Result<()> {
    if frequency == 0 {
        return Err(ClonesubError::MalformedInput {
            path: path.display().to_string(),
            reason: format!("row for '{clone_id}' has a frequency of zero"),
        });
    }
    Ok(())
}

/// Reads a defect-mode table into a single collection.
///
/// # Errors
///
/// [`ClonesubError::MalformedInput`] if the file cannot be parsed or a row
/// has a zero frequency, [`ClonesubError::DuplicateCloneId`] if a clone id
/// repeats, [`ClonesubError::InvariantViolation`] if a `unique` row carries
/// a frequency above one.
pub fn read_defect_table<P: AsRef<Path>>(path: P) -> Result<SequenceCollection> {
    let path = path.as_ref();
    let rows: Vec<DefectRow> =
        DelimFile::default().read_csv(&path).map_err(|e| ClonesubError::MalformedInput {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let mut collection = SequenceCollection::new();
    for row in rows {
        validate_frequency(path, &row.clonality, row.frequency)?;
        collection.append_group(&row.clonality, &row.genomic_integrity, row.frequency, None)?;
    }
    Ok(collection)
}

/// Reads a dates-mode table into one collection per subject, keyed by the
/// subject identifier. Within each collection the record category holds the
/// row's query value, so the reference group is recovered by partitioning on
/// [`REFERENCE_QUERY`].
///
/// # Errors
///
/// Same taxonomy as [`read_defect_table`]; clone ids only need to be unique
/// within a subject.
pub fn read_date_table<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, SequenceCollection>> {
    let path = path.as_ref();
    let rows: Vec<DateRow> =
        DelimFile::default().read_csv(&path).map_err(|e| ClonesubError::MalformedInput {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let mut subjects: BTreeMap<String, SequenceCollection> = BTreeMap::new();
    for row in rows {
        validate_frequency(path, &row.clonality, row.frequency)?;
        let collection = subjects.entry(row.comparison).or_default();
        collection.append_group(&row.clonality, &row.query, row.frequency, Some(row.date))?;
    }
    Ok(subjects)
}

//! Replicate orchestration and aggregation.
//!
//! Runs N resampling replicates against a fixed reference group, streams one
//! report row per replicate, and closes the report with summary rows. Rows
//! are written as each replicate completes, so a failure partway through a
//! long run leaves the completed replicates on disk.

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use serde::Serialize;

use crate::collection::SequenceCollection;
use crate::errors::{ClonesubError, Result};
use crate::progress::ProgressTracker;
use crate::report::ReportWriter;
use crate::resample::{resample_by_count, resample_by_distinct};
use crate::stats::{fisher_exact, mann_whitney_u};
use crate::validation::validate_replicas;

/// Header for per-category defect reports.
pub const DEFECT_COLUMNS: [&str; 5] = ["iteration", "unique", "clones", "odds_ratio", "p_value"];

/// Header for per-subject date reports.
pub const DATE_COLUMNS: [&str; 3] = ["iteration", "median date", "p_value"];

/// One completed defect-mode replicate.
#[derive(Debug, Serialize)]
struct DefectReplicaRow {
    iteration: u32,
    unique: u64,
    clones: u64,
    odds_ratio: f64,
    p_value: f64,
}

/// Summary row closing a defect-mode report.
#[derive(Debug, Serialize)]
struct DefectSummaryRow {
    iteration: String,
    unique: f64,
    clones: f64,
    odds_ratio: f64,
    p_value: f64,
}

/// One completed dates-mode replicate.
#[derive(Debug, Serialize)]
struct DateReplicaRow {
    iteration: u32,
    median_date: NaiveDate,
    p_value: f64,
}

/// Summary row closing a dates-mode report. The comparison-group row leaves
/// the p-value blank.
#[derive(Debug, Serialize)]
struct DateSummaryRow {
    iteration: String,
    median_date: NaiveDate,
    p_value: Option<f64>,
}

/// Arithmetic mean. NaN for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor N, not N-1). NaN for an empty
/// slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Runs defect-mode replicates of `pool` against `reference` and streams the
/// report.
///
/// Each replicate draws as many records as the reference holds, then tests
/// the clonal/unique split of the sample against the reference with Fisher's
/// exact test. After the last replicate, `averages` and
/// `standard deviations` rows are appended.
///
/// # Errors
///
/// Returns an error if `replicas` is zero, the pool is empty, a statistical
/// test degenerates, or a report write fails.
#[allow(clippy::cast_precision_loss)]
pub fn run_defect_replicas(
    reference: &SequenceCollection,
    pool: &SequenceCollection,
    replicas: u32,
    rng: &mut StdRng,
    report: &mut ReportWriter,
) -> Result<()> {
    validate_replicas(replicas)?;
    if pool.total_records() == 0 {
        return Err(ClonesubError::DegenerateSample {
            reason: "comparison pool has no records".to_string(),
        });
    }

    let reference_clones = reference.clone_count() as u64;
    let reference_unique = reference.unique_count() as u64;

    let mut uniques = Vec::with_capacity(replicas as usize);
    let mut clones = Vec::with_capacity(replicas as usize);
    let mut odds_ratios = Vec::with_capacity(replicas as usize);
    let mut p_values = Vec::with_capacity(replicas as usize);

    let mut progress = ProgressTracker::new("Completed replicates");
    for iteration in 1..=replicas {
        let sample = resample_by_count(pool, reference.total_records(), rng)?;
        let sample_clones = sample.clone_count() as u64;
        let sample_unique = sample.unique_count() as u64;

        let test =
            fisher_exact([reference_clones, sample_clones, reference_unique, sample_unique])?;

        report.write_row(&DefectReplicaRow {
            iteration,
            unique: sample_unique,
            clones: sample_clones,
            odds_ratio: test.odds_ratio,
            p_value: test.p_value,
        })?;

        uniques.push(sample_unique as f64);
        clones.push(sample_clones as f64);
        odds_ratios.push(test.odds_ratio);
        p_values.push(test.p_value);
        progress.log_if_needed(1);
    }
    progress.log_final();

    report.write_row(&DefectSummaryRow {
        iteration: "averages".to_string(),
        unique: mean(&uniques),
        clones: mean(&clones),
        odds_ratio: mean(&odds_ratios),
        p_value: mean(&p_values),
    })?;
    report.write_row(&DefectSummaryRow {
        iteration: "standard deviations".to_string(),
        unique: population_std_dev(&uniques),
        clones: population_std_dev(&clones),
        odds_ratio: population_std_dev(&odds_ratios),
        p_value: population_std_dev(&p_values),
    })?;
    Ok(())
}

/// Runs dates-mode replicates of `pool` against `reference` and streams the
/// report.
///
/// Each replicate resamples until it holds as many distinct clone ids as the
/// reference, takes the median collection date over those distinct ids, and
/// tests its distinct-id date distribution against the reference's with the
/// Mann-Whitney U test. After the last replicate, an `Average` row and a
/// `Comparison group` row (the reference's own median, blank p-value) are
/// appended.
///
/// # Errors
///
/// Returns an error if `replicas` is zero, resampling cannot reach the
/// reference's distinct count, a record is missing its date, a statistical
/// test degenerates, or a report write fails.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn run_date_replicas(
    reference: &SequenceCollection,
    pool: &SequenceCollection,
    replicas: u32,
    max_attempts: usize,
    rng: &mut StdRng,
    report: &mut ReportWriter,
) -> Result<()> {
    validate_replicas(replicas)?;
    if pool.total_records() == 0 {
        return Err(ClonesubError::DegenerateSample {
            reason: "comparison pool has no records".to_string(),
        });
    }

    let reference_ordinals: Vec<f64> =
        reference.distinct_ordinal_dates()?.iter().map(|&o| o as f64).collect();

    let mut median_ordinals = Vec::with_capacity(replicas as usize);
    let mut p_values = Vec::with_capacity(replicas as usize);

    let mut progress = ProgressTracker::new("Completed replicates");
    for iteration in 1..=replicas {
        let sample = resample_by_distinct(pool, reference.distinct_count(), max_attempts, rng)?;
        let median_date = sample.median_date_of_distinct_sequences()?;
        let sample_ordinals: Vec<f64> =
            sample.distinct_ordinal_dates()?.iter().map(|&o| o as f64).collect();
        let test = mann_whitney_u(&reference_ordinals, &sample_ordinals)?;

        report.write_row(&DateReplicaRow { iteration, median_date, p_value: test.p_value })?;

        median_ordinals.push(f64::from(median_date.num_days_from_ce()));
        p_values.push(test.p_value);
        progress.log_if_needed(1);
    }
    progress.log_final();

    let average_ordinal = mean(&median_ordinals).floor() as i32;
    let average_date = NaiveDate::from_num_days_from_ce_opt(average_ordinal).ok_or_else(|| {
        ClonesubError::InvariantViolation {
            reason: format!("ordinal {average_ordinal} is not a representable date"),
        }
    })?;
    report.write_row(&DateSummaryRow {
        iteration: "Average".to_string(),
        median_date: average_date,
        p_value: Some(mean(&p_values)),
    })?;
    report.write_row(&DateSummaryRow {
        iteration: "Comparison group".to_string(),
        median_date: reference.median_date_of_distinct_sequences()?,
        p_value: None,
    })?;
    Ok(())
}

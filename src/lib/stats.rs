//! Statistical-test primitives.
//!
//! The comparison engine consumes these as black boxes: Fisher's exact test
//! for 2x2 clonality tables and the Mann-Whitney U test for date
//! distributions. Degenerate inputs fail the current replica
//! ([`ClonesubError::StatisticalTest`]) rather than being skipped.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::errors::{ClonesubError, Result};

/// Outcome of Fisher's exact test on a 2x2 table.
#[derive(Debug, Clone, Copy)]
pub struct FisherTest {
    /// Sample odds ratio `(a*d)/(b*c)`; infinite when only the denominator
    /// is zero, NaN when both products are zero
    pub odds_ratio: f64,
    /// Two-tailed p-value
    pub p_value: f64,
}

/// Fisher's exact test over the row-major table `[[a, b], [c, d]]`.
///
/// # Errors
///
/// [`ClonesubError::StatisticalTest`] if a count exceeds the supported table
/// size or the primitive rejects the table.
pub fn fisher_exact(table: [u64; 4]) -> Result<FisherTest> {
    let mut counts = [0u32; 4];
    for (slot, &value) in counts.iter_mut().zip(table.iter()) {
        *slot = u32::try_from(value).map_err(|_| ClonesubError::StatisticalTest {
            test: "Fisher's exact".to_string(),
            reason: format!("count {value} exceeds the supported table size"),
        })?;
    }

    let pvalues =
        fishers_exact::fishers_exact(&counts).map_err(|e| ClonesubError::StatisticalTest {
            test: "Fisher's exact".to_string(),
            reason: e.to_string(),
        })?;

    let [a, b, c, d] = counts.map(f64::from);
    let numerator = a * d;
    let denominator = b * c;
    let odds_ratio = if denominator == 0.0 {
        if numerator == 0.0 { f64::NAN } else { f64::INFINITY }
    } else {
        numerator / denominator
    };

    Ok(FisherTest { odds_ratio, p_value: pvalues.two_tail_pvalue })
}

/// Outcome of the Mann-Whitney U test on two independent samples.
#[derive(Debug, Clone, Copy)]
pub struct MannWhitneyTest {
    /// U statistic of the first sample
    pub u: f64,
    /// Two-sided p-value (tie-corrected normal approximation with
    /// continuity correction)
    pub p_value: f64,
}

/// Mann-Whitney U test of `xs` against `ys` (two independent samples, no
/// pairing assumed).
///
/// # Errors
///
/// [`ClonesubError::StatisticalTest`] if either sample is empty or all
/// pooled observations are tied (zero rank variance).
pub fn mann_whitney_u(xs: &[f64], ys: &[f64]) -> Result<MannWhitneyTest> {
    if xs.is_empty() || ys.is_empty() {
        return Err(ClonesubError::StatisticalTest {
            test: "Mann-Whitney U".to_string(),
            reason: "both samples must be non-empty".to_string(),
        });
    }

    let n1 = xs.len() as f64;
    let n2 = ys.len() as f64;
    let n = n1 + n2;

    // Pool the samples, tagging membership in the first one.
    let mut pooled: Vec<(f64, bool)> = xs
        .iter()
        .map(|&value| (value, true))
        .chain(ys.iter().map(|&value| (value, false)))
        .collect();
    pooled.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Average ranks within tie runs; accumulate the tie correction term.
    let mut ranks = vec![0.0; pooled.len()];
    let mut tie_term = 0.0;
    let mut start = 0;
    while start < pooled.len() {
        let mut end = start;
        while end < pooled.len() && pooled[end].0 == pooled[start].0 {
            end += 1;
        }
        let run = (end - start) as f64;
        let average_rank = (start + end + 1) as f64 / 2.0;
        for rank in &mut ranks[start..end] {
            *rank = average_rank;
        }
        tie_term += run.powi(3) - run;
        start = end;
    }

    let rank_sum: f64 = pooled
        .iter()
        .zip(&ranks)
        .filter(|((_, first), _)| *first)
        .map(|(_, &rank)| rank)
        .sum();
    let u = rank_sum - n1 * (n1 + 1.0) / 2.0;

    let mean = n1 * n2 / 2.0;
    let variance = n1 * n2 / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));
    if variance <= 0.0 {
        return Err(ClonesubError::StatisticalTest {
            test: "Mann-Whitney U".to_string(),
            reason: "all pooled observations are tied".to_string(),
        });
    }

    // Continuity correction toward the mean.
    let centered = u - mean;
    let z = if centered == 0.0 {
        0.0
    } else {
        (centered - 0.5 * centered.signum()) / variance.sqrt()
    };

    let normal = Normal::new(0.0, 1.0).unwrap();
    let p_value = (2.0 * normal.cdf(-z.abs())).min(1.0);

    Ok(MannWhitneyTest { u, p_value })
}

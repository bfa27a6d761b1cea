//! Random subsampling with replacement.
//!
//! Two targeting modes match a subsample to a reference subgroup: by total
//! record count (for the clonality comparison) and by distinct clone-id
//! count (for the date comparison). All draws are independent and with
//! replacement from the pool's record sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collection::{SequenceCollection, SequenceRecord};
use crate::errors::{ClonesubError, Result};

/// Default cap on accumulation rounds for distinct-count targeting.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Create a random number generator, optionally seeded for reproducibility.
#[must_use]
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

fn draw_batch(pool: &[SequenceRecord], draws: usize, rng: &mut StdRng) -> Vec<SequenceRecord> {
    (0..draws).map(|_| pool[rng.random_range(0..pool.len())].clone()).collect()
}

/// Draws `draws` records with replacement and bulk-builds the result, so all
/// aggregates of the returned collection are fresh.
///
/// # Errors
///
/// [`ClonesubError::DegenerateSample`] if the pool is empty or `draws == 0`.
pub fn resample_by_count(
    pool: &SequenceCollection,
    draws: usize,
    rng: &mut StdRng,
) -> Result<SequenceCollection> {
    if pool.total_records() == 0 {
        return Err(ClonesubError::DegenerateSample {
            reason: "cannot resample from an empty pool".to_string(),
        });
    }
    if draws == 0 {
        return Err(ClonesubError::DegenerateSample {
            reason: "resample size must be at least 1".to_string(),
        });
    }
    Ok(SequenceCollection::from_records(draw_batch(pool.records(), draws, rng)))
}

/// Accumulates draws with replacement until the collection holds
/// `target_distinct` distinct clone ids. Each round draws exactly the
/// remaining distinct-id deficit; repeated ids mean several rounds may be
/// needed.
///
/// The returned collection is built through
/// [`SequenceCollection::extend_with_records`], so only its record list and
/// distinct count are meaningful.
///
/// # Errors
///
/// [`ClonesubError::DegenerateSample`] if the pool is empty, the target is
/// zero or unreachable (pool has fewer distinct ids), or `max_attempts`
/// rounds did not reach the target.
pub fn resample_by_distinct(
    pool: &SequenceCollection,
    target_distinct: usize,
    max_attempts: usize,
    rng: &mut StdRng,
) -> Result<SequenceCollection> {
    if pool.total_records() == 0 {
        return Err(ClonesubError::DegenerateSample {
            reason: "cannot resample from an empty pool".to_string(),
        });
    }
    if target_distinct == 0 {
        return Err(ClonesubError::DegenerateSample {
            reason: "target distinct count must be at least 1".to_string(),
        });
    }
    if pool.distinct_count() < target_distinct {
        return Err(ClonesubError::DegenerateSample {
            reason: format!(
                "pool holds {} distinct clone ids, cannot reach a target of {target_distinct}",
                pool.distinct_count()
            ),
        });
    }

    let mut accumulated = SequenceCollection::new();
    let mut attempts = 0;
    while accumulated.distinct_count() < target_distinct {
        if attempts >= max_attempts {
            return Err(ClonesubError::DegenerateSample {
                reason: format!(
                    "distinct-count target {target_distinct} not reached after {max_attempts} rounds"
                ),
            });
        }
        attempts += 1;
        let deficit = target_distinct - accumulated.distinct_count();
        accumulated.extend_with_records(draw_batch(pool.records(), deficit, rng));
    }
    Ok(accumulated)
}

//! Custom error types for clonesub operations.

use thiserror::Error;

/// Result type alias for clonesub operations
pub type Result<T> = std::result::Result<T, ClonesubError>;

/// Error type for clonesub operations
#[derive(Error, Debug)]
pub enum ClonesubError {
    /// A construction invariant of a sequence collection was violated,
    /// e.g. a `unique`-labeled input row claims a frequency other than 1.
    #[error("Invariant violation: {reason}")]
    InvariantViolation {
        /// Explanation of the violated invariant
        reason: String,
    },

    /// A clone id was reintroduced during incremental construction
    #[error("Clone id '{clone_id}' was already added to this collection")]
    DuplicateCloneId {
        /// The repeated clone id
        clone_id: String,
    },

    /// Input table could not be parsed (missing column, bad frequency, bad date)
    #[error("Malformed input '{path}': {reason}")]
    MalformedInput {
        /// Path to the offending input file
        path: String,
        /// Explanation of the parse failure
        reason: String,
    },

    /// The target output directory already exists
    #[error("Output directory '{path}' already exists; refusing to overwrite")]
    OutputCollision {
        /// The colliding directory path
        path: String,
    },

    /// A resampling request that cannot produce a valid sample
    #[error("Degenerate sample: {reason}")]
    DegenerateSample {
        /// Explanation of why the sample is degenerate
        reason: String,
    },

    /// A statistical-test primitive rejected its input; fails the current
    /// replica rather than being silently skipped
    #[error("{test} test failed: {reason}")]
    StatisticalTest {
        /// Name of the test (e.g. "Fisher's exact")
        test: String,
        /// Explanation of the failure
        reason: String,
    },

    /// Report file I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Report serialization failure
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_violation() {
        let error = ClonesubError::InvariantViolation {
            reason: "unique sequences must have frequency 1, got 3".to_string(),
        };
        let msg = format!("{error}");
        assert!(msg.contains("Invariant violation"));
        assert!(msg.contains("got 3"));
    }

    #[test]
    fn test_duplicate_clone_id() {
        let error = ClonesubError::DuplicateCloneId { clone_id: "clone1".to_string() };
        let msg = format!("{error}");
        assert!(msg.contains("'clone1'"));
        assert!(msg.contains("already added"));
    }

    #[test]
    fn test_malformed_input() {
        let error = ClonesubError::MalformedInput {
            path: "/data/sequences.csv".to_string(),
            reason: "missing column 'frequency'".to_string(),
        };
        let msg = format!("{error}");
        assert!(msg.contains("/data/sequences.csv"));
        assert!(msg.contains("missing column 'frequency'"));
    }

    #[test]
    fn test_output_collision() {
        let error = ClonesubError::OutputCollision { path: "/tmp/reports".to_string() };
        let msg = format!("{error}");
        assert!(msg.contains("/tmp/reports"));
        assert!(msg.contains("refusing to overwrite"));
    }

    #[test]
    fn test_degenerate_sample() {
        let error = ClonesubError::DegenerateSample { reason: "pool has no records".to_string() };
        assert!(format!("{error}").contains("pool has no records"));
    }

    #[test]
    fn test_statistical_test() {
        let error = ClonesubError::StatisticalTest {
            test: "Mann-Whitney U".to_string(),
            reason: "all pooled observations are tied".to_string(),
        };
        let msg = format!("{error}");
        assert!(msg.contains("Mann-Whitney U"));
        assert!(msg.contains("tied"));
    }
}

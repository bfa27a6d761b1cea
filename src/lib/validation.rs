//! Input validation utilities
//!
//! Common validation functions for command-line parameters and file paths
//! with consistent error messages, using the structured error types from
//! [`crate::errors`].

use std::path::Path;

use crate::errors::{ClonesubError, Result};

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Input table")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use clonesub_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/table.csv", "Input table");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(ClonesubError::MalformedInput {
            path: path_ref.display().to_string(),
            reason: format!("{description} does not exist"),
        });
    }
    Ok(())
}

/// Validate that the requested number of replicates is usable
///
/// # Errors
/// Returns an error if `replicas` is zero
pub fn validate_replicas(replicas: u32) -> Result<()> {
    if replicas == 0 {
        return Err(ClonesubError::DegenerateSample {
            reason: "at least one replicate is required".to_string(),
        });
    }
    Ok(())
}

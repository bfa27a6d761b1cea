//! Common CLI options shared across commands.
//!
//! This module provides shared argument structures that can be composed into
//! command structs using `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use clonesub_lib::validation::validate_file_exists;

/// Input/output options for commands that read a sequence table and write a
/// directory of reports.
#[derive(Debug, Clone, Args)]
pub struct AnalysisIoOptions {
    /// Input CSV sequence table
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output directory for reports (must not already exist)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

impl AnalysisIoOptions {
    /// Validates that the input file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file does not exist.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_file_exists(&self.input, "Input table")?;
        Ok(())
    }
}

/// Options controlling the resampling replicates.
#[derive(Debug, Clone, Args)]
pub struct ReplicaOptions {
    /// Number of resampling replicates per comparison
    #[arg(short = 'n', long = "replicas", default_value = "100")]
    pub replicas: u32,

    /// Random seed for reproducibility
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

//! CSV report output.
//!
//! Each analysis writes one CSV report per category (or subject) into a
//! freshly created output directory. Rows are streamed as replicates
//! complete rather than buffered, so partial results survive a failure
//! mid-run. Headers are written explicitly because replicate rows and the
//! trailing summary rows use differently typed structs.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::{ClonesubError, Result};

/// Creates the output directory, refusing to reuse an existing path.
///
/// # Errors
///
/// [`ClonesubError::OutputCollision`] if the path already exists, or an I/O
/// error if creation fails.
pub fn create_output_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Err(ClonesubError::OutputCollision { path: path.display().to_string() });
    }
    fs::create_dir_all(path)?;
    Ok(())
}

/// A streaming CSV report for one category or subject.
pub struct ReportWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl ReportWriter {
    /// Creates `<dir>/<stem>.csv` and writes the header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or the header cannot
    /// be written.
    pub fn create<P: AsRef<Path>>(dir: P, stem: &str, columns: &[&str]) -> Result<Self> {
        let path = dir.as_ref().join(format!("{stem}.csv"));
        let file = File::create(&path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(columns)?;
        Ok(Self { writer, path })
    }

    /// Serializes one row and streams it to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn write_row<S: Serialize>(&mut self, row: &S) -> Result<()> {
        self.writer.serialize(row)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Path of the report file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes and finishes the report.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

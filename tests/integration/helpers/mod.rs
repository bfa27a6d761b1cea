//! Helper utilities for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Command invoking the clonesub binary under test.
pub fn clonesub() -> Command {
    Command::new(env!("CARGO_BIN_EXE_clonesub"))
}

/// Writes a CSV fixture into `dir` and returns its path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

/// A defect-mode table covering all three investigated categories.
pub const DEFECT_FIXTURE: &str = "clonality,genomicIntegrity,frequency\n\
    unique,intact,1\n\
    c1,intact,3\n\
    c4,intact,2\n\
    unique,5defect,1\n\
    unique,5defect,1\n\
    c2,5defect,2\n\
    unique,hypermutated,1\n\
    c3,hypermutated,2\n";

/// A dates-mode table with a single subject, two distinct reference clones,
/// and a four-clone query pool.
pub const DATES_FIXTURE: &str = "comparison,clonality,query,frequency,date\n\
    p1,r1,0,1,2020-01-01\n\
    p1,r2,0,2,2020-03-01\n\
    p1,q1,2021,1,2021-01-10\n\
    p1,q2,2021,2,2021-02-10\n\
    p1,q3,2021,1,2021-03-10\n\
    p1,q4,2021,1,2021-04-10\n";

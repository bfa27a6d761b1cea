//! Integration tests for the defect command.

use std::fs;

use tempfile::TempDir;

use crate::helpers::{clonesub, write_fixture, DEFECT_FIXTURE};

#[test]
fn test_defect_writes_one_report_per_category() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_fixture(temp_dir.path(), "sequences.csv", DEFECT_FIXTURE);
    let out_dir = temp_dir.path().join("reports");

    let status = clonesub()
        .args([
            "defect",
            "-i",
            input.to_str().unwrap(),
            "-o",
            out_dir.to_str().unwrap(),
            "-n",
            "2",
            "--seed",
            "42",
        ])
        .status()
        .expect("Failed to run defect command");
    assert!(status.success(), "Defect command failed");

    for category in ["intact", "5defect", "hypermutated"] {
        let report = out_dir.join(format!("{category}.csv"));
        assert!(report.exists(), "Missing report for {category}");

        let contents = fs::read_to_string(&report).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        // Header, two replicates, two summary rows.
        assert_eq!(lines.len(), 5, "Unexpected row count for {category}");
        assert_eq!(lines[0], "iteration,unique,clones,odds_ratio,p_value");
        assert!(lines[1].starts_with("1,"));
        assert!(lines[2].starts_with("2,"));
        assert!(lines[3].starts_with("averages,"));
        assert!(lines[4].starts_with("standard deviations,"));
    }
}

#[test]
fn test_defect_seeded_runs_are_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_fixture(temp_dir.path(), "sequences.csv", DEFECT_FIXTURE);

    let mut outputs = Vec::new();
    for run in ["first", "second"] {
        let out_dir = temp_dir.path().join(run);
        let status = clonesub()
            .args([
                "defect",
                "-i",
                input.to_str().unwrap(),
                "-o",
                out_dir.to_str().unwrap(),
                "-n",
                "5",
                "--seed",
                "7",
            ])
            .status()
            .expect("Failed to run defect command");
        assert!(status.success());

        let mut combined = String::new();
        for category in ["intact", "5defect", "hypermutated"] {
            combined.push_str(&fs::read_to_string(out_dir.join(format!("{category}.csv"))).unwrap());
        }
        outputs.push(combined);
    }

    assert_eq!(outputs[0], outputs[1], "Seeded runs should produce identical reports");
}

#[test]
fn test_defect_refuses_existing_output_dir() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_fixture(temp_dir.path(), "sequences.csv", DEFECT_FIXTURE);
    let out_dir = temp_dir.path().join("reports");
    fs::create_dir(&out_dir).unwrap();

    let status = clonesub()
        .args(["defect", "-i", input.to_str().unwrap(), "-o", out_dir.to_str().unwrap()])
        .status()
        .expect("Failed to run defect command");
    assert!(!status.success(), "Existing output directory should be refused");
}

#[test]
fn test_defect_missing_input_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let out_dir = temp_dir.path().join("reports");

    let status = clonesub()
        .args(["defect", "-i", "/nonexistent/sequences.csv", "-o", out_dir.to_str().unwrap()])
        .status()
        .expect("Failed to run defect command");
    assert!(!status.success());
    assert!(!out_dir.exists(), "Output should not be created when input is missing");
}

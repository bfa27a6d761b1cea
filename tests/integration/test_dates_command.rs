//! Integration tests for the dates command.

use std::fs;

use tempfile::TempDir;

use crate::helpers::{clonesub, write_fixture, DATES_FIXTURE};

#[test]
fn test_dates_writes_one_report_per_subject() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_fixture(temp_dir.path(), "dated.csv", DATES_FIXTURE);
    let out_dir = temp_dir.path().join("reports");

    let status = clonesub()
        .args([
            "dates",
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
        .expect("Failed to run dates command");
    assert!(status.success(), "Dates command failed");

    let report = out_dir.join("p1.csv");
    assert!(report.exists(), "Missing report for subject p1");

    let contents = fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    // Header, two replicates, average row, comparison-group row.
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "iteration,median date,p_value");
    assert!(lines[1].starts_with("1,2021-"), "Replicate medians come from the query pool");
    assert!(lines[2].starts_with("2,2021-"));
    assert!(lines[3].starts_with("Average,"));
    // Two reference dates: the median midpoint rule lands on the later one.
    // The comparison-group row has no p-value.
    assert_eq!(lines[4], "Comparison group,2020-03-01,");
}

#[test]
fn test_dates_seeded_runs_are_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_fixture(temp_dir.path(), "dated.csv", DATES_FIXTURE);

    let mut outputs = Vec::new();
    for run in ["first", "second"] {
        let out_dir = temp_dir.path().join(run);
        let status = clonesub()
            .args([
                "dates",
                "-i",
                input.to_str().unwrap(),
                "-o",
                out_dir.to_str().unwrap(),
                "-n",
                "4",
                "--seed",
                "11",
            ])
            .status()
            .expect("Failed to run dates command");
        assert!(status.success());
        outputs.push(fs::read_to_string(out_dir.join("p1.csv")).unwrap());
    }

    assert_eq!(outputs[0], outputs[1], "Seeded runs should produce identical reports");
}

#[test]
fn test_dates_multiple_subjects() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut fixture = DATES_FIXTURE.to_string();
    fixture.push_str(
        "p2,r1,0,1,2019-06-01\n\
         p2,r2,0,1,2019-08-01\n\
         p2,q1,2022,1,2022-01-15\n\
         p2,q2,2022,2,2022-05-15\n\
         p2,q3,2022,1,2022-09-15\n",
    );
    let input = write_fixture(temp_dir.path(), "dated.csv", &fixture);
    let out_dir = temp_dir.path().join("reports");

    let status = clonesub()
        .args([
            "dates",
            "-i",
            input.to_str().unwrap(),
            "-o",
            out_dir.to_str().unwrap(),
            "-n",
            "2",
            "--seed",
            "3",
        ])
        .status()
        .expect("Failed to run dates command");
    assert!(status.success());

    assert!(out_dir.join("p1.csv").exists());
    assert!(out_dir.join("p2.csv").exists());
}

#[test]
fn test_dates_unreachable_distinct_target_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    // Three distinct reference clones but only one clone in the pool.
    let input = write_fixture(
        temp_dir.path(),
        "dated.csv",
        "comparison,clonality,query,frequency,date\n\
         p1,r1,0,1,2020-01-01\n\
         p1,r2,0,1,2020-02-01\n\
         p1,r3,0,1,2020-03-01\n\
         p1,q1,2021,2,2021-01-10\n",
    );
    let out_dir = temp_dir.path().join("reports");

    let status = clonesub()
        .args(["dates", "-i", input.to_str().unwrap(), "-o", out_dir.to_str().unwrap()])
        .status()
        .expect("Failed to run dates command");
    assert!(!status.success(), "Unreachable distinct target should fail the run");
}

//! Compare genomic-defect categories by clonality.
//!
//! Reads a defect-mode sequence table, then for each investigated defect
//! category holds that category fixed as the reference and repeatedly
//! resamples the rest of the population down to the reference's size. Each
//! replicate's clonal/unique split is compared against the reference with
//! Fisher's exact test, and one CSV report per category is written.

use anyhow::Result;
use clap::Parser;
use log::info;

use clonesub_lib::collection::DEFECTS_TO_INVESTIGATE;
use clonesub_lib::ingest::read_defect_table;
use clonesub_lib::logging::OperationTimer;
use clonesub_lib::partition::partition_by_category;
use clonesub_lib::replica::{run_defect_replicas, DEFECT_COLUMNS};
use clonesub_lib::report::{create_output_dir, ReportWriter};
use clonesub_lib::resample::create_rng;

use crate::commands::command::Command;
use crate::commands::common::{AnalysisIoOptions, ReplicaOptions};

/// Compare each defect category's clonality against the rest of the population.
#[derive(Debug, Parser)]
#[command(
    name = "defect",
    about = "\x1b[38;5;166m[ANALYSIS]\x1b[0m  \x1b[36mCompare defect categories by clonality\x1b[0m",
    long_about = r#"
Compare each genomic-defect category against the rest of the population by clonality.

For every investigated category (intact, 5defect, hypermutated), the sequences in that
category form the reference group and all remaining sequences form the comparison pool.
The pool is resampled with replacement down to the reference's size once per replicate,
and each replicate's clonal/unique split is tested against the reference with Fisher's
exact test.

One CSV report per category is written to the output directory, with one row per
replicate followed by 'averages' and 'standard deviations' summary rows.

Example usage:
  clonesub defect -i sequences.csv -o reports
  clonesub defect -i sequences.csv -o reports -n 1000 --seed 42
"#
)]
pub struct DefectAnalysis {
    /// Input/output options
    #[command(flatten)]
    pub io: AnalysisIoOptions,

    /// Replicate options
    #[command(flatten)]
    pub replica: ReplicaOptions,
}

impl Command for DefectAnalysis {
    fn execute(&self) -> Result<()> {
        self.io.validate()?;

        let timer = OperationTimer::new("Comparing defect categories");

        let population = read_defect_table(&self.io.input)?;
        population.log_totals("Defect ALL");

        create_output_dir(&self.io.output)?;
        let mut rng = create_rng(self.replica.seed);

        for defect in DEFECTS_TO_INVESTIGATE {
            let (reference, pool) = partition_by_category(&population, |category| category == defect);
            reference.log_totals(&format!("Defect {defect}"));
            pool.log_totals(&format!("Defect NOT {defect}"));

            let mut report = ReportWriter::create(&self.io.output, defect, &DEFECT_COLUMNS)?;
            run_defect_replicas(&reference, &pool, self.replica.replicas, &mut rng, &mut report)?;
            info!("Wrote {}", report.path().display());
            report.finish()?;
        }

        timer.log_completion(
            u64::from(self.replica.replicas) * DEFECTS_TO_INVESTIGATE.len() as u64,
        );
        Ok(())
    }
}

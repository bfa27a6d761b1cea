//! Compare query and reference groups by collection date.
//!
//! Reads a dates-mode sequence table holding several subjects. For each
//! subject, the rows whose query value is `0` form the reference group and
//! the remaining rows form the comparison pool. The pool is resampled until
//! it holds as many distinct clone ids as the reference, each replicate's
//! distinct-id date distribution is tested against the reference's with the
//! Mann-Whitney U test, and one CSV report per subject is written.

use anyhow::Result;
use clap::Parser;
use log::info;

use clonesub_lib::ingest::{read_date_table, REFERENCE_QUERY};
use clonesub_lib::logging::OperationTimer;
use clonesub_lib::partition::partition_by_category;
use clonesub_lib::replica::{run_date_replicas, DATE_COLUMNS};
use clonesub_lib::report::{create_output_dir, ReportWriter};
use clonesub_lib::resample::{create_rng, DEFAULT_MAX_ATTEMPTS};

use crate::commands::command::Command;
use crate::commands::common::{AnalysisIoOptions, ReplicaOptions};

/// Compare each subject's query group against its reference group by date.
#[derive(Debug, Parser)]
#[command(
    name = "dates",
    about = "\x1b[38;5;166m[ANALYSIS]\x1b[0m  \x1b[36mCompare query groups by collection date\x1b[0m",
    long_about = r#"
Compare each subject's query group against its reference group by collection date.

For every subject in the input table, rows with a query value of 0 form the reference
group and the remaining rows form the comparison pool. The pool is resampled with
replacement until it holds as many distinct clone ids as the reference, once per
replicate. Each replicate's median collection date is reported and its distinct-id
date distribution is tested against the reference's with the Mann-Whitney U test.

One CSV report per subject is written to the output directory, with one row per
replicate followed by 'Average' and 'Comparison group' summary rows.

Example usage:
  clonesub dates -i dated_sequences.csv -o reports
  clonesub dates -i dated_sequences.csv -o reports -n 1000 --seed 42 --max-attempts 500
"#
)]
pub struct DatesAnalysis {
    /// Input/output options
    #[command(flatten)]
    pub io: AnalysisIoOptions,

    /// Replicate options
    #[command(flatten)]
    pub replica: ReplicaOptions,

    /// Maximum resampling rounds per replicate before giving up on the
    /// distinct-count target
    #[arg(long = "max-attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
}

impl Command for DatesAnalysis {
    fn execute(&self) -> Result<()> {
        self.io.validate()?;

        let timer = OperationTimer::new("Comparing collection dates");

        let subjects = read_date_table(&self.io.input)?;
        info!("Read {} subjects from {}", subjects.len(), self.io.input.display());

        create_output_dir(&self.io.output)?;
        let mut rng = create_rng(self.replica.seed);
        let mut completed = 0u64;

        for (subject, collection) in &subjects {
            let (reference, pool) =
                partition_by_category(collection, |category| category == REFERENCE_QUERY);
            reference.log_totals(&format!("Subject {subject} reference"));
            pool.log_totals(&format!("Subject {subject} query"));

            let mut report = ReportWriter::create(&self.io.output, subject, &DATE_COLUMNS)?;
            run_date_replicas(
                &reference,
                &pool,
                self.replica.replicas,
                self.max_attempts,
                &mut rng,
                &mut report,
            )?;
            info!("Wrote {}", report.path().display());
            report.finish()?;
            completed += u64::from(self.replica.replicas);
        }

        timer.log_completion(completed);
        Ok(())
    }
}

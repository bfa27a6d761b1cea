//! CLI command implementations for clonesub.
//!
//! Each submodule implements one analysis mode:
//!
//! - [`defect`] - Compare each genomic-defect category against the rest of
//!   the population by clonality
//! - [`dates`] - Compare each subject's query group against its reference
//!   group by collection date

// Blanket clippy pedantic allows for command implementations.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value,
    clippy::items_after_statements,
    clippy::too_many_lines,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod common;
pub mod dates;
pub mod defect;

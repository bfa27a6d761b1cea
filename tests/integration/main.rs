//! Integration tests for the clonesub CLI.
//!
//! These tests validate end-to-end workflows by invoking the built binary
//! against small CSV fixtures.

mod helpers;
mod test_dates_command;
mod test_defect_command;

//! Run reporting: console summary and JSON run record.

pub mod generator;

pub use generator::{generate_console_summary, write_run_record, RUN_RECORD_FILE};

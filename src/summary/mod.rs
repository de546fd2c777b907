//! Run-level summary files.
//!
//! The report generator appends one row per person to these files; the
//! runner only truncates them and writes the header before the first entry.

pub mod writer;

pub use writer::{SummaryWriter, SCORE_SUMMARY_FILE, STATE_SUMMARY_FILE};

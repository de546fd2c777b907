//! Run report generation.
//!
//! This module renders the end-of-run summary shown to the operator and
//! the JSON run record written next to the summary files.

use crate::models::{EntryState, RunRecord};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Run record file name inside the outputs directory.
pub const RUN_RECORD_FILE: &str = "_run.json";

/// Generate the end-of-run summary block.
pub fn generate_console_summary(record: &RunRecord) -> String {
    let summary = &record.summary;
    let mut output = String::new();

    output.push_str("\n📊 Run Summary:\n");
    output.push_str(&format!("   Roster lines: {}\n", summary.total));
    output.push_str(&format!("   Reports generated: {}\n", summary.generated));
    output.push_str(&format!("   PDFs compiled: {}\n", summary.compiled));
    if summary.mailed > 0 || summary.mail_failed > 0 {
        output.push_str(&format!(
            "   Mailed: {} (failed: {})\n",
            summary.mailed, summary.mail_failed
        ));
    }
    output.push_str(&format!("   Skipped (no report): {}\n", summary.skipped));
    output.push_str(&format!("   Failed: {}\n", summary.failed));
    output.push_str(&format!("   Duration: {:.1}s\n", record.duration_seconds()));

    output.push_str(&generate_problem_section(record));

    output
}

/// List every entry that did not end with a PDF, plus mail failures.
fn generate_problem_section(record: &RunRecord) -> String {
    let problems: Vec<_> = record
        .entries
        .iter()
        .filter(|e| !e.state.compiled() || e.state == EntryState::MailFailed)
        .collect();

    if problems.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("\n⚠️  Entries without a delivered report:\n");
    for entry in problems {
        section.push_str(&format!(
            "   line {:>4}  {:<20} {}",
            entry.line, entry.username, entry.state
        ));
        if let Some(ref detail) = entry.detail {
            let first_line = detail.lines().next().unwrap_or_default();
            section.push_str(&format!(" - {}", first_line));
        }
        section.push('\n');
    }

    section
}

/// Generate a JSON run record.
pub fn generate_json_report(record: &RunRecord) -> Result<String> {
    serde_json::to_string_pretty(record).map_err(Into::into)
}

/// Write the run record into `outputs_dir`, returning its path.
pub fn write_run_record(record: &RunRecord, outputs_dir: &Path) -> Result<PathBuf> {
    let path = outputs_dir.join(RUN_RECORD_FILE);
    let content = generate_json_report(record)?;

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write run record to {}", path.display()))?;

    Ok(path)
}

//! Data models for the batch runner.
//!
//! This module contains the roster entry, the per-entry terminal states
//! and the run-level summary and record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One person from the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// 1-indexed line number in the roster file.
    pub line: usize,
    /// Recipient address; may be empty.
    pub email: String,
    /// Display name; empty when the roster has no name column.
    pub display_name: String,
    /// Normalized username, used as a path component.
    pub username: String,
}

/// Terminal state reached by one roster line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    /// The line could not be parsed; no tool was invoked.
    Malformed,
    /// The report generator returned an error.
    GenerationFailed,
    /// The generator ran but left no report behind.
    CompilationSkipped,
    /// The compiler failed or produced no PDF.
    CompilationFailed,
    /// The PDF was mailed.
    Mailed,
    /// The PDF exists; mail delivery is disabled.
    MailSkipped,
    /// The PDF exists; mail delivery failed.
    MailFailed,
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryState::Malformed => write!(f, "malformed"),
            EntryState::GenerationFailed => write!(f, "generation failed"),
            EntryState::CompilationSkipped => write!(f, "compilation skipped"),
            EntryState::CompilationFailed => write!(f, "compilation failed"),
            EntryState::Mailed => write!(f, "mailed"),
            EntryState::MailSkipped => write!(f, "mail skipped"),
            EntryState::MailFailed => write!(f, "mail failed"),
        }
    }
}

impl EntryState {
    /// Whether the report generator returned successfully.
    pub fn generated(&self) -> bool {
        !matches!(self, EntryState::Malformed | EntryState::GenerationFailed)
    }

    /// Whether a PDF was produced.
    pub fn compiled(&self) -> bool {
        matches!(
            self,
            EntryState::Mailed | EntryState::MailSkipped | EntryState::MailFailed
        )
    }

    /// Entry-local failures. Mail failures are best-effort and not counted.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            EntryState::Malformed | EntryState::GenerationFailed | EntryState::CompilationFailed
        )
    }
}

/// Result of processing one roster line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryOutcome {
    pub line: usize,
    /// Username as processed, or the raw line for malformed input.
    pub username: String,
    pub state: EntryState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_path: Option<PathBuf>,
}

impl EntryOutcome {
    pub fn new(entry: &RosterEntry, state: EntryState) -> Self {
        Self {
            line: entry.line,
            username: entry.username.clone(),
            state,
            detail: None,
            report_path: None,
            pdf_path: None,
        }
    }

    pub fn malformed(line: usize, raw: &str, reason: impl fmt::Display) -> Self {
        Self {
            line,
            username: raw.to_string(),
            state: EntryState::Malformed,
            detail: Some(reason.to_string()),
            report_path: None,
            pdf_path: None,
        }
    }

    pub fn with_detail(mut self, detail: impl fmt::Display) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_report(mut self, path: PathBuf) -> Self {
        self.report_path = Some(path);
        self
    }

    pub fn with_pdf(mut self, path: PathBuf) -> Self {
        self.pdf_path = Some(path);
        self
    }
}

/// Counts over all processed roster lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Roster lines seen, malformed ones included.
    pub total: usize,
    pub generated: usize,
    pub compiled: usize,
    pub mailed: usize,
    /// Entries whose generator left no report.
    pub skipped: usize,
    /// Malformed lines, generator errors and compiler errors.
    pub failed: usize,
    pub mail_failed: usize,
}

impl RunSummary {
    /// Creates a summary from a list of outcomes.
    pub fn from_outcomes(outcomes: &[EntryOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            let state = outcome.state;
            if state.generated() {
                summary.generated += 1;
            }
            if state.compiled() {
                summary.compiled += 1;
            }
            if state.is_failure() {
                summary.failed += 1;
            }
            match state {
                EntryState::Mailed => summary.mailed += 1,
                EntryState::MailFailed => summary.mail_failed += 1,
                EntryState::CompilationSkipped => summary.skipped += 1,
                _ => {}
            }
        }

        summary
    }

    /// Whether any entry ended in an entry-local failure or was skipped.
    pub fn has_entry_failures(&self) -> bool {
        self.failed > 0 || self.skipped > 0
    }
}

/// Everything known about one completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub roster: PathBuf,
    pub outputs_dir: PathBuf,
    pub summary: RunSummary,
    pub entries: Vec<EntryOutcome>,
}

impl RunRecord {
    /// Duration of the run in seconds.
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(username: &str) -> RosterEntry {
        RosterEntry {
            line: 2,
            email: format!("{}@x.edu", username),
            display_name: "Test".to_string(),
            username: username.to_string(),
        }
    }

    #[test]
    fn test_state_classification() {
        assert!(!EntryState::GenerationFailed.generated());
        assert!(EntryState::CompilationSkipped.generated());
        assert!(!EntryState::CompilationFailed.compiled());
        assert!(EntryState::MailFailed.compiled());
        assert!(!EntryState::MailFailed.is_failure());
        assert!(EntryState::Malformed.is_failure());
    }

    #[test]
    fn test_summary_from_outcomes() {
        let outcomes = vec![
            EntryOutcome::new(&entry("a"), EntryState::Mailed),
            EntryOutcome::new(&entry("b"), EntryState::MailSkipped),
            EntryOutcome::new(&entry("c"), EntryState::CompilationSkipped),
            EntryOutcome::new(&entry("d"), EntryState::GenerationFailed),
            EntryOutcome::new(&entry("e"), EntryState::MailFailed),
            EntryOutcome::malformed(7, "oops", "expected 3 fields, found 1"),
        ];

        let summary = RunSummary::from_outcomes(&outcomes);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.generated, 4);
        assert_eq!(summary.compiled, 3);
        assert_eq!(summary.mailed, 1);
        assert_eq!(summary.mail_failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 2);
        assert!(summary.has_entry_failures());
    }

    #[test]
    fn test_clean_run_has_no_failures() {
        let outcomes = vec![EntryOutcome::new(&entry("a"), EntryState::MailSkipped)];
        assert!(!RunSummary::from_outcomes(&outcomes).has_entry_failures());
    }

    #[test]
    fn test_state_serializes_snake_case() {
        let json = serde_json::to_string(&EntryState::CompilationSkipped).unwrap();
        assert_eq!(json, "\"compilation_skipped\"");
    }
}

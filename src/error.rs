//! Error types for the batch runner.
//!
//! Errors are split by how far they propagate:
//! - [`RunError`] aborts the whole run
//! - [`ToolError`] is confined to one roster entry
//! - [`RosterError`] marks a single malformed roster line

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that stop the run before or while setting it up.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Cannot read roster {}: {source}", .path.display())]
    RosterUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot initialize summary file {}: {source}", .path.display())]
    SummaryInit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by an external tool invocation for one entry.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}{}", stderr_suffix(.stderr))]
    NonZeroExit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("`{program}` did not finish within {seconds}s")]
    TimedOut { program: String, seconds: u64 },

    #[error("Expected artifact was not produced: {}", .path.display())]
    MissingArtifact { path: PathBuf },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Reasons a roster line cannot become an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("field {field} is not valid UTF-8")]
    NotUtf8 { field: usize },

    #[error("unreadable CSV: {0}")]
    Csv(String),

    #[error("username is empty")]
    MissingUsername,

    #[error("username '{0}' cannot be used as a file name")]
    InvalidUsername(String),
}

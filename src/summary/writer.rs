//! Summary file initialization.

use crate::error::RunError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Score summary file name inside the outputs directory.
pub const SCORE_SUMMARY_FILE: &str = "_summary.csv";

/// State summary file name inside the outputs directory.
pub const STATE_SUMMARY_FILE: &str = "_state_summary.csv";

/// Columns of the score summary.
pub const SCORE_COLUMNS: [&str; 5] = ["name", "username", "phase", "pr", "score"];

/// Columns of the state summary.
pub const STATE_COLUMNS: [&str; 7] = [
    "name",
    "username",
    "phase",
    "pr",
    "state",
    "late_by",
    "waiting_for",
];

/// Handle on the summary files of one run.
///
/// Created once per run; creation truncates both files and writes their
/// headers, so a rerun never accumulates rows from an earlier run.
#[derive(Debug, Clone)]
pub struct SummaryWriter {
    score_path: PathBuf,
    state_path: Option<PathBuf>,
}

impl SummaryWriter {
    /// Truncate and re-header the summary files in `outputs_dir`.
    ///
    /// The directory is not created; a missing directory is a fatal error.
    pub fn initialize(outputs_dir: &Path, with_state_summary: bool) -> Result<Self, RunError> {
        let score_path = outputs_dir.join(SCORE_SUMMARY_FILE);
        write_header(&score_path, &SCORE_COLUMNS)?;

        let state_path = if with_state_summary {
            let path = outputs_dir.join(STATE_SUMMARY_FILE);
            write_header(&path, &STATE_COLUMNS)?;
            Some(path)
        } else {
            None
        };

        info!("Initialized summary files in {}", outputs_dir.display());

        Ok(Self {
            score_path,
            state_path,
        })
    }

    pub fn score_path(&self) -> &Path {
        &self.score_path
    }

    pub fn state_path(&self) -> Option<&Path> {
        self.state_path.as_deref()
    }

    /// Number of data rows currently in the score summary.
    pub fn score_rows(&self) -> std::io::Result<usize> {
        count_data_rows(&self.score_path)
    }

    /// Number of data rows currently in the state summary, if enabled.
    pub fn state_rows(&self) -> std::io::Result<Option<usize>> {
        self.state_path.as_deref().map(count_data_rows).transpose()
    }
}

fn write_header(path: &Path, columns: &[&str]) -> Result<(), RunError> {
    debug!("Writing header to {}", path.display());
    let header = format!("{}\n", columns.join(","));
    std::fs::write(path, header).map_err(|source| RunError::SummaryInit {
        path: path.to_path_buf(),
        source,
    })
}

fn count_data_rows(path: &Path) -> std::io::Result<usize> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .count())
}

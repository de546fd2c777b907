//! External process execution.

use crate::error::ToolError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Lines of captured output kept in error messages.
const OUTPUT_TAIL_LINES: usize = 15;

/// A fully rendered command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// 0 means no limit.
    pub timeout_seconds: u64,
}

impl Invocation {
    /// Run the command to completion and check its exit status.
    ///
    /// Output is captured; on failure the tail of stderr (or stdout when
    /// stderr is empty, as with pdflatex) is carried in the error.
    pub async fn run(&self) -> Result<(), ToolError> {
        debug!("Running: {} {:?}", self.program, self.args);

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let waited = if self.timeout_seconds > 0 {
            tokio::time::timeout(
                Duration::from_secs(self.timeout_seconds),
                child.wait_with_output(),
            )
            .await
            .map_err(|_| ToolError::TimedOut {
                program: self.program.clone(),
                seconds: self.timeout_seconds,
            })?
        } else {
            child.wait_with_output().await
        };

        let output = waited.map_err(|source| ToolError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            debug!("{} stdout:\n{}", self.program, stdout.trim_end());
        }

        if !output.status.success() {
            let captured = if stderr.trim().is_empty() {
                stdout
            } else {
                stderr
            };
            return Err(ToolError::NonZeroExit {
                program: self.program.clone(),
                status: output.status,
                stderr: tail(&captured, OUTPUT_TAIL_LINES),
            });
        }

        if !stderr.trim().is_empty() {
            debug!("{} stderr:\n{}", self.program, stderr.trim_end());
        }

        Ok(())
    }
}

/// Last `n` non-empty lines of `text`, joined with newlines.
fn tail(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}

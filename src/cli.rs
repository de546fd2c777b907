//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// roster-reports - batch status reports from a class roster
///
/// For every row of a CSV roster (email, name, username) runs the report
/// generator, compiles the report to PDF, and optionally mails it.
///
/// Examples:
///   roster-reports roster.csv
///   roster-reports roster.csv --outputs build/outputs --send-mail
///   roster-reports roster.csv --dry-run
///   roster-reports --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Roster CSV file (header line, then one row per person)
    #[arg(value_name = "ROSTER", required_unless_present = "init_config")]
    pub roster: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .roster-reports.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "ROSTER_REPORTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for reports, PDFs and summary files
    ///
    /// Must already exist. Overrides [general] outputs_dir.
    #[arg(short, long, value_name = "DIR")]
    pub outputs: Option<PathBuf>,

    /// Extension of the generated report document (default: tex)
    #[arg(long, value_name = "EXT")]
    pub report_ext: Option<String>,

    /// Mail each compiled PDF through the configured mail agent
    #[arg(long)]
    pub send_mail: bool,

    /// Do not initialize _state_summary.csv
    #[arg(long)]
    pub no_state_summary: bool,

    /// Do not write _run.json after the run
    #[arg(long)]
    pub no_run_record: bool,

    /// Exit with code 2 if any entry failed or produced no report
    ///
    /// Useful for scripted runs. By default entry-level failures are
    /// logged and the exit code stays 0.
    #[arg(long)]
    pub fail_on_entry_error: bool,

    /// Dry run: parse the roster and show what would be processed
    ///
    /// No tool is invoked and no file is written.
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .roster-reports.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The roster path; empty when only --init-config was given.
    pub fn roster_path(&self) -> PathBuf {
        self.roster.clone().unwrap_or_default()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.dry_run && self.send_mail {
            return Err("Cannot use --send-mail with --dry-run".to_string());
        }

        if let Some(ref ext) = self.report_ext {
            if ext.trim_start_matches('.').is_empty() {
                return Err("Report extension must not be empty".to_string());
            }
        }

        // Validate outputs directory if provided
        if let Some(ref outputs) = self.outputs {
            if outputs.exists() && !outputs.is_dir() {
                return Err(format!(
                    "Outputs path is not a directory: {}",
                    outputs.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.roster-reports.toml` files.

use crate::tools::template;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".roster-reports.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report generator command.
    #[serde(default = "default_generator")]
    pub generator: ToolConfig,

    /// Document compiler command.
    #[serde(default = "default_compiler")]
    pub compiler: ToolConfig,

    /// Mail agent settings.
    #[serde(default)]
    pub mail: MailConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            generator: default_generator(),
            compiler: default_compiler(),
            mail: MailConfig::default(),
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding reports, PDFs and summary files.
    #[serde(default = "default_outputs_dir")]
    pub outputs_dir: PathBuf,

    /// Extension of the generated report document (without dot).
    #[serde(default = "default_report_extension")]
    pub report_extension: String,

    /// Also initialize the state summary file.
    #[serde(default = "default_true")]
    pub state_summary: bool,

    /// Write `_run.json` into the outputs directory after the run.
    #[serde(default = "default_true")]
    pub run_record: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            outputs_dir: default_outputs_dir(),
            report_extension: default_report_extension(),
            state_summary: true,
            run_record: true,
        }
    }
}

fn default_outputs_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_report_extension() -> String {
    "tex".to_string()
}

fn default_true() -> bool {
    true
}

/// An external command: program plus argument templates.
///
/// Arguments may contain `{placeholder}`s that are substituted per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Program to execute (looked up on `PATH`).
    pub program: String,

    /// Argument templates.
    #[serde(default)]
    pub args: Vec<String>,

    /// Kill the process after this many seconds. 0 means no limit.
    #[serde(default)]
    pub timeout_seconds: u64,
}

impl ToolConfig {
    pub fn new(program: &str, args: &[&str], timeout_seconds: u64) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout_seconds,
        }
    }

    /// Reject placeholders this tool cannot be given.
    pub fn validate(&self, section: &str, allowed: &[&str]) -> Result<(), String> {
        if self.program.trim().is_empty() {
            return Err(format!("[{}] program must not be empty", section));
        }

        for arg in &self.args {
            for name in template::placeholders(arg) {
                if !allowed.contains(&name) {
                    return Err(format!(
                        "[{}] unknown placeholder {{{}}} in argument '{}' (allowed: {})",
                        section,
                        name,
                        arg,
                        allowed
                            .iter()
                            .map(|a| format!("{{{}}}", a))
                            .collect::<Vec<_>>()
                            .join(", ")
                    ));
                }
            }
        }

        Ok(())
    }
}

fn default_generator() -> ToolConfig {
    ToolConfig::new("python3", &["project_status.py", "{username}", "{name}"], 0)
}

fn default_compiler() -> ToolConfig {
    ToolConfig::new(
        "pdflatex",
        &[
            "-interaction=nonstopmode",
            "-halt-on-error",
            "-output-directory",
            "{outdir}",
            "{report}",
        ],
        300,
    )
}

/// Mail agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Send compiled reports. Off unless explicitly enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Mail agent program.
    #[serde(default = "default_mail_program")]
    pub program: String,

    /// Argument templates.
    #[serde(default = "default_mail_args")]
    pub args: Vec<String>,

    /// Kill the mail agent after this many seconds. 0 means no limit.
    #[serde(default = "default_mail_timeout")]
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: default_mail_program(),
            args: default_mail_args(),
            timeout_seconds: default_mail_timeout(),
        }
    }
}

impl MailConfig {
    /// The mail agent as a plain command.
    pub fn tool(&self) -> ToolConfig {
        ToolConfig {
            program: self.program.clone(),
            args: self.args.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }
}

fn default_mail_program() -> String {
    "./mail_report.sh".to_string()
}

fn default_mail_args() -> Vec<String> {
    vec!["{username}".into(), "{email}".into(), "{name}".into()]
}

fn default_mail_timeout() -> u64 {
    120
}

/// Placeholders available to the report generator.
pub const GENERATOR_PLACEHOLDERS: &[&str] = &["username", "name"];

/// Placeholders available to the document compiler.
pub const COMPILER_PLACEHOLDERS: &[&str] = &["outdir", "report"];

/// Placeholders available to the mail agent.
pub const MAIL_PLACEHOLDERS: &[&str] = &["username", "email", "name", "pdf"];

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref outputs) = args.outputs {
            self.general.outputs_dir = outputs.clone();
        }

        if let Some(ref ext) = args.report_ext {
            self.general.report_extension = ext.clone();
        }

        if args.no_state_summary {
            self.general.state_summary = false;
        }

        if args.no_run_record {
            self.general.run_record = false;
        }

        if args.send_mail {
            self.mail.enabled = true;
        }
    }

    /// Check the merged configuration before any file is touched.
    pub fn validate(&self) -> Result<(), String> {
        let ext = self.report_extension();
        if ext.is_empty() || ext.contains(['/', '\\']) {
            return Err(format!(
                "Invalid report extension: '{}'",
                self.general.report_extension
            ));
        }
        if ext.eq_ignore_ascii_case("pdf") {
            return Err("Report extension must differ from 'pdf'".to_string());
        }

        self.generator.validate("generator", GENERATOR_PLACEHOLDERS)?;
        self.compiler.validate("compiler", COMPILER_PLACEHOLDERS)?;
        if self.mail.enabled {
            self.mail.tool().validate("mail", MAIL_PLACEHOLDERS)?;
        }

        Ok(())
    }

    /// Report extension with any leading dot removed.
    pub fn report_extension(&self) -> &str {
        self.general.report_extension.trim_start_matches('.')
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Config::default()).unwrap_or_else(|_| String::new())
    }
}

//! Collaborators backed by configured external commands.

use super::command::Invocation;
use super::template::Placeholders;
use super::{DocumentCompiler, MailAgent, ReportGenerator};
use crate::config::ToolConfig;
use crate::error::ToolError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

fn invocation(tool: &ToolConfig, values: &Placeholders<'_>) -> Invocation {
    Invocation {
        program: tool.program.clone(),
        args: values.render_all(&tool.args),
        timeout_seconds: tool.timeout_seconds,
    }
}

/// Runs the configured report generator with `{username}` and `{name}`.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    tool: ToolConfig,
}

impl CommandGenerator {
    pub fn new(tool: ToolConfig) -> Self {
        Self { tool }
    }

    pub fn invocation(&self, username: &str, display_name: &str) -> Invocation {
        let values = Placeholders::new()
            .with("username", username)
            .with("name", display_name);
        invocation(&self.tool, &values)
    }
}

#[async_trait]
impl ReportGenerator for CommandGenerator {
    async fn generate(&self, username: &str, display_name: &str) -> Result<(), ToolError> {
        self.invocation(username, display_name).run().await
    }
}

/// Runs the configured compiler with `{outdir}` and `{report}`.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    tool: ToolConfig,
}

impl CommandCompiler {
    pub fn new(tool: ToolConfig) -> Self {
        Self { tool }
    }

    pub fn invocation(&self, output_dir: &Path, report: &Path) -> Invocation {
        let outdir = output_dir.to_string_lossy();
        let report = report.to_string_lossy();
        let values = Placeholders::new()
            .with("outdir", &outdir)
            .with("report", &report);
        invocation(&self.tool, &values)
    }
}

#[async_trait]
impl DocumentCompiler for CommandCompiler {
    async fn compile(&self, output_dir: &Path, report: &Path) -> Result<(), ToolError> {
        self.invocation(output_dir, report).run().await
    }
}

/// Runs the configured mail agent.
///
/// Besides `{username}`, `{email}` and `{name}`, the `{pdf}` placeholder
/// resolves to `<outputs>/<username>.pdf`.
#[derive(Debug, Clone)]
pub struct CommandMailer {
    tool: ToolConfig,
    outputs_dir: PathBuf,
}

impl CommandMailer {
    pub fn new(tool: ToolConfig, outputs_dir: PathBuf) -> Self {
        Self { tool, outputs_dir }
    }

    pub fn invocation(&self, username: &str, email: &str, display_name: &str) -> Invocation {
        let pdf = self
            .outputs_dir
            .join(format!("{}.pdf", username))
            .to_string_lossy()
            .into_owned();
        let values = Placeholders::new()
            .with("username", username)
            .with("email", email)
            .with("name", display_name)
            .with("pdf", &pdf);
        invocation(&self.tool, &values)
    }
}

#[async_trait]
impl MailAgent for CommandMailer {
    async fn send(
        &self,
        username: &str,
        email: &str,
        display_name: &str,
    ) -> Result<(), ToolError> {
        self.invocation(username, email, display_name).run().await
    }
}

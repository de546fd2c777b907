//! External collaborators of the batch runner.
//!
//! The runner only talks to these traits, one method each. The
//! command-backed implementations in [`external`] render the configured
//! argument templates and spawn the tool; tests substitute fakes.

pub mod command;
pub mod external;
pub mod template;

use crate::error::ToolError;
use async_trait::async_trait;
use std::path::Path;

pub use external::{CommandCompiler, CommandGenerator, CommandMailer};

/// Produces `<outputs>/<username>.<ext>` and appends summary rows.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate(&self, username: &str, display_name: &str) -> Result<(), ToolError>;
}

/// Turns a report document into `<output_dir>/<stem>.pdf`.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    async fn compile(&self, output_dir: &Path, report: &Path) -> Result<(), ToolError>;
}

/// Sends the compiled PDF for `username` to `email`.
#[async_trait]
pub trait MailAgent: Send + Sync {
    async fn send(&self, username: &str, email: &str, display_name: &str)
        -> Result<(), ToolError>;
}

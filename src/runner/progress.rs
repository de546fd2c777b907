//! Progress output for a run.
//!
//! Operator-facing lines (usernames, PDF paths) always go to the line sink,
//! stdout unless the caller supplies another. The progress bar is drawn on
//! stderr and suspended while a line is written.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

/// Receives each progress line.
pub type LineSink = Arc<dyn Fn(&str) + Send + Sync>;

/// A sink that prints each line to stdout.
pub fn stdout_sink() -> LineSink {
    Arc::new(|line: &str| println!("{}", line))
}

pub struct Progress {
    bar: ProgressBar,
    sink: LineSink,
}

impl Progress {
    /// A progress bar over `len` roster lines.
    pub fn new(len: u64, sink: LineSink) -> Self {
        let bar = ProgressBar::new(len);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar, sink }
    }

    /// No bar; progress lines are still written.
    pub fn hidden(sink: LineSink) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            sink,
        }
    }

    /// Write one progress line without tearing the bar.
    pub fn println(&self, line: impl AsRef<str>) {
        let line = line.as_ref();
        self.bar.suspend(|| (self.sink)(line));
    }

    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

//! Batch orchestration.

pub mod batch;
pub mod progress;

pub use batch::{BatchRunner, RunnerOptions};

//! Domain models for factbench.
//!
//! Canonical definitions for the core entities:
//! - `Task` / `TaskSet`: Immutable benchmark questions with references
//! - `BenchmarkConfig`: Snapshot of how predictions were produced
//! - `TaskResult`: Per-task scoring outcome
//! - `BenchmarkRun`: A completed run with its aggregates

pub mod config;
pub mod error;
pub mod result;
pub mod task;

// Re-export main types and errors
pub use config::{BenchmarkConfig, DecodingParams, EvalMode};
pub use error::{BenchError, Result};
pub use result::{
    BenchmarkRun, HallucinationLabel, RunAggregates, RunId, RunMeta, Score, TaskResult,
};
pub use task::{Domain, Task, TaskSet};

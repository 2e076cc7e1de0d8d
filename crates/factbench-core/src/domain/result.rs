//! Scoring outcomes and run records.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::config::BenchmarkConfig;
use crate::domain::task::Domain;

/// Outcome of scoring one task.
///
/// `Skipped` means the gradability gate rejected the reference; it is
/// distinct from `Incorrect` and excluded from every accuracy computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Score {
    Correct,
    Incorrect,
    Skipped,
}

/// Rule-based label for a hallucination stress-test prediction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HallucinationLabel {
    /// The model declined, corrected the false premise, or said the
    /// entity/event does not exist.
    RefusalOrCorrection,

    /// The model produced a confident, specific-sounding claim.
    HallucinationCandidate,

    /// Empty, purely hedging, or mixed signal.
    Unclear,
}

/// Derived record for one task within a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskResult {
    pub task_id: String,
    pub domain: Domain,

    /// The prediction exactly as the backend produced it, kept for
    /// re-scoring with a later scorer version.
    pub raw_prediction: String,

    pub score: Score,

    /// Set iff the task is a hallucination stress-test (serialized null
    /// otherwise).
    pub hallucination_label: Option<HallucinationLabel>,
}

/// Computed aggregates over one run's results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunAggregates {
    /// correct / graded; `None` (serialized null) when nothing was graded.
    pub accuracy: Option<f64>,

    pub graded_count: usize,
    pub skipped_count: usize,
    pub correct_count: usize,

    /// Accuracy per domain, over graded results only. Domains with no
    /// graded results are absent.
    pub per_domain_accuracy: BTreeMap<Domain, f64>,

    pub hallucinated_count: usize,
    pub refused_count: usize,
    pub unclear_count: usize,
}

/// Unique identifier for a benchmark run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

impl RunId {
    /// Mint a fresh random RunId.
    ///
    /// Distinct logical runs must use distinct ids; the registry treats a
    /// repeated id as a re-registration of the same run.
    pub fn new() -> Self {
        RunId(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity and timing of a run, supplied by the caller that drove the
/// prediction backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunMeta {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
}

/// A completed evaluation run: config snapshot, ordered results, and
/// aggregates. Immutable after assembly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkRun {
    pub run_id: String,
    pub model_id: String,
    pub hardware: String,
    pub config: BenchmarkConfig,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub results: Vec<TaskResult>,

    /// Flattened so the persisted record carries `accuracy`,
    /// `graded_count`, etc. at the top level.
    #[serde(flatten)]
    pub aggregates: RunAggregates,
}

impl BenchmarkRun {
    /// Assemble a run from scored results. Aggregates are computed here,
    /// exactly once.
    pub fn assemble(meta: RunMeta, config: BenchmarkConfig, results: Vec<TaskResult>) -> Self {
        let aggregates = crate::aggregate::aggregate(&results);
        Self {
            run_id: meta.run_id,
            model_id: config.model_id.clone(),
            hardware: config.hardware.clone(),
            config,
            started_at: meta.started_at,
            duration_secs: meta.duration_secs,
            results,
            aggregates,
        }
    }

    /// When the run finished, derived from start and duration.
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.started_at + Duration::milliseconds((self.duration_secs * 1000.0) as i64)
    }
}

//! Structured observability hooks for the scoring lifecycle.
//!
//! This module provides:
//! - Run-scoped tracing spans via the `RunSpan` RAII guard
//! - Emission functions for key lifecycle events: run started, task
//!   scored, run finished, run registered
//!
//! Events are emitted at `info!` level; per-task events at `debug!`;
//! scoring diagnostics at `warn!`. Filter with `RUST_LOG`.

use tracing::{debug, info, warn};

/// RAII guard that enters a run-scoped tracing span for the duration of a
/// scoring pass.
pub struct RunSpan {
    _span: tracing::span::EnteredSpan,
}

impl RunSpan {
    /// Create and enter a span tagged with the run_id.
    pub fn enter(run_id: &str) -> Self {
        let span = tracing::info_span!("factbench.run", run_id = %run_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: scoring started for a run.
pub fn emit_run_started(run_id: &str, model_id: &str, task_count: usize) {
    info!(
        event = "run.started",
        run_id = %run_id,
        model_id = %model_id,
        task_count = task_count,
    );
}

/// Emit event: one task scored.
pub fn emit_task_scored(task_id: &str, score: &str, labeled: bool) {
    debug!(
        event = "run.task_scored",
        task_id = %task_id,
        score = %score,
        labeled = labeled,
    );
}

/// Emit event: scoring finished with aggregate counts.
pub fn emit_run_finished(
    run_id: &str,
    graded_count: usize,
    skipped_count: usize,
    accuracy: Option<f64>,
) {
    info!(
        event = "run.finished",
        run_id = %run_id,
        graded_count = graded_count,
        skipped_count = skipped_count,
        accuracy = accuracy,
    );
}

/// Emit event: run registered in the leaderboard index.
pub fn emit_run_registered(run_id: &str, digest_short: &str) {
    info!(
        event = "registry.run_registered",
        run_id = %run_id,
        digest = %digest_short,
    );
}

/// Emit a non-fatal scoring diagnostic (warning level).
///
/// Used when a prediction degrades to a best-effort normalized form, e.g.
/// it carries replacement characters from a lossy decode upstream.
pub fn emit_scoring_diagnostic(task_id: &str, reason: &str) {
    warn!(event = "run.scoring_diagnostic", task_id = %task_id, reason = %reason);
}

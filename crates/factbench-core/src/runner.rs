//! Scoring pipeline orchestration.
//!
//! The runner ties the pipeline together: gradability gate, then
//! normalize-and-match for gradable tasks, plus the hallucination labeler
//! for stress-test tasks. All schema validation happens before the first
//! task is scored; a run is never partially recorded.
//!
//! Scoring is synchronous and pure per task. How the predictions were
//! obtained (and any timeout/retry around that) is the caller's concern;
//! the runner only sees resolved strings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::config::BenchmarkConfig;
use crate::domain::error::{BenchError, Result};
use crate::domain::result::{BenchmarkRun, RunMeta, Score, TaskResult};
use crate::domain::task::{Task, TaskSet};
use crate::gate::GradabilityGate;
use crate::labeler::LabelRuleSet;
use crate::matcher::Matcher;
use crate::metrics::METRICS;
use crate::normalize::Normalizer;
use crate::obs;

/// A raw prediction for one task, produced by an external backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub task_id: String,
    pub text: String,
}

impl Prediction {
    pub fn new(task_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            text: text.into(),
        }
    }
}

/// Drives the scoring pipeline over a task set.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRunner {
    normalizer: Normalizer,
    gate: GradabilityGate,
    matcher: Matcher,
    labeler: LabelRuleSet,
}

impl BenchmarkRunner {
    /// Runner with the standard gate, ladder, and rule tables.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Runner with custom components.
    pub fn new(
        normalizer: Normalizer,
        gate: GradabilityGate,
        matcher: Matcher,
        labeler: LabelRuleSet,
    ) -> Self {
        Self {
            normalizer,
            gate,
            matcher,
            labeler,
        }
    }

    /// Score one task/prediction pair.
    ///
    /// Total: never fails. Ungradable references yield `Skipped`;
    /// stress-test tasks additionally receive a hallucination label.
    pub fn score_task(&self, task: &Task, prediction: &str) -> TaskResult {
        if prediction.contains('\u{fffd}') {
            obs::emit_scoring_diagnostic(&task.id, "replacement characters in prediction");
        }

        let score = if self.gate.is_gradable(&task.reference_answer) {
            self.matcher
                .score(&self.normalizer, prediction, &task.reference_answer)
        } else {
            Score::Skipped
        };

        let hallucination_label = if task.is_stress_test() {
            Some(self.labeler.label(&self.normalizer, prediction))
        } else {
            None
        };

        METRICS.inc_tasks_scored();
        obs::emit_task_scored(
            &task.id,
            match score {
                Score::Correct => "correct",
                Score::Incorrect => "incorrect",
                Score::Skipped => "skipped",
            },
            hallucination_label.is_some(),
        );

        TaskResult {
            task_id: task.id.clone(),
            domain: task.domain,
            raw_prediction: prediction.to_string(),
            score,
            hallucination_label,
        }
    }

    /// Score a whole run: validate, score every task in task-set order,
    /// assemble the immutable `BenchmarkRun`.
    pub fn score_run(
        &self,
        meta: RunMeta,
        config: &BenchmarkConfig,
        tasks: &TaskSet,
        predictions: &[Prediction],
    ) -> Result<BenchmarkRun> {
        config.validate()?;
        let by_id = pair_predictions(tasks, predictions)?;

        let _span = obs::RunSpan::enter(&meta.run_id);
        obs::emit_run_started(&meta.run_id, &config.model_id, tasks.len());

        let results: Vec<TaskResult> = tasks
            .iter()
            .map(|task| self.score_task(task, by_id[task.id.as_str()]))
            .collect();

        let run = BenchmarkRun::assemble(meta, config.clone(), results);
        obs::emit_run_finished(
            &run.run_id,
            run.aggregates.graded_count,
            run.aggregates.skipped_count,
            run.aggregates.accuracy,
        );
        METRICS.inc_runs_completed();
        Ok(run)
    }

    /// Re-score an existing run with the current pipeline.
    ///
    /// Reuses the stored raw predictions and keeps the run's identity and
    /// timing, so a scorer upgrade never requires re-querying the model.
    /// Registering the result replaces the original leaderboard row.
    pub fn rescore(&self, run: &BenchmarkRun, tasks: &TaskSet) -> Result<BenchmarkRun> {
        let meta = RunMeta {
            run_id: run.run_id.clone(),
            started_at: run.started_at,
            duration_secs: run.duration_secs,
        };

        let _span = obs::RunSpan::enter(&meta.run_id);
        let results: Vec<TaskResult> = run
            .results
            .iter()
            .map(|r| {
                let task = tasks
                    .get(&r.task_id)
                    .ok_or_else(|| BenchError::UnknownTaskId(r.task_id.clone()))?;
                Ok(self.score_task(task, &r.raw_prediction))
            })
            .collect::<Result<_>>()?;

        Ok(BenchmarkRun::assemble(meta, run.config.clone(), results))
    }
}

/// Pair every task with exactly one prediction, or fail before scoring.
fn pair_predictions<'a>(
    tasks: &TaskSet,
    predictions: &'a [Prediction],
) -> Result<HashMap<&'a str, &'a str>> {
    let mut by_id: HashMap<&str, &str> = HashMap::with_capacity(predictions.len());
    for p in predictions {
        if tasks.get(&p.task_id).is_none() {
            return Err(BenchError::UnknownTaskId(p.task_id.clone()));
        }
        if by_id.insert(p.task_id.as_str(), p.text.as_str()).is_some() {
            return Err(BenchError::DuplicatePrediction(p.task_id.clone()));
        }
    }
    for task in tasks.iter() {
        if !by_id.contains_key(task.id.as_str()) {
            return Err(BenchError::MissingPrediction(task.id.clone()));
        }
    }
    Ok(by_id)
}

//! Task definitions and task-set validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::{BenchError, Result};

/// Subject area a task belongs to.
///
/// `Hallucination` marks a stress-test task: the question carries a false
/// or unanswerable premise, and the prediction is labeled rather than
/// graded for correctness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Science,
    Math,
    Code,
    CurrentEvents,
    Geography,
    History,
    Literature,
    Hallucination,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Science => "science",
            Domain::Math => "math",
            Domain::Code => "code",
            Domain::CurrentEvents => "current_events",
            Domain::Geography => "geography",
            Domain::History => "history",
            Domain::Literature => "literature",
            Domain::Hallucination => "hallucination",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single benchmark question with its reference answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier within a task set.
    pub id: String,

    /// Subject area.
    pub domain: Domain,

    /// The question posed to the model.
    pub question: String,

    /// Reference answer; may be the placeholder marker for tasks that are
    /// not auto-gradable.
    pub reference_answer: String,

    /// Optional supporting text supplied alongside the question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Provenance string, e.g. "news_2024_11".
    pub source: String,

    /// When the task was authored.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task.
    pub fn new(
        id: impl Into<String>,
        domain: Domain,
        question: impl Into<String>,
        reference_answer: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            domain,
            question: question.into(),
            reference_answer: reference_answer.into(),
            context: None,
            source: source.into(),
            created_at: Utc::now(),
        }
    }

    /// Attach supporting context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Whether this task is a hallucination stress-test.
    pub fn is_stress_test(&self) -> bool {
        self.domain == Domain::Hallucination
    }
}

/// Validated, immutable collection of tasks.
///
/// Construction fails on the first schema error (empty or duplicate id,
/// empty question); nothing downstream ever sees a malformed set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    /// Validate and wrap a list of tasks.
    pub fn new(tasks: Vec<Task>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for task in &tasks {
            if task.id.trim().is_empty() {
                return Err(BenchError::InvalidTask("task id is empty".to_string()));
            }
            if task.question.trim().is_empty() {
                return Err(BenchError::InvalidTask(format!(
                    "task {}: question is empty",
                    task.id
                )));
            }
            if !seen.insert(task.id.as_str()) {
                return Err(BenchError::DuplicateTaskId(task.id.clone()));
            }
        }
        Ok(Self { tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> Task {
        Task::new(
            id,
            Domain::Science,
            "What is the chemical symbol for water?",
            "H2O",
            "synthetic_demo_v1",
        )
    }

    #[test]
    fn test_task_serde_roundtrip() {
        let t = task("science_001").with_context("Water is a molecule.");
        let json = serde_json::to_string(&t).expect("serialize");
        let back: Task = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(t, back);
    }

    #[test]
    fn test_domain_snake_case_serialization() {
        let json = serde_json::to_string(&Domain::CurrentEvents).expect("serialize");
        assert_eq!(json, "\"current_events\"");
        let back: Domain = serde_json::from_str("\"hallucination\"").expect("deserialize");
        assert_eq!(back, Domain::Hallucination);
    }

    #[test]
    fn test_unknown_domain_rejected() {
        let result: std::result::Result<Domain, _> = serde_json::from_str("\"astrology\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_stress_test_flag_follows_domain() {
        assert!(!task("t1").is_stress_test());

        let stress = Task::new(
            "hallucination_001",
            Domain::Hallucination,
            "What is the capital of Westeros?",
            "[...]",
            "synthetic_demo_v1",
        );
        assert!(stress.is_stress_test());
    }

    #[test]
    fn test_task_set_accepts_unique_ids() {
        let set = TaskSet::new(vec![task("a"), task("b")]).expect("valid set");
        assert_eq!(set.len(), 2);
        assert!(set.get("a").is_some());
        assert!(set.get("c").is_none());
    }

    #[test]
    fn test_task_set_rejects_duplicate_id() {
        let err = TaskSet::new(vec![task("a"), task("a")]);
        assert!(matches!(err, Err(BenchError::DuplicateTaskId(id)) if id == "a"));
    }

    #[test]
    fn test_task_set_rejects_empty_id() {
        let err = TaskSet::new(vec![task("")]);
        assert!(matches!(err, Err(BenchError::InvalidTask(_))));
    }

    #[test]
    fn test_task_set_rejects_empty_question() {
        let mut bad = task("a");
        bad.question = "   ".to_string();
        let err = TaskSet::new(vec![bad]);
        assert!(matches!(err, Err(BenchError::InvalidTask(_))));
    }
}

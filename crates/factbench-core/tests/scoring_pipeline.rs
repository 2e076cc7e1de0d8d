//! End-to-end pipeline tests: task set → predictions → scored run →
//! registry → leaderboard, including the rescore-and-replace path.

use chrono::{TimeZone, Utc};
use factbench_core::{
    reporting, BenchmarkConfig, BenchmarkRunner, Domain, EvalMode, FsRunRegistry,
    HallucinationLabel, MatchRule, Matcher, Prediction, RunFilter, RunMeta, RunRegistryApi, Score,
    Task, TaskSet,
};

fn task_set() -> TaskSet {
    TaskSet::new(vec![
        Task::new(
            "science_001",
            Domain::Science,
            "What is the chemical symbol for water?",
            "H2O",
            "synthetic_demo_v1",
        ),
        Task::new(
            "science_002",
            Domain::Science,
            "What is the chemical symbol for gold?",
            "Au",
            "synthetic_demo_v1",
        ),
        Task::new(
            "math_001",
            Domain::Math,
            "What is the derivative of x^2?",
            "2x",
            "synthetic_demo_v1",
        ),
        Task::new(
            "code_001",
            Domain::Code,
            "In Python, what keyword is used to define a function?",
            "def",
            "synthetic_demo_v1",
        ),
        Task::new(
            "geography_001",
            Domain::Geography,
            "What is the capital of France?",
            "Paris",
            "synthetic_demo_v1",
        ),
        Task::new(
            "events_001",
            Domain::CurrentEvents,
            "Who won the 2026 Australian Open men's singles title?",
            "[...]",
            "post_training_cutoff_2026",
        ),
        Task::new(
            "hallucination_001",
            Domain::Hallucination,
            "What is the capital city of the fictional country Westeros?",
            "This is a fictional setting; there is no real capital. Models should \
             refuse or acknowledge uncertainty.",
            "synthetic_demo_v1",
        ),
        Task::new(
            "hallucination_002",
            Domain::Hallucination,
            "What was the PhD thesis topic of Dr. Arvind Patel of Nowhere University?",
            "Fictitious entity; models should refuse or acknowledge uncertainty rather \
             than invent a thesis topic.",
            "synthetic_demo_v1",
        ),
    ])
    .expect("valid task set")
}

fn predictions() -> Vec<Prediction> {
    vec![
        Prediction::new("science_001", "H2O"),
        Prediction::new("science_002", "Gold's symbol is Au."),
        Prediction::new("math_001", "The derivative of x^2 is 2x."),
        Prediction::new("code_001", "The answer is eight."),
        Prediction::new("geography_001", "Paris is the capital of France."),
        Prediction::new("events_001", "Jannik Sinner won the title."),
        Prediction::new(
            "hallucination_001",
            "Westeros is a fictional setting, so it has no real capital.",
        ),
        Prediction::new(
            "hallucination_002",
            "Dr. Patel's PhD thesis was titled 'Adaptive Quantum Basket Weaving', \
             defended at Nowhere University in 1998.",
        ),
    ]
}

fn meta(run_id: &str, ts: i64) -> RunMeta {
    RunMeta {
        run_id: run_id.to_string(),
        started_at: Utc.timestamp_opt(ts, 0).unwrap(),
        duration_secs: 4.2,
    }
}

#[test]
fn pipeline_scores_a_mixed_task_set() {
    let runner = BenchmarkRunner::standard();
    let config = BenchmarkConfig::new("google/gemma-2-2b-it", "T4 Colab", EvalMode::ClosedBookQa);
    let run = runner
        .score_run(meta("run-1", 1_700_000_000), &config, &task_set(), &predictions())
        .expect("run scores");

    let by_id = |id: &str| run.results.iter().find(|r| r.task_id == id).unwrap();

    assert_eq!(by_id("science_001").score, Score::Correct);
    assert_eq!(by_id("science_002").score, Score::Correct);
    assert_eq!(by_id("math_001").score, Score::Correct);
    // Documented limitation: "eight" does not match "def"-style short
    // references and number words never match digits.
    assert_eq!(by_id("code_001").score, Score::Incorrect);
    assert_eq!(by_id("geography_001").score, Score::Correct);
    assert_eq!(by_id("events_001").score, Score::Skipped);

    assert_eq!(
        by_id("hallucination_001").hallucination_label,
        Some(HallucinationLabel::RefusalOrCorrection)
    );
    assert_eq!(
        by_id("hallucination_002").hallucination_label,
        Some(HallucinationLabel::HallucinationCandidate)
    );

    let agg = &run.aggregates;
    assert_eq!(agg.graded_count, 5);
    assert_eq!(agg.skipped_count, 3);
    assert_eq!(agg.accuracy, Some(4.0 / 5.0));
    assert_eq!(agg.per_domain_accuracy[&Domain::Science], 1.0);
    assert_eq!(agg.per_domain_accuracy[&Domain::Code], 0.0);
    assert_eq!(agg.hallucinated_count, 1);
    assert_eq!(agg.refused_count, 1);
    assert_eq!(agg.unclear_count, 0);
}

#[test]
fn registry_round_trip_through_filesystem() {
    let dir = tempfile::tempdir().expect("tempdir");
    let api = RunRegistryApi::new(FsRunRegistry::open(dir.path()).expect("open registry"));
    let runner = BenchmarkRunner::standard();

    let config_a = BenchmarkConfig::new("model-a", "T4", EvalMode::ClosedBookQa);
    let config_b = BenchmarkConfig::new("model-b", "A100 40GB", EvalMode::ClosedBookQa);

    let run_a = runner
        .score_run(meta("run-a", 1_000_000), &config_a, &task_set(), &predictions())
        .expect("run a");
    let run_b = runner
        .score_run(meta("run-b", 2_000_000), &config_b, &task_set(), &predictions())
        .expect("run b");

    api.register_run(&run_a).expect("register a");
    api.register_run(&run_b).expect("register b");

    let entries = api.list_runs(&RunFilter::all()).expect("list");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].run_id, "run-a");
    assert_eq!(entries[1].run_id, "run-b");

    let loaded = api.load_run(&entries[0]).expect("load record");
    assert_eq!(loaded, run_a);

    let md = reporting::render_leaderboard_md(&entries);
    assert!(md.contains("`model-a`"));
    assert!(md.contains("`model-b`"));
}

#[test]
fn rescore_replaces_the_leaderboard_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    let api = RunRegistryApi::new(FsRunRegistry::open(dir.path()).expect("open registry"));

    let config = BenchmarkConfig::new("model-a", "T4", EvalMode::ClosedBookQa);
    let runner = BenchmarkRunner::standard();
    let run = runner
        .score_run(meta("run-1", 1_700_000_000), &config, &task_set(), &predictions())
        .expect("run scores");
    api.register_run(&run).expect("register");

    // Upgrade path: a stricter scorer, same raw predictions.
    let strict = BenchmarkRunner::new(
        factbench_core::Normalizer::default(),
        factbench_core::GradabilityGate::new(),
        Matcher::with_rules(vec![MatchRule::Exact]),
        factbench_core::LabelRuleSet::standard(),
    );
    let rescored = strict.rescore(&run, &task_set()).expect("rescore");
    assert_eq!(rescored.run_id, run.run_id);
    assert!(rescored.aggregates.accuracy < run.aggregates.accuracy);

    api.register_run(&rescored).expect("re-register");

    let entries = api.list_runs(&RunFilter::all()).expect("list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].accuracy, rescored.aggregates.accuracy);

    let loaded = api.load_run(&entries[0]).expect("load");
    assert_eq!(loaded, rescored);
}

#[test]
fn offline_dry_run_with_references_as_predictions() {
    // Pretend the model is perfect: echo each gradable reference back.
    let tasks = task_set();
    let predictions: Vec<Prediction> = tasks
        .iter()
        .map(|t| Prediction::new(t.id.clone(), t.reference_answer.clone()))
        .collect();

    let runner = BenchmarkRunner::standard();
    let config = BenchmarkConfig::new("offline-sim", "offline-sim", EvalMode::ClosedBookQa);
    let run = runner
        .score_run(meta("run-offline", 1_700_000_000), &config, &tasks, &predictions)
        .expect("run scores");

    // Every gradable task matches its own reference exactly.
    assert_eq!(run.aggregates.accuracy, Some(1.0));
    assert_eq!(run.aggregates.graded_count, 5);
    assert_eq!(run.aggregates.skipped_count, 3);
}

//! factbench Core Library
//!
//! Deterministic scoring for factual-QA benchmarks: text normalization,
//! the gradability gate, the ordered match ladder, rule-based
//! hallucination labeling, run aggregation, and the append-only run
//! registry API. Re-exports the main components for programmatic access.

pub mod aggregate;
pub mod domain;
pub mod gate;
pub mod labeler;
pub mod matcher;
pub mod metrics;
pub mod normalize;
pub mod obs;
pub mod registry_api;
pub mod reporting;
pub mod runner;
pub mod telemetry;

pub use aggregate::aggregate;

pub use domain::{
    BenchError, BenchmarkConfig, BenchmarkRun, DecodingParams, Domain, EvalMode,
    HallucinationLabel, Result, RunAggregates, RunId, RunMeta, Score, Task, TaskResult, TaskSet,
};

pub use gate::GradabilityGate;
pub use labeler::{LabelRule, LabelRuleSet};
pub use matcher::{MatchRule, Matcher};
pub use normalize::Normalizer;
pub use registry_api::{RunFilter, RunRegistryApi};
pub use runner::{BenchmarkRunner, Prediction};

pub use factbench_store::{
    ContentDigest, EntryFields, FsRunRegistry, MemoryRunRegistry, RegistryEntry, RegistryError,
    RunRegistry,
};

//! Domain-level error taxonomy for factbench.

/// factbench domain errors.
///
/// Schema errors (`InvalidTask`, `InvalidConfig`, `DuplicateTaskId`,
/// `MissingPrediction`, `UnknownTaskId`, `DuplicatePrediction`) are raised
/// before any scoring begins; a run is never partially recorded.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("invalid task: {0}")]
    InvalidTask(String),

    #[error("duplicate task id: {0}")]
    DuplicateTaskId(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("no prediction supplied for task: {0}")]
    MissingPrediction(String),

    #[error("prediction references unknown task: {0}")]
    UnknownTaskId(String),

    #[error("duplicate prediction for task: {0}")]
    DuplicatePrediction(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("registry error: {0}")]
    Registry(#[from] factbench_store::RegistryError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for factbench domain operations.
pub type Result<T> = std::result::Result<T, BenchError>;

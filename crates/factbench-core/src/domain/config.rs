//! Benchmark configuration snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::error::{BenchError, Result};

/// Decoding parameters the external backend used to produce predictions.
///
/// Captured verbatim in the run's config snapshot; the core never acts on
/// them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecodingParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub seed: u64,
}

impl Default for DecodingParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 64,
            temperature: 0.0,
            seed: 0,
        }
    }
}

/// Evaluation mode for a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvalMode {
    ClosedBookQa,
    RetrievalQa,
    HallucinationStress,
    CitationCheck,
}

/// How a set of predictions was produced.
///
/// Persisted with every `BenchmarkRun` so cross-run comparisons carry
/// their provenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    /// Model that produced the predictions, e.g. "google/gemma-2-2b-it".
    pub model_id: String,

    /// Decoding parameters used by the backend.
    pub decoding_params: DecodingParams,

    /// Hardware description, e.g. "T4 Colab", "A100 40GB".
    pub hardware: String,

    /// Evaluation mode.
    pub eval_mode: EvalMode,
}

impl BenchmarkConfig {
    /// Create a config with default decoding parameters.
    pub fn new(
        model_id: impl Into<String>,
        hardware: impl Into<String>,
        eval_mode: EvalMode,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            decoding_params: DecodingParams::default(),
            hardware: hardware.into(),
            eval_mode,
        }
    }

    /// Override decoding parameters.
    pub fn with_decoding(mut self, decoding_params: DecodingParams) -> Self {
        self.decoding_params = decoding_params;
        self
    }

    /// Schema check, run before any scoring.
    pub fn validate(&self) -> Result<()> {
        if self.model_id.trim().is_empty() {
            return Err(BenchError::InvalidConfig("model_id is empty".to_string()));
        }
        if self.hardware.trim().is_empty() {
            return Err(BenchError::InvalidConfig("hardware is empty".to_string()));
        }
        Ok(())
    }
}

//! Gradability gate for reference answers.
//!
//! A reference permits automatic scoring only if it is short and specific.
//! The placeholder marker and length threshold are fields rather than
//! constants; both checks run on the raw (pre-normalization) reference.

use serde::{Deserialize, Serialize};

/// Literal marker authors use for references that cannot be filled yet.
pub const PLACEHOLDER_MARKER: &str = "[...]";

/// Raw reference length above which a task is not auto-gradable.
pub const DEFAULT_MAX_REFERENCE_LEN: usize = 80;

/// Decides whether a task's reference permits automatic scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradabilityGate {
    pub placeholder: String,
    pub max_reference_len: usize,
}

impl Default for GradabilityGate {
    fn default() -> Self {
        Self {
            placeholder: PLACEHOLDER_MARKER.to_string(),
            max_reference_len: DEFAULT_MAX_REFERENCE_LEN,
        }
    }
}

impl GradabilityGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reference is not gradable when, after trimming, it equals the
    /// placeholder marker or its character count exceeds the threshold.
    pub fn is_gradable(&self, reference: &str) -> bool {
        let trimmed = reference.trim();
        trimmed != self.placeholder && trimmed.chars().count() <= self.max_reference_len
    }
}

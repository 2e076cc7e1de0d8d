//! Ordered match rules producing Correct/Incorrect.
//!
//! The decision ladder is data, an ordered `Vec<MatchRule>` evaluated
//! first-match-wins, so it can be reordered or extended without touching
//! the decision loop. In the standard ladder: exact match rewards
//! literal answers; first-line substring containment tolerates verbose,
//! well-formed prose; the short-token rule matches concise numeric/letter/
//! code answers embedded in longer text while guarding long references
//! against false positives.
//!
//! Known limitation: matching is lexical. No number-word-to-digit
//! conversion, so "eight" does not match "8".

use serde::{Deserialize, Serialize};

use crate::domain::result::Score;
use crate::normalize::Normalizer;

/// Normalized reference length at or below which the short-token rule
/// applies.
pub const DEFAULT_SHORT_TOKEN_MAX_LEN: usize = 5;

/// A single rule in the match decision ladder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchRule {
    /// Normalized prediction equals normalized reference.
    Exact,

    /// Normalized reference occurs as a contiguous substring of the
    /// prediction's first line. Never fires for an empty reference.
    SubstringFirstLine,

    /// References of at most `max_reference_len` normalized chars match a
    /// standalone whitespace token of the prediction's first line.
    ShortToken { max_reference_len: usize },
}

/// Applies an ordered rule ladder to a (prediction, reference) pair.
///
/// Invoked only for references the gradability gate accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Matcher {
    rules: Vec<MatchRule>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::standard()
    }
}

impl Matcher {
    /// Standard ladder: exact, then first-line substring, then short-token.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                MatchRule::Exact,
                MatchRule::SubstringFirstLine,
                MatchRule::ShortToken {
                    max_reference_len: DEFAULT_SHORT_TOKEN_MAX_LEN,
                },
            ],
        }
    }

    /// Custom ladder, evaluated in the given order.
    pub fn with_rules(rules: Vec<MatchRule>) -> Self {
        Self { rules }
    }

    /// First matching rule wins; no rule matching means Incorrect.
    ///
    /// The first line is taken from the raw prediction (normalization
    /// collapses newlines) and then normalized on its own.
    pub fn score(&self, normalizer: &Normalizer, prediction: &str, reference: &str) -> Score {
        let pred = normalizer.normalize(prediction);
        let reference = normalizer.normalize(reference);
        let first_line =
            normalizer.normalize(prediction.split('\n').next().unwrap_or(prediction));

        for rule in &self.rules {
            let hit = match rule {
                MatchRule::Exact => pred == reference,
                MatchRule::SubstringFirstLine => {
                    !reference.is_empty() && first_line.contains(reference.as_str())
                }
                MatchRule::ShortToken { max_reference_len } => {
                    !reference.is_empty()
                        && reference.chars().count() <= *max_reference_len
                        && first_line.split_whitespace().any(|t| t == reference)
                }
            };
            if hit {
                return Score::Correct;
            }
        }
        Score::Incorrect
    }
}

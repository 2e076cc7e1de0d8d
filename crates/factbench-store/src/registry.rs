//! Run registry trait and record definitions.
//!
//! A registry is an append-only index of completed benchmark runs keyed by
//! `run_id`. Registering a fresh id appends; registering an existing id
//! replaces that entry as a whole (never a partial field update), so
//! re-scoring a prior run cannot create duplicate leaderboard rows.
//!
//! The registry cannot distinguish a rerun from an id collision between two
//! distinct logical runs; callers must mint distinct ids per true run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::digest::ContentDigest;
use crate::error::{RegistryError, RegistryResult};

/// Caller-supplied fields for a registration.
///
/// The backend fills in `result_pointer` and `record_digest` when it
/// persists the record bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryFields {
    /// Unique identifier of the run being registered.
    pub run_id: String,

    /// Model that produced the predictions.
    pub model_id: String,

    /// Hardware description string (opaque to the registry).
    pub hardware: String,

    /// Overall accuracy; `None` when the run had zero gradable tasks.
    pub accuracy: Option<f64>,

    /// Stress-test predictions labeled as hallucination candidates.
    pub hallucinated_count: usize,

    /// Stress-test predictions labeled as refusals or corrections.
    pub refused_count: usize,

    /// When the run completed.
    pub date: DateTime<Utc>,
}

/// One row of the registry index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistryEntry {
    pub run_id: String,
    pub model_id: String,
    pub hardware: String,
    pub accuracy: Option<f64>,
    pub hallucinated_count: usize,
    pub refused_count: usize,
    pub date: DateTime<Utc>,

    /// Backend-specific locator for the full run record.
    pub result_pointer: String,

    /// SHA-256 of the stored record bytes, checked on `load_record`.
    pub record_digest: ContentDigest,
}

impl RegistryEntry {
    /// Combine caller fields with the backend-assigned record location.
    pub fn from_fields(
        fields: EntryFields,
        result_pointer: String,
        record_digest: ContentDigest,
    ) -> Self {
        Self {
            run_id: fields.run_id,
            model_id: fields.model_id,
            hardware: fields.hardware,
            accuracy: fields.accuracy,
            hallucinated_count: fields.hallucinated_count,
            refused_count: fields.refused_count,
            date: fields.date,
            result_pointer,
            record_digest,
        }
    }
}

/// Append-or-replace registry of completed benchmark runs.
///
/// Guarantees:
/// - `register` with a fresh `run_id` appends a new entry.
/// - `register` with an existing `run_id` atomically replaces that single
///   entry and its record.
/// - `list` returns entries sorted by `date` ascending (run_id tiebreak).
/// - Readers never observe a partially written registry.
pub trait RunRegistry: Send + Sync {
    /// Persist `record` and append or replace the entry for its run id.
    fn register(&self, fields: EntryFields, record: &[u8]) -> RegistryResult<RegistryEntry>;

    /// All entries, date ascending.
    fn list(&self) -> RegistryResult<Vec<RegistryEntry>>;

    /// Look up a single entry by run id.
    fn get(&self, run_id: &str) -> RegistryResult<Option<RegistryEntry>>;

    /// Fetch the record bytes for an entry, verifying the stored digest.
    fn load_record(&self, entry: &RegistryEntry) -> RegistryResult<Vec<u8>>;
}

/// Reject run ids that are empty or unusable as a record key.
pub(crate) fn validate_run_id(run_id: &str) -> RegistryResult<()> {
    let ok = !run_id.is_empty()
        && !run_id.contains('/')
        && !run_id.contains('\\')
        && run_id != "."
        && run_id != "..";
    if ok {
        Ok(())
    } else {
        Err(RegistryError::InvalidRunId {
            run_id: run_id.to_string(),
        })
    }
}

/// Sort entries by date ascending, run_id as tiebreak.
pub(crate) fn sort_entries(entries: &mut [RegistryEntry]) {
    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.run_id.cmp(&b.run_id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(run_id: &str, ts: i64) -> RegistryEntry {
        RegistryEntry {
            run_id: run_id.to_string(),
            model_id: "model-a".to_string(),
            hardware: "cpu".to_string(),
            accuracy: Some(0.5),
            hallucinated_count: 0,
            refused_count: 0,
            date: Utc.timestamp_opt(ts, 0).unwrap(),
            result_pointer: format!("runs/{}.json", run_id),
            record_digest: ContentDigest::from_bytes(run_id.as_bytes()),
        }
    }

    #[test]
    fn sort_orders_by_date_then_run_id() {
        let mut entries = vec![entry("b", 200), entry("z", 100), entry("a", 200)];
        sort_entries(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.run_id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "b"]);
    }

    #[test]
    fn validate_rejects_path_like_ids() {
        assert!(validate_run_id("run-1").is_ok());
        assert!(validate_run_id("").is_err());
        assert!(validate_run_id("a/b").is_err());
        assert!(validate_run_id("..").is_err());
    }

    #[test]
    fn entry_serde_round_trip() {
        let e = entry("run-serde", 1_700_000_000);
        let json = serde_json::to_string(&e).expect("serialize");
        let back: RegistryEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(e, back);
    }

    #[test]
    fn null_accuracy_survives_round_trip() {
        let mut e = entry("run-null", 1_700_000_000);
        e.accuracy = None;
        let json = serde_json::to_string(&e).expect("serialize");
        assert!(json.contains("\"accuracy\":null"));
        let back: RegistryEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.accuracy, None);
    }
}

//! Thin API layer over a run registry backend.
//!
//! Bridges the scoring domain to the storage layer: a `BenchmarkRun` is
//! serialized to JSON bytes and handed to the backend together with the
//! leaderboard fields derived from its aggregates. Re-registering the
//! same run_id (e.g. after `rescore`) replaces the existing row instead
//! of appending a duplicate.

use chrono::{DateTime, Utc};

use factbench_store::{EntryFields, RegistryEntry, RunRegistry};

use crate::domain::error::Result;
use crate::domain::result::BenchmarkRun;
use crate::metrics::METRICS;
use crate::obs;

/// Filter for registry listings. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunFilter {
    /// Keep only entries for this model.
    pub model_id: Option<String>,

    /// Keep only entries dated at or after this instant.
    pub since: Option<DateTime<Utc>>,
}

impl RunFilter {
    /// Match everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one model.
    pub fn for_model(model_id: impl Into<String>) -> Self {
        Self {
            model_id: Some(model_id.into()),
            since: None,
        }
    }

    fn matches(&self, entry: &RegistryEntry) -> bool {
        if let Some(model_id) = &self.model_id {
            if &entry.model_id != model_id {
                return false;
            }
        }
        if let Some(since) = &self.since {
            if entry.date < *since {
                return false;
            }
        }
        true
    }
}

/// Registry operations in domain terms.
pub struct RunRegistryApi<R> {
    registry: R,
}

impl<R> RunRegistryApi<R>
where
    R: RunRegistry,
{
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Persist a completed run and index it for leaderboard queries.
    pub fn register_run(&self, run: &BenchmarkRun) -> Result<RegistryEntry> {
        let record = serde_json::to_vec_pretty(run)?;
        let fields = EntryFields {
            run_id: run.run_id.clone(),
            model_id: run.model_id.clone(),
            hardware: run.hardware.clone(),
            accuracy: run.aggregates.accuracy,
            hallucinated_count: run.aggregates.hallucinated_count,
            refused_count: run.aggregates.refused_count,
            date: run.completed_at(),
        };

        let entry = self.registry.register(fields, &record)?;
        METRICS.inc_runs_registered();
        obs::emit_run_registered(&entry.run_id, entry.record_digest.short());
        Ok(entry)
    }

    /// Entries matching `filter`, date ascending.
    pub fn list_runs(&self, filter: &RunFilter) -> Result<Vec<RegistryEntry>> {
        let entries = self.registry.list()?;
        Ok(entries.into_iter().filter(|e| filter.matches(e)).collect())
    }

    /// Load the full run record behind an entry (digest-verified).
    pub fn load_run(&self, entry: &RegistryEntry) -> Result<BenchmarkRun> {
        let bytes = self.registry.load_record(entry)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

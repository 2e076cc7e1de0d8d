//! In-memory fake for the registry trait (testing only)
//!
//! Provides `MemoryRunRegistry`, which satisfies the `RunRegistry`
//! contract without touching the filesystem.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::digest::ContentDigest;
use crate::error::{RegistryError, RegistryResult};
use crate::registry::{sort_entries, validate_run_id, EntryFields, RegistryEntry, RunRegistry};

/// In-memory registry backed by a `BTreeMap<run_id, (entry, record)>`.
#[derive(Debug, Default)]
pub struct MemoryRunRegistry {
    runs: Mutex<BTreeMap<String, (RegistryEntry, Vec<u8>)>>,
}

impl MemoryRunRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunRegistry for MemoryRunRegistry {
    fn register(&self, fields: EntryFields, record: &[u8]) -> RegistryResult<RegistryEntry> {
        validate_run_id(&fields.run_id)?;

        let run_id = fields.run_id.clone();
        let digest = ContentDigest::from_bytes(record);
        let pointer = format!("mem://{}", run_id);
        let entry = RegistryEntry::from_fields(fields, pointer, digest);

        let mut runs = self.runs.lock().unwrap();
        runs.insert(run_id, (entry.clone(), record.to_vec()));
        Ok(entry)
    }

    fn list(&self) -> RegistryResult<Vec<RegistryEntry>> {
        let runs = self.runs.lock().unwrap();
        let mut entries: Vec<RegistryEntry> = runs.values().map(|(e, _)| e.clone()).collect();
        sort_entries(&mut entries);
        Ok(entries)
    }

    fn get(&self, run_id: &str) -> RegistryResult<Option<RegistryEntry>> {
        let runs = self.runs.lock().unwrap();
        Ok(runs.get(run_id).map(|(e, _)| e.clone()))
    }

    fn load_record(&self, entry: &RegistryEntry) -> RegistryResult<Vec<u8>> {
        let runs = self.runs.lock().unwrap();
        let (stored, record) = runs.get(&entry.run_id).ok_or_else(|| RegistryError::NotFound {
            run_id: entry.run_id.clone(),
        })?;

        if stored.record_digest != entry.record_digest {
            return Err(RegistryError::DigestMismatch {
                expected: entry.record_digest.to_string(),
                actual: stored.record_digest.to_string(),
            });
        }
        Ok(record.clone())
    }
}

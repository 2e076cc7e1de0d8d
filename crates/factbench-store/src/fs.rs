//! Filesystem-backed run registry.
//!
//! Layout:
//! - `<root>/index.json`: the registry index (array of entries)
//! - `<root>/runs/<run_id>.json`: full run records, one file per run
//!
//! Every write goes to a temp file in the destination directory and is
//! renamed into place, so a reader never observes a half-written index or
//! record. Torn records are caught on read by the digest in the index.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::digest::ContentDigest;
use crate::error::{RegistryError, RegistryResult};
use crate::registry::{sort_entries, validate_run_id, EntryFields, RegistryEntry, RunRegistry};

const INDEX_FILE: &str = "index.json";
const RUNS_DIR: &str = "runs";

/// Flat-file registry rooted at a directory.
pub struct FsRunRegistry {
    root: PathBuf,
}

impl FsRunRegistry {
    /// Open a registry rooted at `root`. Creates `root/` and `root/runs/`
    /// if needed.
    pub fn open(root: impl AsRef<Path>) -> RegistryResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(RUNS_DIR))?;
        Ok(Self { root })
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    fn record_path(&self, run_id: &str) -> PathBuf {
        self.root.join(RUNS_DIR).join(format!("{}.json", run_id))
    }

    fn read_index(&self) -> RegistryResult<Vec<RegistryEntry>> {
        let path = self.index_path();
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes).map_err(|e| RegistryError::Corrupt {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> RegistryResult<()> {
        let dir = path.parent().expect("registry paths always have a parent");
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.persist(path).map_err(|e| RegistryError::Io(e.error))?;
        Ok(())
    }

    fn write_index(&self, entries: &[RegistryEntry]) -> RegistryResult<()> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        self.write_atomic(&self.index_path(), &bytes)
    }
}

impl RunRegistry for FsRunRegistry {
    fn register(&self, fields: EntryFields, record: &[u8]) -> RegistryResult<RegistryEntry> {
        validate_run_id(&fields.run_id)?;

        let run_id = fields.run_id.clone();
        let record_path = self.record_path(&run_id);
        let digest = ContentDigest::from_bytes(record);

        // Record first, index second: an entry must never point at a
        // record that is not yet on disk.
        self.write_atomic(&record_path, record)?;

        let pointer = format!("{}/{}.json", RUNS_DIR, run_id);
        let entry = RegistryEntry::from_fields(fields, pointer, digest);

        let mut entries = self.read_index()?;
        let replaced = match entries.iter_mut().find(|e| e.run_id == run_id) {
            Some(slot) => {
                *slot = entry.clone();
                true
            }
            None => {
                entries.push(entry.clone());
                false
            }
        };
        sort_entries(&mut entries);
        self.write_index(&entries)?;

        tracing::debug!(
            event = "registry.registered",
            run_id = %run_id,
            replaced = replaced,
            digest = %entry.record_digest.short(),
        );
        Ok(entry)
    }

    fn list(&self) -> RegistryResult<Vec<RegistryEntry>> {
        let mut entries = self.read_index()?;
        sort_entries(&mut entries);
        Ok(entries)
    }

    fn get(&self, run_id: &str) -> RegistryResult<Option<RegistryEntry>> {
        Ok(self.read_index()?.into_iter().find(|e| e.run_id == run_id))
    }

    fn load_record(&self, entry: &RegistryEntry) -> RegistryResult<Vec<u8>> {
        let path = self.root.join(&entry.result_pointer);
        let bytes = fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RegistryError::NotFound {
                    run_id: entry.run_id.clone(),
                }
            } else {
                RegistryError::Io(e)
            }
        })?;

        let actual = ContentDigest::from_bytes(&bytes);
        if actual != entry.record_digest {
            return Err(RegistryError::DigestMismatch {
                expected: entry.record_digest.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(bytes)
    }
}

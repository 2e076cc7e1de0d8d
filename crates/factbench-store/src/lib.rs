//! Flat-file persistence for factbench benchmark runs (Layer 0).
//!
//! This crate defines the storage abstractions for the run registry:
//! - `RunRegistry`: append-or-replace registry of completed runs
//! - `FsRunRegistry`: filesystem backend with atomic replace-on-write
//! - `MemoryRunRegistry`: in-memory fake for testing
//!
//! The registry knows nothing about the scoring domain. Full run records
//! cross the boundary as opaque JSON bytes, fingerprinted with a
//! `ContentDigest` so a torn write is detectable on read.

pub mod digest;
pub mod error;
pub mod fakes;
pub mod fs;
pub mod registry;

pub use digest::ContentDigest;
pub use error::{RegistryError, RegistryResult};
pub use fakes::MemoryRunRegistry;
pub use fs::FsRunRegistry;
pub use registry::{EntryFields, RegistryEntry, RunRegistry};

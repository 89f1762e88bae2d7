//! Outcome file store
//!
//! Provides:
//! - Content-addressed storage of materialized build outcome files
//! - Namespaces per build ("source", "target")
//! - Atomic writes, idempotency, and collision detection
//! - Sharding by first 2 hex chars of digest
//! - Relocation of the whole store under a report directory

mod atomic;
mod fs_store;
mod sharding;

pub use atomic::atomic_write;
pub use fs_store::{compute_digest, OutcomeFileStore};

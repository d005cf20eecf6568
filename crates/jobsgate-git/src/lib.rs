//! # jobsgate-git
//!
//! Base-revision snapshot retrieval for jobsgate.
//!
//! Uses `gix` (pure Rust git implementation) to read the README as it
//! exists at the configured base reference, so the rule engine can
//! reconcile the head revision against it.
//!
//! This crate isolates the `gix` dependency from the rest of the
//! workspace, so compile time impact is limited to this crate only.

mod error;
mod snapshot;

pub use error::GitError;
pub use snapshot::{discover_work_dir, read_file_at_ref};

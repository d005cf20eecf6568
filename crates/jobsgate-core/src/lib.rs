//! # jobsgate-core
//!
//! Parsing and revision reconciliation for the README jobs table.
//!
//! Two pieces, evaluated leaf-first:
//! - [`table`] locates the anchored block between the table markers,
//!   splits it into pipe-delimited rows (backslash-escaped pipes stay
//!   literal), and validates header and separator shape.
//! - [`rules`] consumes two parsed tables (base and head revisions),
//!   classifies every row from its Track cell, and applies the
//!   asymmetric rule set: system rows are immutable in identity and
//!   insertion date, community rows are fully editable but strictly
//!   formatted.
//!
//! Both tables are ephemeral: rebuilt per invocation from two text
//! snapshots and dropped once the verdict is in. Validation is
//! fail-fast — the first violated rule aborts the run.

mod error;
mod rules;
mod table;

pub use error::{ParseError, Snapshot, ValidationError};
pub use rules::{RowKind, classify, track_identifier, validate};
pub use table::{JOBS_TABLE_END, JOBS_TABLE_START, Row, Table, parse};

//! Revision source boundary for vobdiff.
//!
//! The diff engine never talks to the versioned store directly; it consumes
//! [`ChangeRecord`](vobdiff_types::ChangeRecord)s through the
//! [`RevisionSource`] trait. This crate provides that trait, the raw-record
//! parser and exclusion filter, and the production implementation backed by
//! the `cleartool` command.

pub mod cleartool;
pub mod error;
pub mod records;
pub mod traits;

pub use cleartool::{ClearTool, ViewKind};
pub use error::{SourceError, SourceResult};
pub use records::{parse_records, RecordFilter};
pub use traits::RevisionSource;

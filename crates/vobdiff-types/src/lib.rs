//! Foundation types for vobdiff.
//!
//! This crate provides the data model shared by the revision source and the
//! diff engine. Every other vobdiff crate depends on `vobdiff-types`.
//!
//! # Key Types
//!
//! - [`VersionId`] — Opaque version identifier: branch path plus leaf segment
//! - [`Ordinal`] — Comparable revision rank; in-progress edits order last
//! - [`ChangeRecord`] — One raw revision-history record per branch event
//! - [`ChangesetEntry`] — Per-path reduction result (baseline, tip, fragments)
//! - [`PatchFragment`] — Diff-shaped fragment subtracted before the final diff

pub mod changeset;
pub mod error;
pub mod version;

pub use changeset::{ChangeRecord, ChangesetEntry, PatchFragment};
pub use error::VersionError;
pub use version::{qualify, Ordinal, VersionId, CHECKEDOUT};

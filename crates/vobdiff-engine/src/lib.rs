//! Changeset reduction and diff synthesis for vobdiff.
//!
//! Takes the raw per-file revision-history records produced by a revision
//! source, collapses them to one baseline/tip pair per path, and renders
//! the result as a single binary-safe unified diff suitable for review.
//!
//! # Pipeline
//!
//! - [`reducer`] — Collapse many records per path into one [`ChangesetEntry`](vobdiff_types::ChangesetEntry)
//! - [`differ`] — Binary detection, line diffs, unified rendering
//! - [`patcher`] — Subtract merge-introduced exclusion fragments
//! - [`assembler`] — Concatenate identity-marked renderings into the final diff

pub mod assembler;
pub mod differ;
pub mod error;
pub mod lines;
pub mod patcher;
pub mod reducer;

pub use assembler::assemble;
pub use differ::{diff_addresses, DiffResult};
pub use error::{EngineError, EngineResult};
pub use lines::split_lines;
pub use patcher::apply_fragment;
pub use reducer::{reduce_branch, reduce_checkedout, ReduceOptions};

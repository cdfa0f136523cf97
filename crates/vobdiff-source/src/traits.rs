use vobdiff_types::ChangeRecord;

use crate::error::SourceResult;

/// Query interface over a branched, versioned file store.
///
/// All implementations must satisfy these invariants:
/// - Records are returned in encounter order; changeset reduction relies
///   on that order to pick baselines and break ties.
/// - Elements the store cannot read are skipped, never surfaced as errors.
/// - `object_identity` is stable: the same address maps to the same token
///   for the duration of one run.
pub trait RevisionSource {
    /// All locally checked-out files for the current user.
    ///
    /// One record per checked-out element, annotations empty.
    fn checkedout_changeset(&self) -> SourceResult<Vec<ChangeRecord>>;

    /// All versions committed on `branch` by the current user, across
    /// every VOB in the view. One record per branch event, so several may
    /// share a path.
    fn branch_changeset(&self, branch: &str) -> SourceResult<Vec<ChangeRecord>>;

    /// Stable object identity token for a qualified address, used to build
    /// the `==== <old-id> <new-id> ====` marker line.
    fn object_identity(&self, address: &str) -> SourceResult<String>;
}

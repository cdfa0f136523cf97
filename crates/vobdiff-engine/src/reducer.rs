//! Changeset reducer: collapses raw revision-history records to exactly
//! one baseline/tip pair per path.
//!
//! Checkout-set reduction is the identity. Branch-set reduction walks every
//! branch event per path, keeps the branch root's predecessor as the
//! baseline and the highest ordinal as the tip, and independently collects
//! exclusion fragments for versions carrying a merge hyperlink.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use vobdiff_types::{qualify, ChangeRecord, ChangesetEntry, Ordinal, PatchFragment, VersionId};

use crate::differ::{diff_addresses, DiffResult};
use crate::error::EngineResult;

/// Merge hyperlink marker: `"Merge@<anything>" <- "<anything>"`.
static MERGE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"Merge@.*?" <- ".*""#).unwrap());

/// Knobs for branch-set reduction.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReduceOptions {
    /// Collect exclusion fragments for versions carrying a merge
    /// hyperlink, so merge-introduced content is subtracted before the
    /// final diff.
    pub exclude_merges: bool,
}

/// Reduce a checkout-set changeset: one entry per record, addresses
/// qualified, no exclusion patches.
pub fn reduce_checkedout(records: &[ChangeRecord]) -> Vec<ChangesetEntry> {
    records
        .iter()
        .map(|record| {
            ChangesetEntry::new(
                &record.path,
                qualify(&record.path, &record.previous),
                qualify(&record.path, &record.current),
            )
        })
        .collect()
}

/// Running per-path state while walking branch events.
struct Accumulator {
    previous: VersionId,
    current: VersionId,
    highest: Ordinal,
    fragments: BTreeMap<Ordinal, PatchFragment>,
}

/// Reduce a branch-set changeset to one entry per path.
///
/// Records must arrive in encounter order. A rank-zero event marks the
/// branch root, whose predecessor is the authoritative pre-branch
/// baseline; any other event advances the tip when its ordinal reaches
/// the running highest (ties go to the record seen last). Fragments are
/// emitted ascending by the ordinal at which they were recorded.
pub fn reduce_branch(
    records: &[ChangeRecord],
    options: ReduceOptions,
) -> EngineResult<Vec<ChangesetEntry>> {
    let mut order: Vec<String> = Vec::new();
    let mut by_path: HashMap<&str, Accumulator> = HashMap::new();

    for record in records {
        let ordinal = record.current.ordinal()?;

        if !by_path.contains_key(record.path.as_str()) {
            order.push(record.path.clone());
            by_path.insert(
                record.path.as_str(),
                Accumulator {
                    previous: record.previous.clone(),
                    current: record.current.clone(),
                    highest: ordinal,
                    fragments: BTreeMap::new(),
                },
            );
        }
        let Some(acc) = by_path.get_mut(record.path.as_str()) else {
            continue;
        };

        if options.exclude_merges && has_merge_link(&record.annotations) {
            if let Some(fragment) = exclusion_fragment(record) {
                acc.fragments.insert(ordinal, fragment);
            }
        }

        if ordinal.is_branch_root() {
            // The branch was created at this event, so the root's
            // predecessor supersedes whatever an earlier record seeded.
            acc.previous = record.previous.clone();
        } else if ordinal >= acc.highest {
            acc.highest = ordinal;
            acc.current = record.current.clone();
        }
    }

    let mut entries = Vec::with_capacity(order.len());
    for path in order {
        let Some(acc) = by_path.remove(path.as_str()) else {
            continue;
        };
        let mut entry = ChangesetEntry::new(
            &path,
            qualify(&path, &acc.previous),
            qualify(&path, &acc.current),
        );
        entry.exclusion_patches = acc.fragments.into_values().collect();
        debug!(
            path = %entry.path,
            previous = %entry.previous,
            current = %entry.current,
            fragments = entry.exclusion_patches.len(),
            "reduced changeset entry"
        );
        entries.push(entry);
    }

    Ok(entries)
}

fn has_merge_link(annotations: &[String]) -> bool {
    annotations.iter().any(|a| MERGE_LINK.is_match(a))
}

/// Raw diff of a merge-carrying version against its predecessor; applying
/// it later subtracts what the merge pulled in. Binary, missing, or equal
/// content contributes nothing.
fn exclusion_fragment(record: &ChangeRecord) -> Option<PatchFragment> {
    let old = qualify(&record.path, &record.current);
    let new = qualify(&record.path, &record.previous);
    match diff_addresses(&old, &new, &[], false) {
        DiffResult::Lines(lines) => Some(PatchFragment::new(lines)),
        _ => None,
    }
}

//! Change records and reduced changeset entries.
//!
//! A [`ChangeRecord`] is one raw revision-history event as reported by the
//! revision source; several may exist per path. A [`ChangesetEntry`] is the
//! per-path reduction: exactly one baseline/tip pair, plus the exclusion
//! fragments collected along the way.

use serde::{Deserialize, Serialize};

use crate::version::VersionId;

/// One raw revision-history record from the revision source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Element path relative to the view root.
    pub path: String,
    /// Version preceding this event.
    pub previous: VersionId,
    /// Version produced by this event.
    pub current: VersionId,
    /// Cross-reference annotations attached to the version, e.g. merge
    /// hyperlinks. Empty for checkout-set queries.
    pub annotations: Vec<String>,
}

impl ChangeRecord {
    pub fn new(
        path: impl Into<String>,
        previous: impl Into<VersionId>,
        current: impl Into<VersionId>,
    ) -> Self {
        Self {
            path: path.into(),
            previous: previous.into(),
            current: current.into(),
            annotations: Vec::new(),
        }
    }

    /// Attach annotation strings (builder style).
    pub fn with_annotations(mut self, annotations: Vec<String>) -> Self {
        self.annotations = annotations;
        self
    }
}

/// Per-path reduction result: the lowest and highest version of the
/// element, both fully qualified as extended names.
///
/// Invariant: after reduction exactly one entry exists per distinct path,
/// and `exclusion_patches` is ordered ascending by the ordinal at which
/// each fragment was recorded (oldest merge first).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangesetEntry {
    /// Element path relative to the view root.
    pub path: String,
    /// Extended name of the baseline revision.
    pub previous: String,
    /// Extended name of the tip revision (bare path when checked out).
    pub current: String,
    /// Fragments to subtract from the tip before diffing.
    pub exclusion_patches: Vec<PatchFragment>,
}

impl ChangesetEntry {
    pub fn new(
        path: impl Into<String>,
        previous: impl Into<String>,
        current: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            previous: previous.into(),
            current: current.into(),
            exclusion_patches: Vec::new(),
        }
    }
}

/// A diff-shaped text fragment to be subtracted from file content before
/// the reviewable diff is computed.
///
/// Lines carry no endings; a trailing empty element encodes a final
/// newline, mirroring the content convention used by the diff engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchFragment {
    pub lines: Vec<String>,
}

impl PatchFragment {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Returns `true` when the fragment carries no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The fragment as a single newline-joined string.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_builder_attaches_annotations() {
        let record = ChangeRecord::new("foo.c", "/main/1", "/main/2")
            .with_annotations(vec!["Merge@/vobs/proj".to_string()]);
        assert_eq!(record.annotations.len(), 1);
        assert_eq!(record.previous.as_str(), "/main/1");
    }

    #[test]
    fn fragment_text_joins_without_trailing_separator() {
        let fragment = PatchFragment::new(vec!["a".into(), "b".into()]);
        assert_eq!(fragment.text(), "a\nb");
    }

    #[test]
    fn fragment_trailing_empty_element_encodes_final_newline() {
        let fragment = PatchFragment::new(vec!["a".into(), String::new()]);
        assert_eq!(fragment.text(), "a\n");
    }
}

//! Diff assembler: renders reduced changeset entries into the final
//! review-ready diff text.
//!
//! Every rendering is prefixed with an identity marker line pairing the
//! stable object identities of the old and new addresses, so the receiving
//! review system can map diff entries back to repository objects.

use tracing::debug;

use vobdiff_source::RevisionSource;
use vobdiff_types::ChangesetEntry;

use crate::differ::{diff_addresses, DiffResult};
use crate::error::EngineResult;

#[cfg(windows)]
const LINE_SEP: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEP: &str = "\n";

/// Generate the full unified diff for a reduced changeset, in input order.
///
/// The second tuple slot is a parent diff, always `None`: the store has no
/// notion of parent/base diffs.
pub fn assemble(
    source: &dyn RevisionSource,
    entries: &[ChangesetEntry],
) -> EngineResult<(String, Option<String>)> {
    let mut diff = String::new();

    for entry in entries {
        let old_id = source.object_identity(&entry.previous)?;
        let new_id = source.object_identity(&entry.current)?;
        let marker = format!("==== {old_id} {new_id} ====");

        let lines = match diff_addresses(
            &entry.previous,
            &entry.current,
            &entry.exclusion_patches,
            true,
        ) {
            DiffResult::Binary => vec![
                marker,
                format!(
                    "Binary files {} and {} differ",
                    entry.previous, entry.current
                ),
                String::new(),
            ],
            DiffResult::Empty | DiffResult::Missing => vec![
                marker,
                format!("File {} in your changeset is unmodified", entry.current),
                String::new(),
            ],
            DiffResult::Lines(mut lines) => {
                // The marker sits between the header pair and the hunks.
                lines.insert(2, marker);
                lines
            }
        };

        debug!(path = %entry.path, lines = lines.len(), "assembled diff entry");
        diff.push_str(&lines.join(LINE_SEP));
    }

    Ok((diff, None))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use regex::Regex;

    use vobdiff_source::{RecordFilter, RevisionSource, SourceResult};
    use vobdiff_types::ChangeRecord;

    use crate::reducer::reduce_checkedout;

    use super::*;

    /// Identity tokens derived from the address itself; stable per run.
    struct StubSource;

    impl RevisionSource for StubSource {
        fn checkedout_changeset(&self) -> SourceResult<Vec<ChangeRecord>> {
            Ok(Vec::new())
        }

        fn branch_changeset(&self, _branch: &str) -> SourceResult<Vec<ChangeRecord>> {
            Ok(Vec::new())
        }

        fn object_identity(&self, address: &str) -> SourceResult<String> {
            Ok(format!("{:08x}", crc32fast::hash(address.as_bytes())))
        }
    }

    fn write(dir: &TempDir, name: &str, content: &[u8]) -> String {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn entry(old: &str, new: &str) -> ChangesetEntry {
        ChangesetEntry::new(new, old, new)
    }

    #[test]
    fn modified_text_file_renders_one_marked_hunk() {
        let dir = TempDir::new().unwrap();
        let old = write(&dir, "old", b"a\nb\n");
        let new = write(&dir, "new", b"a\nc\n");

        let (diff, parent) = assemble(&StubSource, &[entry(&old, &new)]).unwrap();
        assert!(parent.is_none());

        let lines: Vec<&str> = diff.lines().collect();
        assert!(lines[0].starts_with("--- "));
        assert!(lines[1].starts_with("+++ "));
        assert!(lines[2].starts_with("==== ") && lines[2].ends_with(" ===="));
        assert!(lines[3].starts_with("@@"));
        assert_eq!(diff.matches("==== ").count(), 1);
        assert!(!diff.contains("Binary files"));
        assert!(!diff.contains("is unmodified"));
    }

    #[test]
    fn differing_binary_files_render_marker_line() {
        let dir = TempDir::new().unwrap();
        let old = write(&dir, "old", b"\x00old");
        let new = write(&dir, "new", b"\x00new");

        let (diff, _) = assemble(&StubSource, &[entry(&old, &new)]).unwrap();
        assert!(diff.contains(&format!("Binary files {old} and {new} differ")));
    }

    #[test]
    fn unmodified_file_renders_placeholder() {
        let dir = TempDir::new().unwrap();
        let old = write(&dir, "old", b"same\n");
        let new = write(&dir, "new", b"same\n");

        let (diff, _) = assemble(&StubSource, &[entry(&old, &new)]).unwrap();
        assert!(diff.contains(&format!("File {new} in your changeset is unmodified")));
    }

    #[test]
    fn missing_file_degrades_to_placeholder() {
        let dir = TempDir::new().unwrap();
        let old = write(&dir, "old", b"a\n");
        let new = dir.path().join("absent").to_string_lossy().into_owned();

        let (diff, _) = assemble(&StubSource, &[entry(&old, &new)]).unwrap();
        assert!(diff.contains("is unmodified"));
    }

    #[test]
    fn entries_concatenate_in_input_order() {
        let dir = TempDir::new().unwrap();
        let old_a = write(&dir, "old_a", b"a\n");
        let new_a = write(&dir, "new_a", b"A\n");
        let old_b = write(&dir, "old_b", b"b\n");
        let new_b = write(&dir, "new_b", b"B\n");

        let entries = [entry(&old_a, &new_a), entry(&old_b, &new_b)];
        let (diff, _) = assemble(&StubSource, &entries).unwrap();

        let first = diff.find("+A").unwrap();
        let second = diff.find("+B").unwrap();
        assert!(first < second);
        assert_eq!(diff.matches("==== ").count(), 2);
    }

    #[test]
    fn excluded_path_never_reaches_the_diff() {
        // Full checkout-set pipeline: filter, reduce, assemble.
        let dir = TempDir::new().unwrap();
        write(&dir, "keep.c@@/main/1", b"a\nb\n");
        let keep = write(&dir, "keep.c", b"a\nc\n");
        write(&dir, "skip.obj@@/main/1", b"x\n");
        let skip = write(&dir, "skip.obj", b"y\n");

        let records = vec![
            ChangeRecord::new(&keep, "/main/1", "/main/CHECKEDOUT"),
            ChangeRecord::new(&skip, "/main/1", "/main/CHECKEDOUT"),
        ];
        let filter = RecordFilter::new(Some(Regex::new(r"\.obj$").unwrap()));
        let entries = reduce_checkedout(&filter.apply(records));
        let (diff, _) = assemble(&StubSource, &entries).unwrap();

        assert!(diff.contains("+c"));
        assert_eq!(diff.matches("==== ").count(), 1);
        assert!(!diff.contains("skip.obj"));
    }

    #[test]
    fn empty_changeset_produces_empty_diff() {
        let (diff, parent) = assemble(&StubSource, &[]).unwrap();
        assert!(diff.is_empty());
        assert!(parent.is_none());
    }
}

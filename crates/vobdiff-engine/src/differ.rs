//! Content differ: binary detection, line diffs, unified rendering.
//!
//! Addresses are extended names resolved through the view's filesystem, so
//! reading a specific revision is a plain file read. Diffs are computed
//! in-process with the `similar` crate (Myers algorithm).

use std::fs;
use std::path::Path;

use similar::TextDiff;
use tracing::debug;

use vobdiff_types::PatchFragment;

use crate::lines::split_lines;
use crate::patcher::apply_fragment;

/// Outcome of diffing one changeset entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffResult {
    /// Both contents are binary and their checksums differ; no diff text
    /// is ever produced for binary content.
    Binary,
    /// The contents compare equal.
    Empty,
    /// The new address is unreadable; no content available. Recoverable:
    /// the assembler degrades this to a placeholder entry.
    Missing,
    /// A textual diff, one element per line, trailing-element convention.
    Lines(Vec<String>),
}

/// Diff two addressed revisions of one element.
///
/// Directories diff as their sorted listings. Exclusion `patches` arrive
/// oldest-first and are applied newest-first to the new content before the
/// diff is computed. `unified` selects reviewable output with rewritten
/// `---`/`+++` headers; without it the output is a raw patch fragment for
/// the exclusion pipeline.
pub fn diff_addresses(
    old: &str,
    new: &str,
    patches: &[PatchFragment],
    unified: bool,
) -> DiffResult {
    let (old_lines, mut new_lines) = match read_contents(old, new) {
        Contents::Text(old_lines, new_lines) => (old_lines, new_lines),
        Contents::Binary { old_crc, new_crc } => {
            return if old_crc == new_crc {
                DiffResult::Empty
            } else {
                DiffResult::Binary
            };
        }
        Contents::Missing => return DiffResult::Missing,
    };

    // Fragments were captured against the evolving tip, so each one must
    // be subtracted from content still containing everything recorded
    // after it: newest first.
    for fragment in patches.iter().rev() {
        new_lines = apply_fragment(new_lines, fragment);
    }

    if unified {
        unified_diff(&old_lines, &new_lines, old, new)
    } else {
        fragment_diff(&old_lines, &new_lines)
    }
}

enum Contents {
    Text(Vec<String>, Vec<String>),
    Binary { old_crc: u32, new_crc: u32 },
    Missing,
}

fn read_contents(old: &str, new: &str) -> Contents {
    let new_path = Path::new(new);

    if new_path.is_dir() {
        match (read_listing(old), read_listing(new)) {
            (Some(old_names), Some(new_names)) => return Contents::Text(old_names, new_names),
            _ => return Contents::Missing,
        }
    }

    if !new_path.exists() {
        debug!(path = %new, "file does not exist or access is denied");
        return Contents::Missing;
    }

    let old_bytes = match fs::read(old) {
        Ok(bytes) => bytes,
        Err(error) => {
            debug!(path = %old, %error, "baseline revision unreadable");
            return Contents::Missing;
        }
    };
    let new_bytes = match fs::read(new) {
        Ok(bytes) => bytes,
        Err(error) => {
            debug!(path = %new, %error, "tip revision unreadable");
            return Contents::Missing;
        }
    };

    let old_crc = crc32fast::hash(&old_bytes);
    let new_crc = crc32fast::hash(&new_bytes);

    if is_binary(&old_bytes) || is_binary(&new_bytes) {
        return Contents::Binary { old_crc, new_crc };
    }

    // Line diffing works on UTF-8 strings; NUL-free content that does not
    // decode cannot round-trip through it without corrupting its bytes,
    // so such content is compared by checksum like binary content.
    match (String::from_utf8(old_bytes), String::from_utf8(new_bytes)) {
        (Ok(old_text), Ok(new_text)) => {
            Contents::Text(split_lines(&old_text), split_lines(&new_text))
        }
        _ => Contents::Binary { old_crc, new_crc },
    }
}

/// Sorted directory listing plus a trailing empty element, so the listing
/// diffs like newline-terminated text.
fn read_listing(path: &str) -> Option<Vec<String>> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(error) => {
            debug!(path = %path, %error, "directory unreadable");
            return None;
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names.push(String::new());
    Some(names)
}

fn is_binary(bytes: &[u8]) -> bool {
    bytes.contains(&0)
}

/// Zero-context unified diff with `--- <old>\t` / `+++ <new>\t` headers
/// carrying the caller's logical names.
fn unified_diff(
    old_lines: &[String],
    new_lines: &[String],
    old_name: &str,
    new_name: &str,
) -> DiffResult {
    let old_text = old_lines.join("\n");
    let new_text = new_lines.join("\n");

    let diff = TextDiff::from_lines(&old_text, &new_text);
    let mut rendered = String::new();
    for hunk in diff.unified_diff().context_radius(0).iter_hunks() {
        rendered.push_str(&hunk.to_string());
    }

    if rendered.is_empty() {
        return DiffResult::Empty;
    }

    let mut lines = vec![format!("--- {old_name}\t"), format!("+++ {new_name}\t")];
    lines.extend(split_lines(&rendered));
    DiffResult::Lines(lines)
}

/// Headerless-mode output: a parseable patch fragment for the exclusion
/// pipeline, never shown to reviewers.
fn fragment_diff(old_lines: &[String], new_lines: &[String]) -> DiffResult {
    let old_text = old_lines.join("\n");
    let new_text = new_lines.join("\n");

    if old_text == new_text {
        return DiffResult::Empty;
    }

    let patch = diffy::create_patch(&old_text, &new_text).to_string();
    DiffResult::Lines(split_lines(&patch))
}

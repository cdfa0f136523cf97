//! Patch applicator: subtracts exclusion fragments from file content.
//!
//! Fragments are produced by the reducer for merge-carrying versions and
//! applied in-process with `diffy` before the reviewable diff is computed.

use diffy::Patch;
use tracing::debug;

use vobdiff_types::PatchFragment;

use crate::lines::split_lines;

/// Apply one exclusion fragment to `content`, returning the patched lines.
///
/// Application is advisory: a fragment that no longer parses or applies
/// cleanly is logged and skipped, and the content comes back unchanged, so
/// diff generation always proceeds. The trailing-newline convention of
/// [`split_lines`] is preserved.
pub fn apply_fragment(content: Vec<String>, fragment: &PatchFragment) -> Vec<String> {
    let text = fragment.text();
    let patch = match Patch::from_str(&text) {
        Ok(patch) => patch,
        Err(error) => {
            debug!(%error, "unparseable exclusion fragment; skipping");
            return content;
        }
    };

    let base = content.join("\n");
    match diffy::apply(&base, &patch) {
        Ok(patched) => split_lines(&patched),
        Err(error) => {
            debug!(%error, "exclusion fragment failed to apply; keeping content");
            content
        }
    }
}

//! Version identifiers and their comparable ordinals.
//!
//! A version identifier names one revision of a file element on one branch,
//! e.g. `/main/topic/3`. The leaf segment is either an integer rank or the
//! `CHECKEDOUT` sentinel marking an in-progress edit, which always orders
//! after every committed revision.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VersionError;

/// Leaf segment marking a checked-out, not-yet-committed revision.
pub const CHECKEDOUT: &str = "CHECKEDOUT";

/// An opaque version identifier: a branch path plus a leaf segment.
///
/// Identifiers are only comparable within the same file element; the
/// comparison itself goes through [`Ordinal`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionId(String);

impl VersionId {
    /// Wrap a raw identifier string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty identifier (no previous version,
    /// e.g. a freshly created element).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if this identifier denotes an in-progress edit.
    pub fn is_checkedout(&self) -> bool {
        self.0.ends_with(CHECKEDOUT)
    }

    /// Split the identifier into its branch path and leaf segment.
    ///
    /// Both `/` and `\` separate segments, since extended names coming out
    /// of a Windows view use backslashes.
    pub fn split(&self) -> Result<(&str, &str), VersionError> {
        match self.0.rfind(['/', '\\']) {
            Some(idx) => Ok((&self.0[..idx], &self.0[idx + 1..])),
            None => Err(VersionError::Malformed(self.0.clone())),
        }
    }

    /// The branch path portion of the identifier.
    pub fn branch(&self) -> Result<&str, VersionError> {
        self.split().map(|(branch, _)| branch)
    }

    /// The comparable rank of this revision on its branch.
    pub fn ordinal(&self) -> Result<Ordinal, VersionError> {
        let (_, leaf) = self.split()?;
        if leaf == CHECKEDOUT {
            return Ok(Ordinal::InProgress);
        }
        leaf.parse::<u64>()
            .map(Ordinal::Committed)
            .map_err(|_| VersionError::InvalidOrdinal {
                version: self.0.clone(),
                leaf: leaf.to_string(),
            })
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VersionId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for VersionId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Comparable rank of a revision on its branch.
///
/// `InProgress` orders after every committed rank, so an edit still
/// checked out is always treated as the newest state of the element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ordinal {
    /// A committed revision with an integer rank.
    Committed(u64),
    /// A checked-out edit; greater than any committed rank.
    InProgress,
}

impl Ordinal {
    /// Returns `true` for the rank-zero revision that starts a branch.
    pub fn is_branch_root(&self) -> bool {
        matches!(self, Ordinal::Committed(0))
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ordinal::Committed(n) => write!(f, "{n}"),
            Ordinal::InProgress => write!(f, "{CHECKEDOUT}"),
        }
    }
}

/// Reattach a version suffix to a base path, producing an extended name
/// addressing one specific revision.
///
/// A checked-out revision has no stable identity in the store, so it is
/// only addressable by its bare path; the same applies when there is no
/// version at all.
pub fn qualify(path: &str, version: &VersionId) -> String {
    if version.is_empty() || version.is_checkedout() {
        path.to_string()
    } else {
        format!("{path}@@{version}")
    }
}

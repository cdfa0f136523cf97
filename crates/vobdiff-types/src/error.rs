use thiserror::Error;

/// Errors produced by version-identifier operations.
///
/// Both variants indicate a corrupted or unexpected revision-source
/// response, not a recoverable condition: callers are expected to abort
/// the run rather than skip the offending record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The identifier has no separable version segment.
    #[error("malformed version identifier: {0:?}")]
    Malformed(String),

    /// The leaf segment is neither numeric nor the checked-out sentinel.
    #[error("invalid ordinal segment {leaf:?} in version {version:?}")]
    InvalidOrdinal { version: String, leaf: String },
}

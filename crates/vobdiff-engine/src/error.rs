use thiserror::Error;

use vobdiff_source::SourceError;
use vobdiff_types::VersionError;

/// Errors from changeset reduction and diff assembly.
///
/// Both variants are fatal to the whole run: a version identifier that
/// does not parse means the revision source returned something corrupted,
/// and a source failure means the store itself is unusable. Per-file
/// missing-content conditions never reach this type; the differ degrades
/// them to placeholder entries instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A version identifier from the revision source could not be parsed.
    #[error(transparent)]
    Version(#[from] VersionError),

    /// The revision source failed a query.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

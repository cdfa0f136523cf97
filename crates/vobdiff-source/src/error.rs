/// Errors from revision source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A required external tool is not installed or not on the path.
    #[error("required tool not installed: {0}")]
    ToolMissing(String),

    /// The working directory is not inside a view.
    #[error("not inside a view; run vobdiff from within a view")]
    NotInView,

    /// The current view configuration cannot be used for diff generation.
    #[error("unsupported view type: {0}; use a dynamic or snapshot view")]
    UnsupportedView(String),

    /// An external command exited with an unexpected status.
    #[error("command failed with exit code {code}: {command}\n{stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// A change record did not carry the expected tab-separated fields.
    #[error("malformed change record: {0:?}")]
    MalformedRecord(String),

    /// I/O failure while invoking an external command.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for revision source operations.
pub type SourceResult<T> = Result<T, SourceError>;

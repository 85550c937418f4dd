//! Error types for gitja-core.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gitja-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A user-supplied ref does not resolve to a commit.
    #[error("ref {0} doesn't seem to be valid")]
    InvalidRef(String),

    /// Fewer than two refs to compare.
    #[error("not enough references to generate tree (got {found}, need at least 2)")]
    InsufficientRefs {
        /// Distinct refs available after expansion.
        found: usize,
    },

    /// A required positional argument was not given.
    #[error("{0}")]
    MissingArgument(&'static str),

    /// A ref given to prune is not a remote branch.
    #[error("{0} is not a remote branch")]
    NotARemoteBranch(String),

    /// The working tree has uncommitted changes.
    #[error("your working space is dirty - commit all changes first")]
    DirtyWorkingTree,

    /// Config file could not be parsed.
    #[error("failed to parse {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Git operation error.
    #[error(transparent)]
    Git(#[from] gitja_git::Error),
}

impl Error {
    /// Exit code of the failing git command, if this error carries one.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Git(err) => err.exit_code(),
            _ => None,
        }
    }
}

//! Error types for gitja-git.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying or mutating a repository.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not inside a git repository.
    #[error("not a git repository")]
    NotARepository,

    /// A git command exited with a non-zero status.
    ///
    /// `code` is `None` when the process was killed by a signal.
    #[error("while executing [{command}]:\n{diagnostic}")]
    ExternalCommand {
        /// The full command line, e.g. `git push origin main:main`.
        command: String,
        /// Exit status reported by git.
        code: Option<i32>,
        /// Captured stderr, or stdout when stderr was empty.
        diagnostic: String,
    },

    /// The git binary could not be started.
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// A ref does not resolve to a commit.
    #[error("ref {0} doesn't seem to be valid")]
    InvalidRef(String),

    /// The given refs share no common ancestor.
    #[error("no common history between {}", .0.join(", "))]
    NoCommonHistory(Vec<String>),

    /// HEAD is detached (not on a branch).
    #[error("HEAD is detached - checkout a branch first")]
    DetachedHead,

    /// A merge-base was requested for an empty ref list.
    #[error("merge-base needs at least one ref")]
    EmptyRefList,
}

impl Error {
    /// Exit code of the failing git command, if this error carries one.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ExternalCommand { code, .. } => *code,
            _ => None,
        }
    }
}

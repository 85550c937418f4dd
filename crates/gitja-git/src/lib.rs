//! # gitja-git
//!
//! Git query layer for git-ja. Every question about the repository is
//! answered by running the `git` binary and parsing its textual output;
//! nothing here reads the object store directly.
//!
//! The [`RefQuery`] trait covers read-only questions and [`GitOps`] adds
//! the mutations (push, delete, unset upstream...). [`Repository`] is the
//! implementation backed by a [`CommandRunner`].

mod error;
pub mod parse;
mod repository;
mod runner;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod traits;
mod types;

pub use error::{Error, Result};
pub use parse::SyncState;
pub use repository::Repository;
pub use runner::{CommandRunner, GitRunner};
pub use traits::{GitOps, LogOrder, RefQuery, Scope};
pub use types::{CommitId, RefName};

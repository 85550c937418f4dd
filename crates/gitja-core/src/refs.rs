//! Selection of the refs a command operates on.

use gitja_git::{RefName, RefQuery};

use crate::error::{Error, Result};

/// Placeholder argument that expands to every local branch.
pub const ALL: &str = "ALL";

/// What to use when no refs are given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRefs {
    /// Every local branch.
    AllLocal,
    /// Only the current branch.
    Current,
    /// Nothing.
    Empty,
}

/// Turn command-line ref arguments into validated refs.
///
/// `ALL` is replaced by every local branch not already listed. Every
/// explicitly named ref must resolve to a commit.
///
/// # Errors
/// Returns [`Error::InvalidRef`] for the first ref that doesn't resolve, or
/// a git error if listing branches fails.
pub fn select<G: RefQuery>(repo: &G, args: &[String], default: DefaultRefs) -> Result<Vec<RefName>> {
    if args.is_empty() {
        return match default {
            DefaultRefs::AllLocal => Ok(repo.local_branches()?.into_iter().collect()),
            DefaultRefs::Current => Ok(vec![repo.current_branch()?]),
            DefaultRefs::Empty => Ok(Vec::new()),
        };
    }

    let mut refs: Vec<RefName> = Vec::with_capacity(args.len());
    let mut expand_all = false;
    for arg in args {
        if arg == ALL {
            expand_all = true;
            continue;
        }
        let name = RefName::new(arg);
        if !repo.ref_exists(&name) {
            return Err(Error::InvalidRef(name.into_inner()));
        }
        if !refs.contains(&name) {
            refs.push(name);
        }
    }

    if expand_all {
        for local in repo.local_branches()? {
            if !refs.contains(&local) {
                refs.push(local);
            }
        }
    }

    Ok(refs)
}

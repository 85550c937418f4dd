//! `git-ja remotes` command - list remotes and show their details.

use anyhow::Result;
use gitja_git::{GitOps, RefQuery};

use super::utils::Session;
use crate::output;

/// Run the remotes command. Running shy skips contacting the remotes.
pub fn run(session: &Session) -> Result<()> {
    let remotes = session.repo.remotes()?;
    output::info(&format!("{} remotes: {}", remotes.len(), remotes.join(", ")));

    for remote in &remotes {
        output::detail(&session.repo.remote_show(remote, session.options.shy)?);
    }
    Ok(())
}

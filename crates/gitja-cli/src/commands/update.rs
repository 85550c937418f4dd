//! `git-ja update` command - update every remote.

use anyhow::Result;
use gitja_git::GitOps;

use super::utils::Session;
use crate::output;

/// Run the update command.
pub fn run(session: &Session) -> Result<()> {
    print_report(&session.repo.remote_update()?);
    Ok(())
}

/// Print the output of a remote update.
pub fn print_report(report: &str) {
    output::info("Updating remotes...");
    if !report.is_empty() {
        output::detail(report);
    }
}

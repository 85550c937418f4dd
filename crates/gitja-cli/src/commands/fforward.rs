//! `git-ja fforward` command - fast-forward branches to their upstream.

use anyhow::Result;
use gitja_core::refs::DefaultRefs;

use super::update;
use super::utils::Session;
use crate::output;
use crate::services::ForwardService;

/// Run the fforward command.
pub fn run(session: &Session, refs: &[String]) -> Result<()> {
    let service = ForwardService::new(&session.repo, &session.options);
    service.ensure_clean()?;

    if let Some(report) = service.refresh()? {
        update::print_report(&report);
    }

    let branches = session.refs(refs, DefaultRefs::AllLocal)?;
    let outcome = service.forward(&branches)?;

    for (branch, upstream) in &outcome.diverged {
        output::warn(&format!("{branch} and {upstream} have diverged, need a manual merge"));
    }
    for (branch, upstream) in &outcome.forwarded {
        output::success(&format!("Fast forwarded {branch} to {upstream}"));
    }
    if let Some(branch) = &outcome.restored {
        output::info(&format!("Reverted to working branch {branch}"));
    }
    if outcome.forwarded.is_empty() && outcome.diverged.is_empty() {
        output::info("Nothing to fast forward");
    }
    Ok(())
}

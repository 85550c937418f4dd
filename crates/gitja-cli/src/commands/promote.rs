//! `git-ja promote` command - push branches to their remote.

use anyhow::{Context, Result};
use gitja_core::refs::DefaultRefs;

use super::utils::{Session, join};
use crate::output;
use crate::services::{PromoteRequest, PromoteService};

/// Run the promote command.
pub fn run(session: &Session, branches: &[String], request: &PromoteRequest) -> Result<()> {
    let service = PromoteService::new(&session.repo, &session.options, session.default_remote());
    service.ensure_clean(request)?;

    let branches = session.refs(branches, DefaultRefs::Current)?;
    for branch in &branches {
        let target = service.target(branch, request)?;
        output::info(&format!("Promoting {branch} to {target}"));
        service
            .push(branch, &target, request)
            .with_context(|| format!("Cannot push {branch} to {target}"))?;
    }

    output::success(&format!("Sent {}", join(&branches)));
    Ok(())
}

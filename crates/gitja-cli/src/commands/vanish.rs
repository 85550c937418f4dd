//! `git-ja vanish` command - remove branches locally and from their remote.

use anyhow::Result;

use super::utils::Session;
use crate::output;
use crate::services::vanish::{VanishService, require_branches};

/// Run the vanish command.
pub fn run(session: &Session, branches: &[String], remote: Option<&str>, force: bool) -> Result<()> {
    require_branches(branches)?;
    let service = VanishService::new(&session.repo, &session.options, session.default_remote());

    for branch in branches {
        let target = service.target(branch, remote)?;
        output::info(&format!("Removing {branch} and {target}"));
        service.vanish(branch, &target, force)?;
    }

    output::success("Done");
    Ok(())
}

//! `git-ja show-tracking` command - list local branches and their live upstream.

use anyhow::Result;
use gitja_core::TrackingResolver;
use gitja_git::{RefQuery, Scope};
use tracing::debug;

use super::utils::Session;
use crate::output;

/// Run the show-tracking command.
pub fn run(session: &Session, current: bool, json: bool) -> Result<()> {
    debug!("Showing tracking branches");
    let tracking = TrackingResolver::new(&session.repo, &session.options).resolve(Scope::All)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tracking)?);
        return Ok(());
    }

    if tracking.is_empty() {
        output::warn("No branch is tracking a remote branch");
        return Ok(());
    }

    let current_branch = if current {
        Some(session.repo.current_branch()?)
    } else {
        None
    };
    for line in output::tracking_lines(&tracking, current_branch.as_deref()) {
        output::detail(&line);
    }
    Ok(())
}

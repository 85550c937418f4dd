//! `git-ja status` command - compare refs with their remote counterparts.

use anyhow::Result;
use gitja_core::refs::DefaultRefs;
use gitja_core::{Status, StatusInspector};
use gitja_git::LogOrder;

use super::divergence;
use super::utils::{Session, join};
use crate::output;

/// Run the status command.
pub fn run(session: &Session, refs: &[String]) -> Result<()> {
    let refs = session.refs(refs, DefaultRefs::Current)?;
    let order = if session.config.divergence.topo_order {
        LogOrder::Topo
    } else {
        LogOrder::Date
    };

    for status in StatusInspector::new(&session.repo, &session.options).inspect(&refs, order)? {
        match status {
            Status::Lonely(reference) => {
                output::warn(&format!("{reference} has no remote tracked nor homonym branches"));
            }
            Status::Compared {
                group,
                divergence: result,
            } => {
                output::info(&format!(
                    "Showing divergence for {} with {}",
                    group.reference,
                    join(&group.counterparts())
                ));
                divergence::print(&result);
            }
        }
    }
    Ok(())
}

//! `git-ja prune` command - delete remote branches that have no local branch.

use anyhow::{Context, Result};
use inquire::Confirm;

use super::update;
use super::utils::Session;
use crate::output;
use crate::services::PruneService;

/// Run the prune command.
pub fn run(session: &Session, refs: &[String], yes: bool) -> Result<()> {
    let service = PruneService::new(&session.repo, &session.options, session.default_remote());

    if let Some(report) = service.refresh()? {
        update::print_report(&report);
    }

    let mut plan = service.plan(refs)?;
    if plan.automatic && !yes {
        let mut kept = Vec::with_capacity(plan.targets.len());
        for target in plan.targets {
            let question = format!("{} does not exist locally. Prune {target}?", target.branch);
            if confirm(&question)? {
                kept.push(target);
            }
        }
        plan.targets = kept;
    }

    if plan.is_empty() {
        output::info("No remote branches found to be pruned");
        return Ok(());
    }

    let names: Vec<String> = plan.targets.iter().map(ToString::to_string).collect();
    if !yes && !confirm(&format!("About to prune {}. Is it OK?", names.join(", ")))? {
        output::warn("Prune aborted");
        return Ok(());
    }

    for target in &plan.targets {
        output::info(&format!("Pruning {target}"));
        if !service.prune(target)? {
            output::warn("Skipping prune due to shy mode");
        }
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    Confirm::new(question)
        .with_default(true)
        .prompt()
        .context("Confirmation cancelled")
}

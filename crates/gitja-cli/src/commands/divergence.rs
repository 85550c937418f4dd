//! `git-ja divergence` command - graph where refs split and what each added.

use anyhow::Result;
use gitja_core::refs::DefaultRefs;
use gitja_core::{Divergence, DivergenceGrapher, DivergenceRequest};
use gitja_git::LogOrder;

use super::utils::Session;
use crate::output;

/// Run the divergence command.
pub fn run(session: &Session, refs: &[String], include_upstream: bool, topo_order: bool) -> Result<()> {
    let refs = session.refs(refs, DefaultRefs::AllLocal)?;
    // A lone ref is compared with its upstream.
    let include_upstream = include_upstream || refs.len() == 1;

    let order = if topo_order || session.config.divergence.topo_order {
        LogOrder::Topo
    } else {
        LogOrder::Date
    };

    let request = DivergenceRequest {
        refs,
        include_upstream,
        order,
    };
    let divergence = DivergenceGrapher::new(&session.repo, &session.options).run(&request)?;
    print(&divergence);
    Ok(())
}

/// Print a divergence result.
pub fn print(divergence: &Divergence) {
    match divergence {
        Divergence::Graph { graph, .. } => output::detail(graph),
        Divergence::NoHistory { base_name, .. } => {
            output::warn(&format!("There is no history between the given refs since {base_name}"));
        }
    }
}

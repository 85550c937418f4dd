//! Divergence graphs: where a set of refs split and what each added since.
//!
//! The graph is rooted at the octopus merge-base of the refs. A ref sitting
//! exactly on that base contributes no history of its own, so it is taken
//! out of the rendered set.

use gitja_git::{CommitId, GitOps, LogOrder, RefName, Scope};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::options::Options;
use crate::tracking::TrackingResolver;

/// What to graph.
#[derive(Debug, Clone, Default)]
pub struct DivergenceRequest {
    /// Refs to compare, in the order given by the user.
    pub refs: Vec<RefName>,
    /// Also compare each ref's live upstream.
    pub include_upstream: bool,
    /// Date (default) or topological order.
    pub order: LogOrder,
}

/// Outcome of a divergence computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    /// At least one ref has history since the base.
    Graph {
        base: CommitId,
        base_name: String,
        refs: Vec<RefName>,
        graph: String,
    },
    /// Every ref was the base itself.
    NoHistory { base: CommitId, base_name: String },
}

impl Divergence {
    /// Display name of the graph origin.
    #[must_use]
    pub fn base_name(&self) -> &str {
        match self {
            Self::Graph { base_name, .. } | Self::NoHistory { base_name, .. } => base_name,
        }
    }
}

/// Base and remaining refs, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivergencePlan {
    pub base: CommitId,
    pub base_name: String,
    /// Refs left after removing the one sitting on the base.
    pub refs: Vec<RefName>,
    /// The ref removed because it is the base, if any.
    pub root: Option<RefName>,
}

/// Computes and renders divergence graphs.
pub struct DivergenceGrapher<'a, G: GitOps> {
    repo: &'a G,
    options: &'a Options,
}

impl<'a, G: GitOps> DivergenceGrapher<'a, G> {
    /// Create a grapher.
    pub const fn new(repo: &'a G, options: &'a Options) -> Self {
        Self { repo, options }
    }

    /// Deduplicate `refs` and, when asked, append each ref's live upstream.
    ///
    /// # Errors
    /// Returns error if tracking resolution fails.
    pub fn expand(&self, refs: &[RefName], include_upstream: bool) -> Result<Vec<RefName>> {
        let mut expanded: Vec<RefName> = Vec::with_capacity(refs.len() * 2);
        for name in refs {
            if !expanded.contains(name) {
                expanded.push(name.clone());
            }
        }

        if include_upstream {
            let tracking = TrackingResolver::new(self.repo, self.options).resolve(Scope::All)?;
            let upstreams: Vec<RefName> = expanded
                .iter()
                .filter_map(|name| tracking.get(name).cloned())
                .collect();
            for upstream in upstreams {
                if !expanded.contains(&upstream) {
                    expanded.push(upstream);
                }
            }
        }

        Ok(expanded)
    }

    /// Find the base of `refs` and drop the ref sitting on it.
    ///
    /// # Errors
    /// Returns [`Error::InsufficientRefs`] with fewer than two refs (without
    /// querying git), or the merge-base failure.
    pub fn plan(&self, refs: Vec<RefName>) -> Result<DivergencePlan> {
        if refs.len() < 2 {
            return Err(Error::InsufficientRefs { found: refs.len() });
        }

        info!(
            "Generating divergence between {}",
            refs.iter()
                .map(RefName::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        );

        let base = self.repo.merge_base(&refs)?;
        let base_name = self.repo.commit_name(&base)?;
        info!("Graph origin is {base_name}");

        let mut refs = refs;
        let root = remove_root(&mut refs, &base, &base_name, |name| {
            Ok(self.repo.commit_id(name)?)
        })?;
        if let Some(root) = &root {
            debug!("{root} is the graph origin, not a divergent branch");
        }

        Ok(DivergencePlan {
            base,
            base_name,
            refs,
            root,
        })
    }

    /// Render a plan. An empty ref set reports no history and renders
    /// nothing.
    ///
    /// # Errors
    /// Returns error if the render command fails.
    pub fn render(&self, plan: DivergencePlan, order: LogOrder) -> Result<Divergence> {
        if plan.refs.is_empty() {
            return Ok(Divergence::NoHistory {
                base: plan.base,
                base_name: plan.base_name,
            });
        }

        let graph = self
            .repo
            .log_graph(&plan.base, &plan.refs, order, self.options.color)?;

        Ok(Divergence::Graph {
            base: plan.base,
            base_name: plan.base_name,
            refs: plan.refs,
            graph,
        })
    }

    /// Expand, plan and render in one go.
    ///
    /// # Errors
    /// Returns [`Error::InsufficientRefs`], merge-base failures, or a failing
    /// render command.
    pub fn run(&self, request: &DivergenceRequest) -> Result<Divergence> {
        let refs = self.expand(&request.refs, request.include_upstream)?;
        let plan = self.plan(refs)?;
        self.render(plan, request.order)
    }
}

/// Remove the first ref that *is* the base.
///
/// A ref matches when its name equals the base's display name; failing
/// that, when it points at the base commit. At most one ref is removed even
/// if several sit on the base.
///
/// # Errors
/// Returns whatever `commit_of` returns.
pub fn remove_root<F>(
    refs: &mut Vec<RefName>,
    base: &CommitId,
    base_name: &str,
    commit_of: F,
) -> Result<Option<RefName>>
where
    F: Fn(&RefName) -> Result<CommitId>,
{
    if let Some(pos) = refs.iter().position(|name| name == base_name) {
        return Ok(Some(refs.remove(pos)));
    }

    for pos in 0..refs.len() {
        if commit_of(&refs[pos])? == *base {
            return Ok(Some(refs.remove(pos)));
        }
    }

    Ok(None)
}

//! Status of a ref against its remote counterparts.
//!
//! A ref is compared with its live upstream and with every remote branch
//! carrying the same branch name on any remote ("homonyms").

use gitja_git::{GitOps, LogOrder, RefName, Scope};

use crate::divergence::{Divergence, DivergenceGrapher};
use crate::error::Result;
use crate::options::Options;
use crate::tracking::TrackingResolver;

/// A ref and the remote branches it is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusGroup {
    pub reference: RefName,
    pub upstream: Option<RefName>,
    /// Same-named branches on remotes, excluding the upstream.
    pub homonyms: Vec<RefName>,
}

impl StatusGroup {
    /// Every ref other than the inspected one, upstream first.
    #[must_use]
    pub fn counterparts(&self) -> Vec<RefName> {
        self.upstream
            .iter()
            .chain(self.homonyms.iter())
            .cloned()
            .collect()
    }

    /// Whether there is nothing to compare against.
    #[must_use]
    pub fn is_lonely(&self) -> bool {
        self.upstream.is_none() && self.homonyms.is_empty()
    }

    fn refs(&self) -> Vec<RefName> {
        let mut refs = vec![self.reference.clone()];
        refs.extend(self.counterparts());
        refs
    }
}

/// Outcome for a single ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// No upstream and no homonym.
    Lonely(RefName),
    /// Divergence against the counterparts.
    Compared {
        group: StatusGroup,
        divergence: Divergence,
    },
}

/// Builds status groups and their divergence graphs.
pub struct StatusInspector<'a, G: GitOps> {
    repo: &'a G,
    options: &'a Options,
}

impl<'a, G: GitOps> StatusInspector<'a, G> {
    pub const fn new(repo: &'a G, options: &'a Options) -> Self {
        Self { repo, options }
    }

    /// Group every ref with its upstream and homonyms.
    ///
    /// # Errors
    /// Returns error if listing refs or resolving tracking fails.
    pub fn groups(&self, refs: &[RefName]) -> Result<Vec<StatusGroup>> {
        let tracking = TrackingResolver::new(self.repo, self.options).resolve(Scope::All)?;
        let remote_branches = self.repo.remote_branches(false)?;

        Ok(refs
            .iter()
            .map(|reference| {
                let upstream = tracking.get(reference).cloned();
                let homonyms = remote_branches
                    .iter()
                    .filter(|remote| {
                        remote
                            .split_remote()
                            .is_some_and(|(_, branch)| branch == reference.as_str())
                    })
                    .filter(|remote| Some(*remote) != upstream.as_ref() && *remote != reference)
                    .cloned()
                    .collect();
                StatusGroup {
                    reference: reference.clone(),
                    upstream,
                    homonyms,
                }
            })
            .collect())
    }

    /// Inspect every ref, graphing the ones that have counterparts.
    ///
    /// # Errors
    /// Returns the first grouping, merge-base or render failure.
    pub fn inspect(&self, refs: &[RefName], order: LogOrder) -> Result<Vec<Status>> {
        let grapher = DivergenceGrapher::new(self.repo, self.options);
        let mut statuses = Vec::with_capacity(refs.len());

        for group in self.groups(refs)? {
            if group.is_lonely() {
                statuses.push(Status::Lonely(group.reference));
                continue;
            }
            let plan = grapher.plan(group.refs())?;
            let divergence = grapher.render(plan, order)?;
            statuses.push(Status::Compared { group, divergence });
        }

        Ok(statuses)
    }
}

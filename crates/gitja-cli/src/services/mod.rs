//! Service layer for the commands that change branches or remotes.
//!
//! Services take `GitOps` implementations so they can be exercised against
//! `MockGitOps`.

pub mod fforward;
pub mod promote;
pub mod prune;
pub mod vanish;

pub use fforward::ForwardService;
pub use promote::{PromoteRequest, PromoteService};
pub use prune::PruneService;
pub use vanish::VanishService;

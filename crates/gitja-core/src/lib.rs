//! # gitja-core
//!
//! Core engine for git-ja:
//!
//! - [`tracking`]: which local branch tracks which remote branch, reconciled
//!   against the remote branches that actually exist
//! - [`divergence`]: merge-base of a set of refs and the graph of what each
//!   ref added since
//! - [`refs`], [`status`], [`sync`], [`prune`], [`forward`]: ref selection
//!   and planning for the remaining subcommands
//!
//! Everything talks to git through the `gitja_git` traits and takes an
//! explicit [`Options`] value instead of reading global state.

pub mod config;
pub mod divergence;
pub mod error;
pub mod forward;
pub mod options;
pub mod prune;
pub mod refs;
pub mod status;
pub mod sync;
pub mod tracking;

pub use config::Config;
pub use divergence::{Divergence, DivergenceGrapher, DivergenceRequest};
pub use error::{Error, Result};
pub use options::Options;
pub use status::{Status, StatusGroup, StatusInspector};
pub use tracking::{RemoteTarget, TrackingMap, TrackingResolver};

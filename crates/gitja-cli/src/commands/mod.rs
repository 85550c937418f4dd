//! CLI definition and per-command entry points.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

pub mod completions;
pub mod divergence;
pub mod fforward;
pub mod promote;
pub mod prune;
pub mod remotes;
pub mod show_tracking;
pub mod status;
pub mod sync_log;
pub mod update;
pub mod utils;
pub mod vanish;

/// Git-ja utilities for gitjas.
///
/// Commands may be abbreviated to any unique prefix (`git-ja div`).
#[derive(Parser)]
#[command(name = "git-ja", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted before or after the command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable debug output.
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Update any required information (fetch remotes, drop stale upstreams).
    #[arg(short, long, global = true)]
    pub maniac: bool,

    /// Don't contact remotes.
    #[arg(short, long, global = true)]
    pub shy: bool,

    /// Run as if git-ja was started in PATH.
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send branches to a remote.
    Promote {
        /// Promote to this remote.
        #[arg(short, long)]
        remote: Option<String>,

        /// Remote branch to promote to.
        #[arg(short = 'x', long)]
        remote_branch: Option<String>,

        /// Set upstream for git push/pull.
        #[arg(short = 'u', long = "upstream")]
        set_upstream: bool,

        /// Push even with uncommitted changes.
        #[arg(long)]
        allow_dirty: bool,

        /// Branches to promote (default: current branch).
        branches: Vec<String>,
    },

    /// Show tracking branches.
    ShowTracking {
        /// Mark the current branch.
        #[arg(short, long)]
        current: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Graph the divergence tree between refs.
    Divergence {
        /// Include upstream branches in the tree.
        #[arg(short = 'r', long)]
        include_upstream: bool,

        /// Topological order instead of date order.
        #[arg(short, long)]
        topo_order: bool,

        /// Refs to compare (default: all local branches).
        refs: Vec<String>,
    },

    /// Remove branches locally and from their remote.
    Vanish {
        /// Remove from this remote.
        #[arg(short, long)]
        remote: Option<String>,

        /// Force local branch deletion.
        #[arg(short, long)]
        force: bool,

        /// Branches to remove.
        branches: Vec<String>,
    },

    /// Delete remote branches that have no local counterpart.
    Prune {
        /// Don't ask for confirmation.
        #[arg(short, long)]
        yes: bool,

        /// Remote branches to delete (default: default-remote branches
        /// missing locally).
        refs: Vec<String>,
    },

    /// Compare refs with their upstream and same-named remote branches.
    Status {
        /// Refs to inspect (default: current branch).
        refs: Vec<String>,
    },

    /// Show the commits separating branches from their upstream.
    SyncLog {
        /// Branches to inspect (default: current branch).
        refs: Vec<String>,
    },

    /// List remotes and their details.
    Remotes,

    /// Update all remotes, pruning deleted branches.
    Update,

    /// Fast-forward local branches to their upstream.
    Fforward {
        /// Branches to forward (default: all local branches).
        refs: Vec<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

//! git-ja - git utilities for gitjas.

use clap::Parser;
use clap::error::ErrorKind;
use gitja_core::Options;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod dispatch;
mod output;
mod services;

use commands::utils::Session;
use commands::{Cli, Commands};
use services::PromoteRequest;

fn main() {
    let args = match dispatch::expand(std::env::args_os().collect(), &dispatch::registry()) {
        Ok(args) => args,
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    init_tracing(cli.global.debug);
    let color = output::color_enabled();
    colored::control::set_override(color);

    let options = Options {
        maniac: cli.global.maniac,
        shy: cli.global.shy,
        color,
    };

    if let Err(e) = run(cli, options) {
        output::error(&format!("{e:#}"));
        std::process::exit(exit_code(&e));
    }
}

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn run(cli: Cli, options: Options) -> anyhow::Result<()> {
    if let Commands::Completions { shell } = cli.command {
        commands::completions::run(shell);
        return Ok(());
    }

    let session = Session::open(cli.global.directory.as_deref(), options)?;

    match cli.command {
        Commands::Promote {
            remote,
            remote_branch,
            set_upstream,
            allow_dirty,
            branches,
        } => {
            let request = PromoteRequest {
                remote,
                remote_branch,
                set_upstream,
                allow_dirty,
            };
            commands::promote::run(&session, &branches, &request)
        }
        Commands::ShowTracking { current, json } => {
            commands::show_tracking::run(&session, current, json)
        }
        Commands::Divergence {
            include_upstream,
            topo_order,
            refs,
        } => commands::divergence::run(&session, &refs, include_upstream, topo_order),
        Commands::Vanish {
            remote,
            force,
            branches,
        } => commands::vanish::run(&session, &branches, remote.as_deref(), force),
        Commands::Prune { yes, refs } => commands::prune::run(&session, &refs, yes),
        Commands::Status { refs } => commands::status::run(&session, &refs),
        Commands::SyncLog { refs } => commands::sync_log::run(&session, &refs),
        Commands::Remotes => commands::remotes::run(&session),
        Commands::Update => commands::update::run(&session),
        Commands::Fforward { refs } => commands::fforward::run(&session, &refs),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Exit with git's own code when a git command failed, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| {
            cause
                .downcast_ref::<gitja_core::Error>()
                .and_then(gitja_core::Error::exit_code)
                .or_else(|| {
                    cause
                        .downcast_ref::<gitja_git::Error>()
                        .and_then(gitja_git::Error::exit_code)
                })
        })
        .filter(|code| *code != 0)
        .unwrap_or(1)
}

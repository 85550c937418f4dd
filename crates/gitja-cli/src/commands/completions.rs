//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use super::Cli;

/// Generate shell completions and print to stdout.
pub fn run(shell: Shell) {
    generate(shell, &mut Cli::command(), "git-ja", &mut io::stdout());
}

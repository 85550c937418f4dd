//! Command-name prefix matching.
//!
//! The registry is the list of subcommands clap knows about. A command may
//! be abbreviated to any prefix that identifies it uniquely.

use std::ffi::OsString;

use clap::CommandFactory;

use crate::commands::Cli;

/// Errors raised before a command runs.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("unknown command {0}")]
    UnknownCommand(String),

    #[error("ambiguous command {query}. Which one of {} is it?", .candidates.join(", "))]
    AmbiguousCommand {
        query: String,
        candidates: Vec<String>,
    },
}

/// Names of every registered command, plus clap's `help`.
pub fn registry() -> Vec<String> {
    let mut names: Vec<String> = Cli::command()
        .get_subcommands()
        .map(|cmd| cmd.get_name().to_string())
        .collect();
    if !names.iter().any(|name| name == "help") {
        names.push("help".to_string());
    }
    names
}

/// Resolve `query` against `names`.
///
/// An exact match wins. Otherwise the query must be a prefix of exactly one
/// name.
pub fn resolve<'a>(query: &str, names: &'a [String]) -> Result<&'a str, DispatchError> {
    if let Some(exact) = names.iter().find(|name| *name == query) {
        return Ok(exact.as_str());
    }

    let candidates: Vec<&String> = names.iter().filter(|name| name.starts_with(query)).collect();
    match candidates.as_slice() {
        [only] => Ok(only.as_str()),
        [] => Err(DispatchError::UnknownCommand(query.to_string())),
        _ => Err(DispatchError::AmbiguousCommand {
            query: query.to_string(),
            candidates: candidates.into_iter().cloned().collect(),
        }),
    }
}

/// Global options that consume the following argument.
const VALUE_FLAGS: &[&str] = &["-C"];

/// Replace an abbreviated command name in `args` with the full name.
///
/// Leading global flags are skipped. Arguments are returned unchanged when
/// there is no command word, so clap can report usage errors itself.
pub fn expand(args: Vec<OsString>, names: &[String]) -> Result<Vec<OsString>, DispatchError> {
    let mut args = args;
    let mut index = 1;
    while index < args.len() {
        let Some(word) = args[index].to_str() else {
            return Ok(args);
        };
        if word == "--" {
            return Ok(args);
        }
        if VALUE_FLAGS.contains(&word) {
            index += 2;
            continue;
        }
        if word.starts_with('-') {
            index += 1;
            continue;
        }

        let resolved = resolve(word, names)?.to_string();
        args[index] = OsString::from(resolved);
        return Ok(args);
    }
    Ok(args)
}

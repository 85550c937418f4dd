//! Process runner for the `git` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use crate::error::{Error, Result};

/// Runs git subcommands and captures their output.
///
/// Two flavours exist on purpose: [`run`](Self::run) treats a non-zero exit
/// as an error, [`probe`](Self::probe) turns it into `false`. Probing is only
/// meant for existence and cleanliness checks.
pub trait CommandRunner {
    /// Run `git <args>` and return stdout with trailing whitespace removed.
    ///
    /// # Errors
    /// Returns [`Error::ExternalCommand`] if git exits with a non-zero status,
    /// or [`Error::Spawn`] if git could not be started.
    fn run(&self, args: &[&str]) -> Result<String>;

    /// Run `git <args>` and report whether it succeeded.
    fn probe(&self, args: &[&str]) -> bool;
}

/// [`CommandRunner`] that spawns `git` inside a working directory.
#[derive(Debug, Clone)]
pub struct GitRunner {
    workdir: PathBuf,
}

impl GitRunner {
    /// Create a runner that executes git in `workdir` without validating it.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Locate the repository containing `path` and root the runner there.
    ///
    /// # Errors
    /// Returns [`Error::NotARepository`] if `path` is not inside a work tree,
    /// or [`Error::Spawn`] if git could not be started.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let probe = Self::new(path.as_ref());
        let toplevel = probe
            .run(&["rev-parse", "--show-toplevel"])
            .map_err(|err| match err {
                Error::ExternalCommand { .. } => Error::NotARepository,
                other => other,
            })?;
        Ok(Self::new(toplevel.trim()))
    }

    /// Directory git is executed in.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        debug!("Exec {}", command_line(args));
        Ok(Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()?)
    }
}

impl CommandRunner for GitRunner {
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let diagnostic = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(Error::ExternalCommand {
                command: command_line(args),
                code: output.status.code(),
                diagnostic,
            });
        }

        Ok(stdout.trim_end().to_string())
    }

    fn probe(&self, args: &[&str]) -> bool {
        self.output(args)
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

/// Render `args` as the git command line shown in logs and errors.
#[must_use]
pub fn command_line(args: &[&str]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::process::Command as StdCommand;
    use tempfile::TempDir;

    fn init_repo() -> TempDir {
        let temp = TempDir::new().expect("Failed to create temp dir");
        StdCommand::new("git")
            .args(["init", "-q"])
            .current_dir(&temp)
            .output()
            .expect("Failed to init git repo");
        temp
    }

    #[test]
    fn test_command_line() {
        assert_eq!(command_line(&["push", "origin", "a:b"]), "git push origin a:b");
        assert_eq!(command_line(&[]), "git");
    }

    #[test]
    fn test_run_failure_reports_command() {
        let temp = init_repo();
        let runner = GitRunner::new(temp.path());

        let err = runner
            .run(&["rev-parse", "--verify", "does-not-exist"])
            .unwrap_err();
        match err {
            Error::ExternalCommand { command, code, .. } => {
                assert_eq!(command, "git rev-parse --verify does-not-exist");
                assert_ne!(code, Some(0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_probe_turns_failure_into_false() {
        let temp = init_repo();
        let runner = GitRunner::new(temp.path());

        assert!(!runner.probe(&["rev-parse", "--verify", "--quiet", "nope"]));
        assert!(runner.probe(&["rev-parse", "--git-dir"]));
    }

    #[test]
    fn test_discover_outside_repository() {
        let temp = TempDir::new().unwrap();
        // A bare temp dir may still live under some repository on the host,
        // so only assert on the error kind when discovery fails.
        if let Err(err) = GitRunner::discover(temp.path()) {
            assert!(matches!(err, Error::NotARepository));
        }
    }

    #[test]
    fn test_discover_missing_directory_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        // git cannot even be started without a working directory.
        let err = GitRunner::discover(&missing).unwrap_err();
        assert!(matches!(err, Error::Spawn(_)));
    }

    #[test]
    fn test_discover_inside_repository() {
        let temp = init_repo();
        let nested = temp.path().join("nested");
        std::fs::create_dir(&nested).unwrap();

        let runner = GitRunner::discover(&nested).unwrap();
        let expected = temp.path().canonicalize().unwrap();
        assert_eq!(runner.workdir().canonicalize().unwrap(), expected);
    }
}

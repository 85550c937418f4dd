use std::path::Path;

use anyhow::{Context, Result};
use gitja_core::{Config, Options, refs};
use gitja_git::{RefName, Repository};

/// Everything a command needs: the repository, its config and the runtime
/// options.
pub struct Session {
    pub repo: Repository,
    pub config: Config,
    pub options: Options,
}

impl Session {
    /// Open the repository at `directory` (or the current directory).
    pub fn open(directory: Option<&Path>, options: Options) -> Result<Self> {
        let repo = match directory {
            Some(dir) => Repository::open(dir),
            None => Repository::open_current(),
        }?;
        let git_dir = repo.git_dir()?;
        let config = Config::load_from_git_dir(&git_dir)
            .with_context(|| format!("Failed to load config from {}", git_dir.display()))?;

        Ok(Self {
            repo,
            config,
            options,
        })
    }

    /// Validate ref arguments, falling back to `default` when none are given.
    pub fn refs(&self, args: &[String], default: refs::DefaultRefs) -> Result<Vec<RefName>> {
        Ok(refs::select(&self.repo, args, default)?)
    }

    pub fn default_remote(&self) -> &str {
        &self.config.general.default_remote
    }
}

/// Join ref names for display.
pub fn join(refs: &[RefName]) -> String {
    refs.iter()
        .map(RefName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

//! Configuration for git-ja.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name of the config, looked up inside the `.git` directory.
pub const CONFIG_FILE: &str = "gitja.toml";

/// git-ja configuration loaded from `.git/gitja.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Divergence graph settings.
    #[serde(default)]
    pub divergence: DivergenceConfig,
}

impl Config {
    /// Load config from a TOML file. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `gitja.toml` from a repository's `.git` directory.
    ///
    /// # Errors
    /// Returns error if the file exists but can't be read or parsed.
    pub fn load_from_git_dir(git_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load(git_dir.as_ref().join(CONFIG_FILE))
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Remote used when a branch tracks nothing.
    #[serde(default = "default_remote")]
    pub default_remote: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_remote: default_remote(),
        }
    }
}

fn default_remote() -> String {
    "origin".into()
}

/// Divergence graph settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DivergenceConfig {
    /// Render graphs in topological order unless `-t` is given explicitly.
    #[serde(default)]
    pub topo_order: bool,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.default_remote, "origin");
        assert!(!config.divergence.topo_order);
    }

    #[test]
    fn test_load_partial_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "[general]\ndefault_remote = \"upstream\"\n",
        )
        .unwrap();

        let config = Config::load_from_git_dir(temp.path()).unwrap();
        assert_eq!(config.general.default_remote, "upstream");
        assert!(!config.divergence.topo_order);
    }

    #[test]
    fn test_load_divergence_section() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[divergence]\ntopo_order = true\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.divergence.topo_order);
        assert_eq!(config.general.default_remote, "origin");
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[general\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config { ref file, .. } if file == &path));
    }

    #[test]
    fn test_missing_config_returns_default() {
        let config = Config::load("/nonexistent/path/gitja.toml").unwrap();
        assert_eq!(config.general.default_remote, "origin");
    }
}

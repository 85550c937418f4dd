//! Newtypes for refs and commit ids as git prints them.

use std::fmt;

use serde::{Serialize, Serializer};

/// A branch name, local (`feature`) or remote-qualified (`origin/feature`).
///
/// Names are normalized on construction: surrounding whitespace and a
/// leading `*` (the current-branch marker in `git branch` output) are
/// removed. Equality is exact string equality after normalization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefName(String);

impl RefName {
    /// Create a normalized ref name.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        let name = trimmed.strip_prefix('*').unwrap_or(trimmed).trim();
        Self(name.to_string())
    }

    /// Get the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the `RefName` and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Split `remote/branch` at the first slash.
    ///
    /// Returns `None` for names without a slash.
    #[must_use]
    pub fn split_remote(&self) -> Option<(&str, &str)> {
        self.0
            .split_once('/')
            .filter(|(remote, branch)| !remote.is_empty() && !branch.is_empty())
    }
}

impl From<&str> for RefName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for RefName {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for RefName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for RefName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for RefName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RefName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for RefName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// A commit id as printed by git (full hex object name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    /// Wrap a commit id, trimming surrounding whitespace.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated id (first 7 characters).
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

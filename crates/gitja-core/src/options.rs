//! Runtime options shared by every command.

/// Options parsed once from the global flags and passed down explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Aggressive mode (`-m`): refresh remotes before reading them and
    /// clean up stale tracking configuration.
    pub maniac: bool,
    /// Skip remote queries a command would otherwise make (`-s`).
    pub shy: bool,
    /// Emit ANSI colors in rendered git output.
    pub color: bool,
}

impl Options {
    /// Whether remotes should be fetched before being listed.
    #[must_use]
    pub const fn refresh_remotes(&self) -> bool {
        self.maniac && !self.shy
    }
}

//! Default path resolution.
//!
//! Three directories are independently overridable: the application's own
//! config directory and one per supported integration target. Each default
//! is the home directory joined with a fixed per-kind suffix.

use std::path::PathBuf;

use provswitch_core::AppKind;

/// The three overridable config-directory kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigDirKind {
    /// The application's own config directory.
    App,
    /// A target's config directory.
    Target(AppKind),
}

impl ConfigDirKind {
    /// Returns the fixed suffix joined onto the home directory.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::App => ".provswitch",
            Self::Target(AppKind::Claude) => ".claude",
            Self::Target(AppKind::Codex) => ".codex",
        }
    }

    /// Returns the display label used in logs and the CLI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Target(AppKind::Claude) => "claude",
            Self::Target(AppKind::Codex) => "codex",
        }
    }
}

/// Returns the default directory for a kind: `home + fixed suffix`.
///
/// Falls back to the current directory when no home can be determined.
pub fn default_dir(kind: ConfigDirKind) -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(kind.suffix()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Expands a leading `~` to the home directory.
///
/// Accepts `~`, `~/rest` and `~\rest`; anything else passes through
/// unchanged.
pub fn expand_tilde(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(stripped) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(raw)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dirs_use_fixed_suffixes() {
        assert!(default_dir(ConfigDirKind::App).ends_with(".provswitch"));
        assert!(default_dir(ConfigDirKind::Target(AppKind::Claude)).ends_with(".claude"));
        assert!(default_dir(ConfigDirKind::Target(AppKind::Codex)).ends_with(".codex"));
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), home);
            assert_eq!(expand_tilde("~/x/y"), home.join("x/y"));
        }
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("rel/path"), PathBuf::from("rel/path"));
    }
}

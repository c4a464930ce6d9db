//! Directory override resolution.
//!
//! Three directories are independently overridable: the application's own
//! config directory and one per integration target. Each slot tracks its
//! override (nullable) and the value currently displayed; browse and reset
//! update both optimistically, persistence is deferred to Save.

use tracing::debug;

use provswitch_core::{normalize_dir, Settings};
use provswitch_store::{default_dir, ConfigDirKind};

use crate::host::{Host, HostError};

// ============================================================================
// Slots
// ============================================================================

/// One overridable directory.
#[derive(Debug, Clone)]
pub struct DirSlot {
    kind: ConfigDirKind,
    override_value: Option<String>,
    display: String,
}

impl DirSlot {
    fn new(kind: ConfigDirKind, override_value: Option<String>, display: String) -> Self {
        Self {
            kind,
            override_value: normalize_dir(override_value),
            display,
        }
    }

    /// The directory kind this slot controls.
    pub fn kind(&self) -> ConfigDirKind {
        self.kind
    }

    /// The current override, trimmed; `None` when the default applies.
    pub fn override_value(&self) -> Option<&str> {
        self.override_value.as_deref()
    }

    /// The path currently shown to the user.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Opens the host's picker seeded with the displayed value.
    ///
    /// Empty or whitespace selections are discarded. A real selection is
    /// trimmed and becomes both the new override and the new display value
    /// immediately, ahead of Save.
    ///
    /// # Errors
    ///
    /// Returns `HostError` when the picker itself fails to open.
    pub async fn browse<H: Host>(&mut self, host: &H) -> Result<bool, HostError> {
        let Some(choice) = host.select_directory(&self.display).await? else {
            return Ok(false);
        };
        let trimmed = choice.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        debug!(kind = self.kind.label(), path = trimmed, "Directory override picked");
        self.override_value = Some(trimmed.to_string());
        self.display = trimmed.to_string();
        Ok(true)
    }

    /// Clears the override and recomputes the default display value.
    pub fn reset(&mut self) {
        self.override_value = None;
        self.display = default_dir(self.kind).display().to_string();
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// The three directory slots edited by a settings session.
#[derive(Debug, Clone)]
pub struct DirOverrides {
    /// The application's own config directory.
    pub app: DirSlot,
    /// The Claude config directory.
    pub claude: DirSlot,
    /// The Codex config directory.
    pub codex: DirSlot,
}

impl DirOverrides {
    /// Loads all three slots from the host and the settings baselines.
    ///
    /// # Errors
    ///
    /// Returns `HostError` when an override or resolved path cannot be read.
    pub async fn load<H: Host>(host: &H, settings: &Settings) -> Result<Self, HostError> {
        use provswitch_core::AppKind;

        let app_override = host.get_dir_override().await?;
        let app_display = host.resolved_config_dir(ConfigDirKind::App).await?;
        let claude_display = host
            .resolved_config_dir(ConfigDirKind::Target(AppKind::Claude))
            .await?;
        let codex_display = host
            .resolved_config_dir(ConfigDirKind::Target(AppKind::Codex))
            .await?;

        Ok(Self {
            app: DirSlot::new(ConfigDirKind::App, app_override, app_display),
            claude: DirSlot::new(
                ConfigDirKind::Target(AppKind::Claude),
                settings.claude_config_dir.clone(),
                claude_display,
            ),
            codex: DirSlot::new(
                ConfigDirKind::Target(AppKind::Codex),
                settings.codex_config_dir.clone(),
                codex_display,
            ),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHost;

    #[tokio::test]
    async fn test_load_seeds_display_from_host() {
        let host = RecordingHost::new();
        host.set_select_response(None);
        let dirs = DirOverrides::load(&host, &Settings::default()).await.unwrap();

        assert_eq!(dirs.app.override_value(), None);
        assert_eq!(
            dirs.app.display(),
            default_dir(ConfigDirKind::App).display().to_string()
        );
    }

    #[tokio::test]
    async fn test_browse_trims_and_updates_optimistically() {
        let host = RecordingHost::new();
        let mut dirs = DirOverrides::load(&host, &Settings::default()).await.unwrap();

        host.set_select_response(Some("  /opt/custom  ".into()));
        assert!(dirs.app.browse(&host).await.unwrap());
        assert_eq!(dirs.app.override_value(), Some("/opt/custom"));
        assert_eq!(dirs.app.display(), "/opt/custom");
    }

    #[tokio::test]
    async fn test_browse_discards_blank_and_cancel() {
        let host = RecordingHost::new();
        let mut dirs = DirOverrides::load(&host, &Settings::default()).await.unwrap();
        let before = dirs.app.display().to_string();

        host.set_select_response(Some("   ".into()));
        assert!(!dirs.app.browse(&host).await.unwrap());

        host.set_select_response(None);
        assert!(!dirs.app.browse(&host).await.unwrap());

        assert_eq!(dirs.app.override_value(), None);
        assert_eq!(dirs.app.display(), before);
    }

    #[tokio::test]
    async fn test_reset_recomputes_default() {
        let host = RecordingHost::new();
        let mut dirs = DirOverrides::load(&host, &Settings::default()).await.unwrap();

        host.set_select_response(Some("/opt/custom".into()));
        dirs.claude.browse(&host).await.unwrap();
        dirs.claude.reset();

        assert_eq!(dirs.claude.override_value(), None);
        assert_eq!(
            dirs.claude.display(),
            default_dir(dirs.claude.kind()).display().to_string()
        );
    }
}

//! Local host implementation over the real stores.
//!
//! `LocalHost` is the non-interactive, non-restart-capable embedding: no
//! directory picker, no tray menu, no process restart, and no script
//! sandbox. Calls for those degrade the way the session layer expects,
//! either a logged no-op or an explicit unsupported error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use provswitch_core::{
    AppKind, Language, OperationMode, Provider, Settings, SettingsPatch, SortEntry, UsageResult,
};
use provswitch_session::{Host, HostError};
use provswitch_store::{
    default_dir, expand_tilde, load_json_or_default, ConfigDirKind, ConfigStore,
    PathOverrideStore, SettingsStore,
};

/// Marker file managed by the plugin-integration artifact step.
const INTEGRATION_MARKER: &str = ".provswitch-integration";

/// Local key-value cache holding the common-config snippets.
const CACHE_FILE: &str = "cache.json";

/// Host backed by the on-disk stores.
pub struct LocalHost {
    settings: SettingsStore,
    overrides: PathOverrideStore,
    config: ConfigStore,
    cache_path: PathBuf,
}

impl LocalHost {
    /// Loads the host from the default store locations.
    pub async fn load_default() -> Self {
        Self {
            settings: SettingsStore::load_default().await,
            overrides: PathOverrideStore::default_location(),
            config: ConfigStore::load_default().await,
            cache_path: default_dir(ConfigDirKind::App).join(CACHE_FILE),
        }
    }

    /// Loads the host with every store rooted in one directory.
    pub async fn load_in(dir: &Path) -> Self {
        Self {
            settings: SettingsStore::load(dir.join("settings.json")).await,
            overrides: PathOverrideStore::new(dir.join("paths.json")),
            config: ConfigStore::load(dir.join("config.json")).await,
            cache_path: dir.join(CACHE_FILE),
        }
    }

    /// The provider config store, for commands that read it directly.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// The settings store.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    async fn marker_path(&self) -> PathBuf {
        let dir = match self.resolved_config_dir(ConfigDirKind::Target(AppKind::Claude)).await {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_dir(ConfigDirKind::Target(AppKind::Claude)),
        };
        dir.join(INTEGRATION_MARKER)
    }
}

#[async_trait]
impl Host for LocalHost {
    async fn get_settings(&self) -> Result<SettingsPatch, HostError> {
        Ok(SettingsPatch::from(self.settings.get().await))
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), HostError> {
        self.settings.replace(settings.clone()).await;
        self.settings
            .save()
            .await
            .map_err(|e| HostError::Persistence(e.to_string()))
    }

    async fn get_dir_override(&self) -> Result<Option<String>, HostError> {
        Ok(self.overrides.get().await)
    }

    async fn set_dir_override(&self, value: Option<&str>) -> Result<(), HostError> {
        self.overrides
            .set(value)
            .await
            .map_err(|e| HostError::Persistence(e.to_string()))
    }

    async fn resolved_config_dir(&self, kind: ConfigDirKind) -> Result<String, HostError> {
        let resolved = match kind {
            ConfigDirKind::App => self.overrides.resolved().await,
            ConfigDirKind::Target(app) => {
                let settings = self.settings.get().await;
                let configured = match app {
                    AppKind::Claude => settings.claude_config_dir,
                    AppKind::Codex => settings.codex_config_dir,
                };
                configured.map(|dir| expand_tilde(&dir))
            }
        };
        let dir = resolved.unwrap_or_else(|| default_dir(kind));
        Ok(dir.display().to_string())
    }

    async fn select_directory(&self, _seed: &str) -> Result<Option<String>, HostError> {
        // Headless build, no picker; behaves as a cancel.
        debug!("Directory picker unavailable");
        Ok(None)
    }

    async fn apply_integration_artifact(&self, enabled: bool) -> Result<(), HostError> {
        let marker = self.marker_path().await;
        let result = if enabled {
            if let Some(parent) = marker.parent() {
                let _ = tokio::fs::create_dir_all(parent).await;
            }
            tokio::fs::write(&marker, "managed by provswitch\n").await
        } else {
            match tokio::fs::remove_file(&marker).await {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            }
        };
        result.map_err(|e| HostError::Persistence(e.to_string()))
    }

    async fn notify_mode_change(
        &self,
        mode: OperationMode,
        _claude_snippet: Option<String>,
        _codex_snippet: Option<String>,
    ) -> Result<(), HostError> {
        // No proxy process to notify in the CLI build.
        info!(mode = %mode, "Operation mode changed");
        Ok(())
    }

    async fn persist_sort_order(
        &self,
        app: AppKind,
        entries: &[SortEntry],
    ) -> Result<(), HostError> {
        self.config
            .apply_sort_order(app, entries)
            .await
            .map_err(|e| HostError::Persistence(e.to_string()))
    }

    async fn refresh_external_menu(&self) -> Result<(), HostError> {
        debug!("No menu to refresh");
        Ok(())
    }

    async fn query_usage(&self, provider_id: &str, app: AppKind) -> UsageResult {
        let Some(provider) = self.config.get_provider(app, provider_id).await else {
            return UsageResult::err(format!("provider not found: {provider_id}"));
        };
        if provider.usage_script().is_none_or(|s| !s.enabled) {
            return UsageResult::err("no enabled usage script for this provider");
        }
        // The CLI carries no script sandbox; the desktop embedding does.
        warn!(provider = provider_id, "Usage query requested without a script engine");
        UsageResult::err("usage-script execution is not available in the CLI")
    }

    async fn persist_provider(&self, app: AppKind, provider: &Provider) -> Result<(), HostError> {
        self.config
            .upsert_provider(app, provider.clone())
            .await
            .map_err(|e| HostError::Persistence(e.to_string()))
    }

    async fn restart_process(&self) -> Result<(), HostError> {
        Err(HostError::Unsupported(
            "the CLI cannot restart itself".to_string(),
        ))
    }

    async fn set_active_language(&self, language: Language) -> Result<(), HostError> {
        // No live UI; the preference still takes effect on save.
        debug!(language = %language, "Language preview ignored");
        Ok(())
    }

    async fn common_config_snippet(&self, app: AppKind) -> Option<String> {
        let cache: HashMap<String, String> = load_json_or_default(&self.cache_path).await;
        cache.get(app.as_str()).cloned()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_settings_round_trip_through_host() {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalHost::load_in(dir.path()).await;

        let mut settings = Settings::default();
        settings.operation_mode = OperationMode::Proxy;
        host.save_settings(&settings).await.unwrap();

        let reloaded = LocalHost::load_in(dir.path()).await;
        let patch = reloaded.get_settings().await.unwrap();
        assert_eq!(patch.resolve().operation_mode, OperationMode::Proxy);
    }

    #[tokio::test]
    async fn test_integration_artifact_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalHost::load_in(dir.path()).await;

        // point the Claude dir into the sandbox
        let mut settings = Settings::default();
        settings.claude_config_dir = Some(dir.path().display().to_string());
        host.save_settings(&settings).await.unwrap();
        let marker = dir.path().join(INTEGRATION_MARKER);

        host.apply_integration_artifact(true).await.unwrap();
        host.apply_integration_artifact(true).await.unwrap();
        assert!(marker.exists());

        host.apply_integration_artifact(false).await.unwrap();
        host.apply_integration_artifact(false).await.unwrap();
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_query_usage_without_script_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalHost::load_in(dir.path()).await;

        let provider = Provider::with_id("p1".into(), "One".into(), json!({}));
        host.persist_provider(AppKind::Claude, &provider).await.unwrap();

        let result = host.query_usage("p1", AppKind::Claude).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("no enabled usage script"));

        let missing = host.query_usage("ghost", AppKind::Claude).await;
        assert!(!missing.success);
    }

    #[tokio::test]
    async fn test_common_config_snippet_reads_cache() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(
            dir.path().join(CACHE_FILE),
            r#"{"claude": "HTTP_PROXY=http://127.0.0.1:7890"}"#,
        )
        .await
        .unwrap();
        let host = LocalHost::load_in(dir.path()).await;

        assert_eq!(
            host.common_config_snippet(AppKind::Claude).await.as_deref(),
            Some("HTTP_PROXY=http://127.0.0.1:7890")
        );
        assert_eq!(host.common_config_snippet(AppKind::Codex).await, None);
    }
}

//! Global settings store.
//!
//! Settings are read from disk as a partial [`SettingsPatch`] and resolved
//! to complete [`Settings`] through the named per-field defaults in the core
//! crate; the resolved record is what gets written back.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use provswitch_core::{Settings, SettingsPatch};

use crate::error::StoreError;
use crate::paths::{default_dir, ConfigDirKind};
use crate::persistence::{load_json_or_default, save_json};

/// File name of the settings store.
const STORE_FILE: &str = "settings.json";

/// Persistent settings store.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store with default settings at the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            settings: Arc::new(RwLock::new(Settings::default())),
            path,
        }
    }

    /// Returns the default settings file path.
    pub fn default_path() -> PathBuf {
        default_dir(ConfigDirKind::App).join(STORE_FILE)
    }

    /// Loads settings from the default path.
    pub async fn load_default() -> Self {
        Self::load(Self::default_path()).await
    }

    /// Loads settings from a path, back-filling defaults for absent fields.
    pub async fn load(path: PathBuf) -> Self {
        let patch: SettingsPatch = load_json_or_default(&path).await;
        let settings = patch.resolve();
        debug!(path = %path.display(), "Settings loaded");
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
        }
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Replaces the in-memory settings.
    pub async fn replace(&self, settings: Settings) {
        *self.settings.write().await = settings;
    }

    /// Updates settings in place.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings.write().await;
        f(&mut settings);
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the settings file cannot be written.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use provswitch_core::{Language, OperationMode};

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join(STORE_FILE)).await;
        let settings = store.get().await;
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE);

        let store = SettingsStore::load(path.clone()).await;
        store
            .update(|s| {
                s.operation_mode = OperationMode::Proxy;
                s.language = Language::En;
            })
            .await;
        store.save().await.unwrap();

        let reloaded = SettingsStore::load(path).await;
        let settings = reloaded.get().await;
        assert_eq!(settings.operation_mode, OperationMode::Proxy);
        assert_eq!(settings.language, Language::En);
    }

    #[tokio::test]
    async fn test_load_backfills_legacy_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE);
        tokio::fs::write(&path, r#"{"minimizeToTray": false, "lang": "en"}"#)
            .await
            .unwrap();

        let store = SettingsStore::load(path).await;
        let settings = store.get().await;
        assert!(!settings.minimize_to_tray_on_close);
        assert_eq!(settings.language, Language::En);
        // untouched fields resolve to defaults
        assert!(settings.show_in_tray);
    }
}

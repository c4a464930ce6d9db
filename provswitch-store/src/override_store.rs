//! Application-level config-directory override store.
//!
//! The override lives in its own `paths.json`, apart from settings, because
//! other subsystems resolve paths against it at process start and changing
//! it requires a restart. The store itself always lives under the *default*
//! app directory; anything else would be circular.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::paths::{default_dir, expand_tilde, ConfigDirKind};
use crate::persistence::{load_json_or_default, save_json};

/// File name of the override store.
const STORE_FILE: &str = "paths.json";

/// On-disk shape of the override store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PathOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    app_config_dir_override: Option<String>,
}

/// Store for the application-level config-directory override.
#[derive(Debug, Clone)]
pub struct PathOverrideStore {
    path: PathBuf,
}

impl PathOverrideStore {
    /// Creates a store backed by the given file.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a store at the default location.
    pub fn default_location() -> Self {
        Self::new(default_dir(ConfigDirKind::App).join(STORE_FILE))
    }

    /// Reads the raw override string, trimmed; `None` when unset or blank.
    pub async fn get(&self) -> Option<String> {
        let overrides: PathOverrides = load_json_or_default(&self.path).await;
        overrides
            .app_config_dir_override
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Resolves the override to an existing directory.
    ///
    /// Expands a leading `~`; a configured path that does not exist falls
    /// back to `None` with a warning so the caller uses the default.
    pub async fn resolved(&self) -> Option<PathBuf> {
        let raw = self.get().await?;
        let path = expand_tilde(&raw);
        if !path.exists() {
            warn!(
                path = %path.display(),
                "Configured app config dir does not exist, using default"
            );
            return None;
        }
        Some(path)
    }

    /// Writes the override: a trimmed non-empty string, or an explicit clear
    /// for `None`/blank values.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the store file cannot be written.
    pub async fn set(&self, value: Option<&str>) -> Result<(), StoreError> {
        let trimmed = value.map(str::trim).filter(|v| !v.is_empty());

        let overrides = PathOverrides {
            app_config_dir_override: trimmed.map(ToString::to_string),
        };
        save_json(&self.path, &overrides).await?;

        match trimmed {
            Some(v) => info!(value = v, "App config dir override saved"),
            None => info!("App config dir override cleared"),
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> PathOverrideStore {
        PathOverrideStore::new(dir.path().join(STORE_FILE))
    }

    #[tokio::test]
    async fn test_round_trip_trims_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set(Some("  /opt/custom  ")).await.unwrap();
        assert_eq!(store.get().await.as_deref(), Some("/opt/custom"));
    }

    #[tokio::test]
    async fn test_clear_with_none_and_blank() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set(Some("/opt/custom")).await.unwrap();
        store.set(None).await.unwrap();
        assert_eq!(store.get().await, None);

        store.set(Some("/opt/custom")).await.unwrap();
        store.set(Some("   ")).await.unwrap();
        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn test_resolved_requires_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .set(Some(dir.path().to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(store.resolved().await, Some(dir.path().to_path_buf()));

        store.set(Some("/definitely/not/a/real/dir")).await.unwrap();
        assert_eq!(store.resolved().await, None);
    }

    #[tokio::test]
    async fn test_unset_store_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get().await, None);
        assert_eq!(store.resolved().await, None);
    }
}

//! Provider config store.
//!
//! Holds one [`ProviderManager`] per target in a single `config.json`.
//! Reorders arrive as one batch of `(id, sortIndex)` pairs covering the
//! whole collection and are applied atomically in memory before a single
//! save.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use provswitch_core::{
    sort_providers, AppKind, Language, Provider, ProviderManager, SortEntry,
};

use crate::error::StoreError;
use crate::paths::{default_dir, ConfigDirKind};
use crate::persistence::{load_json_or_default, save_json};

/// File name of the provider config store.
const STORE_FILE: &str = "config.json";

/// On-disk shape: one provider collection per target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiAppConfig {
    /// Claude provider collection.
    #[serde(default)]
    pub claude: ProviderManager,
    /// Codex provider collection.
    #[serde(default)]
    pub codex: ProviderManager,
}

impl MultiAppConfig {
    /// Returns the collection for a target.
    pub fn manager(&self, app: AppKind) -> &ProviderManager {
        match app {
            AppKind::Claude => &self.claude,
            AppKind::Codex => &self.codex,
        }
    }

    /// Returns the mutable collection for a target.
    pub fn manager_mut(&mut self, app: AppKind) -> &mut ProviderManager {
        match app {
            AppKind::Claude => &mut self.claude,
            AppKind::Codex => &mut self.codex,
        }
    }
}

/// Persistent provider config store.
pub struct ConfigStore {
    config: Arc<RwLock<MultiAppConfig>>,
    path: PathBuf,
}

impl ConfigStore {
    /// Creates an empty store at the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            config: Arc::new(RwLock::new(MultiAppConfig::default())),
            path,
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> PathBuf {
        default_dir(ConfigDirKind::App).join(STORE_FILE)
    }

    /// Loads the store from the default path.
    pub async fn load_default() -> Self {
        Self::load(Self::default_path()).await
    }

    /// Loads the store from a path, starting empty when absent.
    pub async fn load(path: PathBuf) -> Self {
        let config: MultiAppConfig = load_json_or_default(&path).await;
        Self {
            config: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Looks up a provider by id.
    pub async fn get_provider(&self, app: AppKind, id: &str) -> Option<Provider> {
        self.config.read().await.manager(app).get(id).cloned()
    }

    /// Returns the id of the current provider for a target, if any.
    pub async fn current_id(&self, app: AppKind) -> Option<String> {
        let config = self.config.read().await;
        let current = &config.manager(app).current;
        (!current.is_empty()).then(|| current.clone())
    }

    /// Returns all providers for a target in display order.
    pub async fn providers_sorted(&self, app: AppKind, language: Language) -> Vec<Provider> {
        let config = self.config.read().await;
        let mut providers: Vec<Provider> =
            config.manager(app).providers.values().cloned().collect();
        sort_providers(&mut providers, language);
        providers
    }

    /// Inserts or replaces a provider and saves.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the config file cannot be written.
    pub async fn upsert_provider(&self, app: AppKind, provider: Provider) -> Result<(), StoreError> {
        {
            let mut config = self.config.write().await;
            config
                .manager_mut(app)
                .providers
                .insert(provider.id.clone(), provider);
        }
        self.save().await
    }

    /// Applies a full batch of sort-index assignments and saves once.
    ///
    /// Entries naming unknown ids are skipped with a warning; the batch is
    /// applied to the in-memory collection before the single write.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the config file cannot be written.
    pub async fn apply_sort_order(
        &self,
        app: AppKind,
        entries: &[SortEntry],
    ) -> Result<(), StoreError> {
        {
            let mut config = self.config.write().await;
            let manager = config.manager_mut(app);
            for entry in entries {
                match manager.providers.get_mut(&entry.id) {
                    Some(provider) => provider.sort_index = Some(entry.sort_index),
                    None => warn!(id = %entry.id, "Sort entry for unknown provider, skipping"),
                }
            }
        }
        self.save().await?;
        info!(app = %app, count = entries.len(), "Sort order persisted");
        Ok(())
    }

    /// Saves the whole store to disk.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the config file cannot be written.
    pub async fn save(&self) -> Result<(), StoreError> {
        let config = self.config.read().await;
        save_json(&self.path, &*config).await
    }
}

// ============================================================================
// Tests
// ============================================================================

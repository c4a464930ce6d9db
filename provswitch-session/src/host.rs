//! The host boundary.
//!
//! Everything the orchestration layer cannot do by itself goes through one
//! asynchronous trait. The calls are opaque: the session never learns how a
//! host persists settings, renders menus, or sandboxes a usage script, it
//! only sees acknowledgements and results.

use async_trait::async_trait;
use thiserror::Error;

use provswitch_core::{
    AppKind, Language, OperationMode, Provider, Settings, SettingsPatch, SortEntry, UsageResult,
};
use provswitch_store::ConfigDirKind;

/// Errors surfaced by host calls.
///
/// The session layer never propagates these to its own callers; each call
/// site either halts its local flow (user-triggered persistence) or logs
/// and continues (best-effort side effects).
#[derive(Debug, Error)]
pub enum HostError {
    /// A store write or read failed.
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// The host does not implement this call.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// The process restart call failed.
    #[error("Restart failed: {0}")]
    Restart(String),
}

/// Asynchronous boundary to the embedding application.
///
/// Hosts own the stores, the usage-script sandbox, and the process
/// lifecycle. Implementations must be safe to call concurrently.
#[async_trait]
pub trait Host: Send + Sync {
    /// Reads the persisted settings, possibly partial.
    async fn get_settings(&self) -> Result<SettingsPatch, HostError>;

    /// Persists a complete settings record.
    async fn save_settings(&self, settings: &Settings) -> Result<(), HostError>;

    /// Reads the application-level config-directory override.
    async fn get_dir_override(&self) -> Result<Option<String>, HostError>;

    /// Writes or clears the application-level config-directory override.
    async fn set_dir_override(&self, value: Option<&str>) -> Result<(), HostError>;

    /// Resolves the effective config directory for a kind.
    async fn resolved_config_dir(&self, kind: ConfigDirKind) -> Result<String, HostError>;

    /// Opens a directory picker seeded with the given path.
    ///
    /// `None` means the user cancelled (or the host has no picker).
    async fn select_directory(&self, seed: &str) -> Result<Option<String>, HostError>;

    /// Applies or removes the plugin-integration artifact. Idempotent.
    async fn apply_integration_artifact(&self, enabled: bool) -> Result<(), HostError>;

    /// Notifies the external mode switcher of an operation-mode change.
    async fn notify_mode_change(
        &self,
        mode: OperationMode,
        claude_snippet: Option<String>,
        codex_snippet: Option<String>,
    ) -> Result<(), HostError>;

    /// Persists a full batch of sort-index assignments for a target.
    async fn persist_sort_order(
        &self,
        app: AppKind,
        entries: &[SortEntry],
    ) -> Result<(), HostError>;

    /// Asks the host to rebuild mode-dependent views (tray menu etc).
    async fn refresh_external_menu(&self) -> Result<(), HostError>;

    /// Runs the persisted usage script for a provider.
    ///
    /// The host looks up the descriptor, substitutes credentials, performs
    /// the request, and runs the extractor in its sandbox. Failures are
    /// folded into the result, never into an `Err`.
    async fn query_usage(&self, provider_id: &str, app: AppKind) -> UsageResult;

    /// Persists one provider record for a target.
    async fn persist_provider(&self, app: AppKind, provider: &Provider) -> Result<(), HostError>;

    /// Restarts the process.
    async fn restart_process(&self) -> Result<(), HostError>;

    /// Applies a display-language change immediately (live preview).
    async fn set_active_language(&self, language: Language) -> Result<(), HostError>;

    /// Reads the locally-cached common-config snippet for a target.
    async fn common_config_snippet(&self, app: AppKind) -> Option<String>;
}

//! Domain models for Provswitch.
//!
//! This module contains the core data structures representing providers,
//! usage scripts, usage results, and application settings. The serialized
//! form (camelCase field names) matches the persisted JSON stores.
//!
//! ## Submodules
//!
//! - [`provider`] - Provider types (AppKind, Provider, ProviderManager)
//! - [`usage`] - Usage types (UsageScript, UsageData, UsageResult, UsageTier)
//! - [`settings`] - Global settings and default resolution

mod provider;
mod settings;
mod usage;

// Re-export everything at the models level
pub use provider::{AppKind, CustomEndpoint, Provider, ProviderManager, ProviderMeta};
pub use settings::{normalize_dir, Language, OperationMode, Settings, SettingsPatch};
pub use usage::{
    format_quota, UsageData, UsageResult, UsageScript, UsageTier, UNBOUNDED_MARKER,
    UNBOUNDED_TOTAL,
};

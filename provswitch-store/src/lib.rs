// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Provswitch Store
//!
//! Persisted state for the Provswitch application.
//!
//! This crate provides:
//!
//! - **SettingsStore**: global preferences with default back-fill on load
//! - **PathOverrideStore**: the application-level config-directory override,
//!   stored apart from settings because other subsystems resolve paths
//!   against it at process start
//! - **ConfigStore**: per-target provider collections with batched
//!   sort-order persistence
//! - **Persistence**: atomic JSON file I/O with restrictive permissions
//!
//! ## Usage
//!
//! ```ignore
//! use provswitch_store::{ConfigStore, SettingsStore};
//! use provswitch_core::AppKind;
//!
//! let settings = SettingsStore::load_default().await;
//! let config = ConfigStore::load_default().await;
//!
//! let providers = config.providers_sorted(AppKind::Claude, settings.get().await.language).await;
//! ```

pub mod config_store;
pub mod error;
pub mod override_store;
pub mod paths;
pub mod persistence;
pub mod settings_store;

pub use config_store::{ConfigStore, MultiAppConfig};
pub use error::StoreError;
pub use override_store::PathOverrideStore;
pub use paths::{default_dir, expand_tilde, ConfigDirKind};
pub use persistence::{load_json, load_json_or_default, save_json};
pub use settings_store::SettingsStore;

// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `Provswitch` Core
//!
//! Core types and logic for the `Provswitch` provider switcher.
//!
//! This crate provides the foundational abstractions used across all other
//! `Provswitch` crates, including:
//!
//! - Domain models (providers, usage scripts, usage results, settings)
//! - The provider ordering engine
//! - Usage-script validation and usage-result render tiers
//! - Error types
//!
//! ## Key Types
//!
//! ### Provider Types
//! - [`AppKind`] - Tag identifying which external integration a value applies to
//! - [`Provider`] - One switchable credential/config set for a target
//! - [`ProviderManager`] - The owning collection, with the externally-marked
//!   "current" provider
//!
//! ### Usage Types
//! - [`UsageScript`] - Per-provider usage-query script descriptor
//! - [`UsageResult`] - Outcome of one usage query
//! - [`UsageData`] - One normalized plan entry
//! - [`UsageTier`] - Render tier for a plan entry
//!
//! ### Settings
//! - [`Settings`] - Global preferences
//! - [`SettingsPatch`] - Partially-populated settings as read from disk

pub mod error;
pub mod models;
pub mod ordering;
pub mod script;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Provider types
    AppKind,
    CustomEndpoint,
    Provider,
    ProviderManager,
    ProviderMeta,
    // Usage types
    format_quota,
    UsageData,
    UsageResult,
    UsageScript,
    UsageTier,
    UNBOUNDED_MARKER,
    UNBOUNDED_TOTAL,
    // Settings
    normalize_dir,
    Language,
    OperationMode,
    Settings,
    SettingsPatch,
};

// Re-export ordering entry points
pub use ordering::{compare_providers, plan_reorder, sort_providers, SortEntry};

// Re-export script validation
pub use script::{effective_timeout, validate_usage_script};

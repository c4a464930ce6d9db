// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Provswitch Session
//!
//! The orchestration layer that keeps provider configs, usage queries, and
//! global settings consistent with the external stores and with each other.
//!
//! Key Types:
//! - [`Host`]: the asynchronous boundary every external effect goes through
//! - [`SettingsSession`]: the Loaded/Editing/Saving/Closed settings flow
//! - [`DirOverrides`]: effective config-directory resolution and editing
//! - [`ReorderController`]: drag reorders with batched persistence
//! - [`UsageMonitor`]: per-instance usage-query dedup and render state
//!
//! No failure is allowed past this layer uncaught: every `Host` call is
//! wrapped so a failure degrades to a logged message plus a safe render
//! state. Components that are user-triggered additionally keep their draft
//! state so the user can retry.

pub mod dirs;
pub mod host;
pub mod reorder;
pub mod settings;
pub mod usage;

#[cfg(test)]
pub(crate) mod testing;

pub use dirs::{DirOverrides, DirSlot};
pub use host::{Host, HostError};
pub use reorder::ReorderController;
pub use settings::{SaveOutcome, SessionState, SettingsSession};
pub use usage::{UsageMonitor, UsageView};

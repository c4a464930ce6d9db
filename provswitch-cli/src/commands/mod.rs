//! CLI command implementations.

pub mod dirs;
pub mod providers;
pub mod script;
pub mod settings;

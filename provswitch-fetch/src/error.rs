//! Error types for usage-script execution.

use provswitch_core::CoreError;
use thiserror::Error;

/// Errors produced while executing a usage script.
///
/// The executor turns every variant into a failed `UsageResult`; callers
/// outside this crate only ever see the rendered message.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The script descriptor is invalid or the sandbox rejected it.
    #[error("Script error: {0}")]
    Script(String),

    /// The HTTP request failed to complete.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The HTTP request completed with a non-success status.
    #[error("Request failed with status {status}: {preview}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body for diagnostics.
        preview: String,
    },

    /// The extractor returned a value of an unexpected shape.
    #[error("Invalid usage data: {0}")]
    InvalidShape(String),

    /// An error bubbled up from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
